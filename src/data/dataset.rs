use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeywordFrequency {
    pub keyword: String,
    pub frequency: f64,
}

/// One side's input: a title, the sum of all keyword frequencies and the
/// per-keyword frequencies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub title: String,
    pub total_frequency: f64,
    pub keywords: Vec<KeywordFrequency>,
}

impl Dataset {
    /// Builds a dataset whose total is the sum of its keyword frequencies.
    pub fn from_frequencies<K>(title: impl Into<String>, keywords: K) -> Self
    where
        K: IntoIterator<Item = (String, f64)>,
    {
        let keywords = keywords
            .into_iter()
            .map(|(keyword, frequency)| KeywordFrequency { keyword, frequency })
            .collect::<Vec<_>>();
        let total_frequency = keywords.iter().map(|entry| entry.frequency).sum();

        Self {
            title: title.into(),
            total_frequency,
            keywords,
        }
    }

    pub fn frequency_map(&self) -> HashMap<&str, f64> {
        self.keywords
            .iter()
            .map(|entry| (entry.keyword.as_str(), entry.frequency))
            .collect()
    }

    pub fn keyword_names(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(|entry| entry.keyword.as_str())
    }
}

pub fn parse_dataset(raw: &str) -> Result<Dataset> {
    let dataset: Dataset = serde_json::from_str(raw).context("invalid dataset JSON")?;
    if dataset.keywords.is_empty() {
        return Err(anyhow!("dataset `{}` has no keywords", dataset.title));
    }
    Ok(dataset)
}

pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset {}", path.display()))?;
    parse_dataset(&raw).with_context(|| format!("failed to parse dataset {}", path.display()))
}
