mod dataset;
mod generator;

pub use dataset::{Dataset, KeywordFrequency, Side, load_dataset, parse_dataset};
pub use generator::{DataGenerator, DataProvider};
