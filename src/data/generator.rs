use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::dataset::Dataset;

/// Source of datasets for one side of the plot.
pub trait DataProvider {
    fn get_data(&mut self) -> Dataset;
}

const PRODUCE: &[&str] = &[
    "potato", "corn", "green bean", "apple", "carrot", "watermelon", "cantaloupe", "onion",
    "grapes", "tomato", "radish", "celery", "cabbage", "pea", "eggplant", "plum", "peach",
    "pear", "banana", "cucumber", "squash", "red pepper", "coconut", "pumpkin", "pickle",
    "asparagus", "lettuce", "spinach", "pomegranate", "nectarine", "beets", "broccoli",
    "olive", "orange", "passion fruit", "grapefruit", "jalapeno", "date", "apricot",
    "avocado", "cherry", "raspberry", "blueberry", "kiwi", "lemon", "mango", "pineapple",
    "rhubarb", "strawberry", "yam", "zucchini", "leek", "artichoke", "bean sprout",
    "cauliflower", "fig", "kale", "lima bean", "papaya", "plantain", "shallot",
    "sweet potato", "green pepper", "chili", "blackberry", "kidney bean",
];

const STATES: &[&str] = &[
    "Washington", "Oregon", "California", "Nevada", "Colorado", "Wyoming", "Montana",
    "Idaho", "New Mexico", "Arizona", "Texas", "Utah", "North Dakota", "South Dakota",
    "Nebraska", "Kansas", "Minnesota", "Iowa", "Missouri", "Mississippi", "Louisiana",
    "Alabama", "Illinois", "Wisconsin", "Georgia", "Florida", "Kentucky", "Tennessee",
    "North Carolina", "West Virginia", "Virginia", "South Carolina", "Pennsylvania",
    "New York", "Maryland", "Delaware", "Connecticut", "Massachusetts", "Vermont",
    "New Hampshire", "Maine", "Rhode Island", "Alaska", "Hawaii", "Indiana", "Ohio",
    "Michigan", "Oklahoma", "Arkansas", "New Jersey", "District of Columbia",
];

/// Random produce frequencies per US state. The keyword set is fixed at
/// construction so every dataset it returns lines up with the plot.
pub struct DataGenerator {
    keywords: Vec<String>,
    titles: VecDeque<&'static str>,
    frequency_range: u32,
    rng: SmallRng,
}

impl DataGenerator {
    pub fn new(keyword_count: usize, frequency_range: u32, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut produce = PRODUCE.to_vec();
        produce.shuffle(&mut rng);
        let keywords = produce
            .into_iter()
            .take(keyword_count)
            .map(str::to_owned)
            .collect();

        Self::from_parts(keywords, frequency_range, rng)
    }

    /// Generator over an explicit keyword set, e.g. one loaded from disk.
    pub fn with_keywords(keywords: Vec<String>, frequency_range: u32, seed: u64) -> Self {
        Self::from_parts(keywords, frequency_range, SmallRng::seed_from_u64(seed))
    }

    fn from_parts(keywords: Vec<String>, frequency_range: u32, mut rng: SmallRng) -> Self {
        let mut titles = STATES.to_vec();
        titles.shuffle(&mut rng);

        Self {
            keywords,
            titles: titles.into(),
            frequency_range: frequency_range.max(1),
            rng,
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn next_title(&mut self) -> &'static str {
        let title = self.titles.pop_front().unwrap_or("Untitled");
        self.titles.push_back(title);
        title
    }
}

impl DataProvider for DataGenerator {
    fn get_data(&mut self) -> Dataset {
        let title = self.next_title();
        let range = self.frequency_range;
        let rng = &mut self.rng;
        let frequencies = self
            .keywords
            .iter()
            .map(|keyword| (keyword.clone(), f64::from(rng.random_range(0..range))))
            .collect::<Vec<_>>();

        Dataset::from_frequencies(title, frequencies)
    }
}
