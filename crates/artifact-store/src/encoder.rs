//! Country Label Encoding

use std::collections::HashMap;

/// Bijection from country names to small integer codes, fixed at
/// training time. A country's code is its position in the training-time
/// class list (label-encoder semantics).
#[derive(Debug, Clone)]
pub struct CountryEncoder {
    classes: Vec<String>,
    codes: HashMap<String, usize>,
}

impl CountryEncoder {
    /// Build from the training-time class list, in stored order
    pub fn new(classes: Vec<String>) -> Self {
        let codes = classes
            .iter()
            .enumerate()
            .map(|(code, name)| (name.clone(), code))
            .collect();
        Self { classes, codes }
    }

    /// Integer code for a country, None if never seen at training time
    pub fn encode(&self, country: &str) -> Option<usize> {
        self.codes.get(country).copied()
    }

    /// Class list in stored order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
