use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Sallad,
    Fisk,
    Vegetarisk,
    #[serde(rename = "Kött")]
    Kott,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Sallad => "Sallad",
            Category::Fisk => "Fisk",
            Category::Vegetarisk => "Vegetarisk",
            Category::Kott => "Kött",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Checked in order; the first hit wins.
const KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Sallad, &["sallad", "caesar"]),
    (Category::Fisk, &["fångst", "fisk"]),
    (Category::Vegetarisk, &["vegetarisk", "haloumi"]),
];

const DEFAULT_CATEGORY: Category = Category::Kott;

/// Guesses the category of a dish from its name.
pub fn classify(text: &str) -> Category {
    let lowered = text.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lowered.contains(w)))
        .map(|(category, _)| *category)
        .unwrap_or(DEFAULT_CATEGORY)
}
