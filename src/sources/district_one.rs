//! District One (https://districtone.se/lunch.html).
//!
//! The lunch page is a flat run of `<p>` elements: a weekday name, then
//! category labels (often underlined) each followed by the dish text.

use crate::adapters::html::{normalize_whitespace, selector, text_content};
use crate::core::weekday::MenuDay;
use crate::domain::model::{MenuItem, SourceInfo};
use crate::domain::ports::SourceAdapter;
use crate::utils::error::Result;
use async_trait::async_trait;
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

pub const ID: &str = "district-one";
pub const DISPLAY_NAME: &str = "District One";
pub const URL: &str = "https://districtone.se/lunch.html";

const CATEGORIES: [&str; 7] = [
    "Fisk",
    "Kött",
    "Sallad",
    "Asiatisk",
    "Vegetarisk",
    "Poke bowl",
    "Pho",
];
const SKIP_MARKERS: [&str; 3] = ["....................................", "Vecka", "Serveras"];
const DEFAULT_MIN_DISH_LEN: usize = 20;

static LETTERS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-ZÅÄÖa-zåäö\s]+$").expect("category pattern is valid"));

pub struct DistrictOneSource {
    info: SourceInfo,
    min_dish_len: usize,
}

impl Default for DistrictOneSource {
    fn default() -> Self {
        Self::new(URL)
    }
}

impl DistrictOneSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            info: SourceInfo::new(ID, DISPLAY_NAME, url),
            min_dish_len: DEFAULT_MIN_DISH_LEN,
        }
    }

    /// Paragraphs must be longer than this to count as a dish.
    pub fn with_min_dish_len(mut self, len: usize) -> Self {
        self.min_dish_len = len;
        self
    }
}

#[async_trait]
impl SourceAdapter for DistrictOneSource {
    fn info(&self) -> &SourceInfo {
        &self.info
    }

    fn extract_week(&self, html: &str) -> Result<Vec<(MenuDay, MenuItem)>> {
        let document = Html::parse_document(html);
        let paragraphs = selector("p")?;

        let mut walker = ParagraphWalker::new(self.min_dish_len);
        for p in document.select(&paragraphs) {
            walker.push(&normalize_whitespace(&text_content(p)));
        }

        tracing::debug!(source = ID, items = walker.items.len(), "Parsed menu items from HTML");
        Ok(walker.items)
    }
}

/// Tracks the current weekday and category while paragraphs go by.
struct ParagraphWalker {
    min_dish_len: usize,
    day: Option<MenuDay>,
    category: Option<String>,
    items: Vec<(MenuDay, MenuItem)>,
}

impl ParagraphWalker {
    fn new(min_dish_len: usize) -> Self {
        Self {
            min_dish_len,
            day: None,
            category: None,
            items: Vec::new(),
        }
    }

    fn push(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        if let Some(day) = MenuDay::from_label(text) {
            self.day = Some(day);
            return;
        }

        if is_category_label(text) {
            self.category = Some(text.to_string());
            return;
        }

        let (Some(day), Some(category)) = (self.day, &self.category) else {
            return;
        };
        if text.chars().count() <= self.min_dish_len
            || SKIP_MARKERS.iter().any(|marker| text.contains(marker))
        {
            return;
        }

        self.items.push((
            day,
            MenuItem::new(format!("{} - {}", category, day.label()))
                .with_description(text)
                .with_category(category.clone()),
        ));
    }
}

fn is_category_label(text: &str) -> bool {
    LETTERS_ONLY.is_match(text) && CATEGORIES.iter().any(|c| text.contains(c))
}
