//! Kooperativet (https://www.kooperativet.se/).
//!
//! Each weekday has its own section (`#monday` .. `#friday`) holding
//! `.avia_textblock` blocks. Inside a block, upper-case section headers
//! ("KÖTT", "FISK", ...) are followed by one paragraph per dish.

use crate::adapters::html::{block_text, selector};
use crate::core::lines::{classify_lines, split_lines, LineRules};
use crate::core::weekday::MenuDay;
use crate::domain::model::{MenuItem, SourceInfo};
use crate::domain::ports::SourceAdapter;
use crate::utils::error::Result;
use async_trait::async_trait;
use scraper::Html;

pub const ID: &str = "kooperativet";
pub const DISPLAY_NAME: &str = "Kooperativet";
pub const URL: &str = "https://www.kooperativet.se/";

const SECTION_HEADERS: [&str; 9] = [
    "SALLADER",
    "VECKANS SOMMARSPECIAL",
    "KÖTT",
    "FISK",
    "THAI",
    "INDISK",
    "VÄRLDEN",
    "VEGETARISK",
    "VEGETARISKT",
];
const NOT_A_DISH: [&str; 6] = [
    "–",
    "—",
    "....................................",
    "Vecka",
    "Serveras",
    "Priset",
];
const DEFAULT_MIN_DISH_LEN: usize = 20;

pub struct KooperativetSource {
    info: SourceInfo,
    rules: LineRules,
}

impl Default for KooperativetSource {
    fn default() -> Self {
        Self::new(URL)
    }
}

impl KooperativetSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            info: SourceInfo::new(ID, DISPLAY_NAME, url),
            rules: LineRules::leading_keywords(SECTION_HEADERS)
                .with_min_description_len(DEFAULT_MIN_DISH_LEN)
                .with_excludes(NOT_A_DISH)
                .with_record_per_line(true),
        }
    }

    pub fn with_min_dish_len(mut self, len: usize) -> Self {
        self.rules.min_description_len = len;
        self
    }
}

#[async_trait]
impl SourceAdapter for KooperativetSource {
    fn info(&self) -> &SourceInfo {
        &self.info
    }

    fn extract_week(&self, html: &str) -> Result<Vec<(MenuDay, MenuItem)>> {
        let document = Html::parse_document(html);
        let text_blocks = selector(".avia_textblock")?;
        let mut items = Vec::new();

        for day in MenuDay::ALL {
            let section_selector = selector(&format!("#{}", day.english_id()))?;
            let Some(section) = document.select(&section_selector).next() else {
                tracing::debug!(source = ID, day = day.english_id(), "No section for day");
                continue;
            };

            for block in section.select(&text_blocks) {
                let text = block_text(block);
                for dish in classify_lines(split_lines(&text), &self.rules) {
                    items.push((
                        day,
                        MenuItem::new(format!("{} - {}", dish.name, day.label()))
                            .with_description(dish.description)
                            .with_category(dish.category),
                    ));
                }
            }
        }

        tracing::debug!(source = ID, items = items.len(), "Parsed menu items from HTML");
        Ok(items)
    }
}
