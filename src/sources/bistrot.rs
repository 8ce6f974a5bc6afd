//! Bistrot (https://bistrot.se/).
//!
//! The menu is rendered by a food-and-drink plugin as `.fdm-item`
//! entries. One entry titled "Veckans ..." lists dishes served all week;
//! the other entries are titled by weekday and list that day's dishes.

use crate::adapters::html::{block_text_marked, normalize_whitespace, selector, text_content};
use crate::config::HeuristicsConfig;
use crate::core::lines::{classify_lines, split_lines, HeaderRule, LineRules, ParsedDish};
use crate::core::weekday::MenuDay;
use crate::domain::model::{MenuItem, SourceInfo};
use crate::domain::ports::SourceAdapter;
use crate::utils::error::Result;
use async_trait::async_trait;
use scraper::Html;

pub const ID: &str = "bistrot";
pub const DISPLAY_NAME: &str = "Bistrot";
pub const URL: &str = "https://bistrot.se/";

pub struct BistrotSource {
    info: SourceInfo,
    rules: LineRules,
}

impl Default for BistrotSource {
    fn default() -> Self {
        Self::new(URL)
    }
}

impl BistrotSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            info: SourceInfo::new(ID, DISPLAY_NAME, url),
            rules: LineRules::default(),
        }
    }

    pub fn with_heuristics(mut self, heuristics: &HeuristicsConfig) -> Self {
        self.rules.header = HeaderRule::Heuristic {
            max_len: heuristics.max_header_len,
            max_words: heuristics.max_header_words,
        };
        self.rules.min_description_len = heuristics.min_description_len;
        self
    }

    fn parse_dishes(&self, content: &str) -> Vec<ParsedDish> {
        classify_lines(split_lines(content), &self.rules)
    }
}

fn is_weekly(title: &str) -> bool {
    let lowered = title.to_lowercase();
    lowered.contains("vecka") || lowered.contains("week")
}

#[async_trait]
impl SourceAdapter for BistrotSource {
    fn info(&self) -> &SourceInfo {
        &self.info
    }

    fn extract_week(&self, html: &str) -> Result<Vec<(MenuDay, MenuItem)>> {
        let document = Html::parse_document(html);
        let item_selector = selector(".fdm-item")?;
        let title_selector = selector(".fdm-item-title")?;
        let content_selector = selector(".fdm-item-content")?;

        let entries: Vec<(String, String)> = document
            .select(&item_selector)
            .filter_map(|item| {
                let title = item.select(&title_selector).next()?;
                let content = item.select(&content_selector).next()?;
                let title = normalize_whitespace(&text_content(title));
                let content = block_text_marked(content);
                (!title.is_empty() && !content.trim().is_empty()).then_some((title, content))
            })
            .collect();
        tracing::debug!(source = ID, entries = entries.len(), "Found .fdm-item entries");

        let weekly = entries
            .iter()
            .find(|(title, _)| is_weekly(title))
            .map(|(title, content)| {
                let dishes = self.parse_dishes(content);
                tracing::debug!(source = ID, title = %title, dishes = dishes.len(), "Weekly dishes");
                dishes
            })
            .unwrap_or_default();

        let mut items = Vec::new();
        for (title, content) in entries.iter().filter(|(title, _)| !is_weekly(title)) {
            let Some(day) = MenuDay::mentioned_in(title) else {
                continue;
            };

            let daily = self.parse_dishes(content);
            tracing::debug!(source = ID, title = %title, dishes = daily.len(), "Daily dishes");

            for dish in weekly.iter().chain(daily.iter()) {
                items.push((
                    day,
                    MenuItem::new(format!("{} - {}", dish.name, title))
                        .with_description(dish.description.clone())
                        .with_category(dish.category.clone()),
                ));
            }
        }

        tracing::debug!(source = ID, items = items.len(), "Parsed menu items from HTML");
        Ok(items)
    }
}
