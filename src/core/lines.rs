//! Line-classification engine.
//!
//! Walks the text lines of one block (a day's section or a free-form menu
//! blob) and groups them into dishes: a header line names the dish, the
//! lines after it describe it. The walk is a small state machine:
//!
//! ```text
//! SeekingHeader --header--> AccumulatingDescription --header--> (flush) AccumulatingDescription
//!                                    |                                        |
//!                                    +---------------- end of block ----------+--> (flush)
//! ```
//!
//! A flush only yields a record when both the header and the description
//! are non-empty; bare headers are stray labels and are dropped.

use crate::core::category::classify;

pub const DEFAULT_MAX_HEADER_LEN: usize = 50;
pub const DEFAULT_MIN_DESCRIPTION_LEN: usize = 10;
pub const DEFAULT_MAX_HEADER_WORDS: usize = 4;

const MIN_HEADER_LEN: usize = 3;
const EMPHASIS_MARKERS: [&str; 3] = ["**", "<strong>", "</strong>"];
const DASHES: [char; 2] = ['–', '—'];
const TITLE_BREAKERS: [char; 4] = [',', '.', ';', ':'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderRule {
    /// Short, title-like lines (or emphasized ones) start a new dish.
    Heuristic { max_len: usize, max_words: usize },
    /// Lines starting with one of the keywords start a new section.
    LeadingKeywords(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryMode {
    /// Run the keyword classifier on the dish name.
    Classify,
    /// The header text is the category.
    Header,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRules {
    pub header: HeaderRule,
    pub min_description_len: usize,
    /// A description line containing any of these is skipped.
    pub description_excludes: Vec<String>,
    /// Emit one record per description line instead of joining them.
    pub record_per_line: bool,
    pub category: CategoryMode,
}

impl Default for LineRules {
    fn default() -> Self {
        Self::heuristic(DEFAULT_MAX_HEADER_LEN, DEFAULT_MIN_DESCRIPTION_LEN)
    }
}

impl LineRules {
    pub fn heuristic(max_header_len: usize, min_description_len: usize) -> Self {
        Self {
            header: HeaderRule::Heuristic {
                max_len: max_header_len,
                max_words: DEFAULT_MAX_HEADER_WORDS,
            },
            min_description_len,
            description_excludes: vec!["<!--".to_string()],
            record_per_line: false,
            category: CategoryMode::Classify,
        }
    }

    pub fn leading_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: HeaderRule::LeadingKeywords(keywords.into_iter().map(Into::into).collect()),
            min_description_len: DEFAULT_MIN_DESCRIPTION_LEN,
            description_excludes: vec!["<!--".to_string()],
            record_per_line: false,
            category: CategoryMode::Header,
        }
    }

    pub fn with_min_description_len(mut self, len: usize) -> Self {
        self.min_description_len = len;
        self
    }

    pub fn with_excludes<I, S>(mut self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.description_excludes
            .extend(fragments.into_iter().map(Into::into));
        self
    }

    pub fn with_record_per_line(mut self, enabled: bool) -> Self {
        self.record_per_line = enabled;
        self
    }

    fn is_header(&self, line: &str) -> bool {
        match &self.header {
            HeaderRule::Heuristic { max_len, max_words } => {
                let len = line.chars().count();
                let emphasized = EMPHASIS_MARKERS.iter().any(|m| line.contains(m));
                let title_like = len < *max_len
                    && !line.contains(DASHES)
                    && !line.contains("Serveras")
                    && !line.contains(TITLE_BREAKERS)
                    && line.split_whitespace().count() <= *max_words;

                (emphasized || title_like) && len > MIN_HEADER_LEN && len < *max_len
            }
            HeaderRule::LeadingKeywords(keywords) => {
                keywords.iter().any(|k| line.starts_with(k.as_str()))
            }
        }
    }

    fn is_description(&self, line: &str) -> bool {
        line.chars().count() > self.min_description_len
            && !self
                .description_excludes
                .iter()
                .any(|fragment| line.contains(fragment.as_str()))
    }
}

/// A dish assembled from a header and its description lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDish {
    pub name: String,
    pub description: String,
    pub category: String,
}

#[derive(Debug)]
enum State {
    SeekingHeader,
    AccumulatingDescription { header: String, description: String },
}

pub struct LineClassifier<'r> {
    rules: &'r LineRules,
    state: State,
    dishes: Vec<ParsedDish>,
}

impl<'r> LineClassifier<'r> {
    pub fn new(rules: &'r LineRules) -> Self {
        Self {
            rules,
            state: State::SeekingHeader,
            dishes: Vec::new(),
        }
    }

    /// Feeds one trimmed, non-empty line.
    pub fn push_line(&mut self, line: &str) {
        if self.rules.is_header(line) {
            self.flush();
            let header = strip_emphasis(line);
            tracing::trace!(header = %header, "header");
            self.state = State::AccumulatingDescription {
                header,
                description: String::new(),
            };
            return;
        }

        let State::AccumulatingDescription {
            header,
            description,
        } = &mut self.state
        else {
            return;
        };

        if !self.rules.is_description(line) {
            tracing::trace!(line, "skipped");
            return;
        }

        if self.rules.record_per_line {
            let dish = make_dish(self.rules, header.clone(), line.to_string());
            self.dishes.push(dish);
            return;
        }

        if !description.is_empty() {
            description.push(' ');
        }
        description.push_str(line);
    }

    pub fn finish(mut self) -> Vec<ParsedDish> {
        self.flush();
        self.dishes
    }

    fn flush(&mut self) {
        if let State::AccumulatingDescription {
            header,
            description,
        } = std::mem::replace(&mut self.state, State::SeekingHeader)
        {
            if !header.is_empty() && !description.is_empty() {
                tracing::trace!(dish = %header, "flushed");
                self.dishes.push(make_dish(self.rules, header, description));
            }
        }
    }
}

fn make_dish(rules: &LineRules, name: String, description: String) -> ParsedDish {
    let category = match rules.category {
        CategoryMode::Classify => classify(&name).to_string(),
        CategoryMode::Header => name.clone(),
    };
    ParsedDish {
        name,
        description,
        category,
    }
}

fn strip_emphasis(line: &str) -> String {
    EMPHASIS_MARKERS
        .iter()
        .fold(line.to_string(), |acc, marker| acc.replace(marker, ""))
        .trim()
        .to_string()
}

/// Splits a text block into trimmed, non-empty lines.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Runs the engine over one block of lines.
pub fn classify_lines<'a, I>(lines: I, rules: &LineRules) -> Vec<ParsedDish>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut classifier = LineClassifier::new(rules);
    for line in lines {
        classifier.push_line(line);
    }
    classifier.finish()
}
