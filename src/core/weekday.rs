use crate::domain::model::MenuItem;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// A day the restaurants serve lunch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl MenuDay {
    pub const ALL: [MenuDay; 5] = [
        MenuDay::Monday,
        MenuDay::Tuesday,
        MenuDay::Wednesday,
        MenuDay::Thursday,
        MenuDay::Friday,
    ];

    /// Swedish label as printed on the menus.
    pub fn label(self) -> &'static str {
        match self {
            MenuDay::Monday => "Måndag",
            MenuDay::Tuesday => "Tisdag",
            MenuDay::Wednesday => "Onsdag",
            MenuDay::Thursday => "Torsdag",
            MenuDay::Friday => "Fredag",
        }
    }

    /// English identifier, used as element id by some sites.
    pub fn english_id(self) -> &'static str {
        match self {
            MenuDay::Monday => "monday",
            MenuDay::Tuesday => "tuesday",
            MenuDay::Wednesday => "wednesday",
            MenuDay::Thursday => "thursday",
            MenuDay::Friday => "friday",
        }
    }

    /// Case-insensitive match of a whole string against the Swedish labels.
    pub fn from_label(text: &str) -> Option<MenuDay> {
        let lowered = text.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| day.label().to_lowercase() == lowered)
    }

    /// First day whose Swedish label occurs in `text` (case-sensitive).
    pub fn mentioned_in(text: &str) -> Option<MenuDay> {
        Self::ALL.into_iter().find(|day| text.contains(day.label()))
    }
}

impl std::fmt::Display for MenuDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayResolution {
    Open(MenuDay),
    /// Saturday or Sunday.
    Closed,
}

impl DayResolution {
    /// The day whose menu should be shown. Weekends fall back to Monday.
    pub fn effective_day(self) -> MenuDay {
        match self {
            DayResolution::Open(day) => day,
            DayResolution::Closed => MenuDay::Monday,
        }
    }
}

pub fn resolve(date: NaiveDate) -> DayResolution {
    match date.weekday() {
        Weekday::Mon => DayResolution::Open(MenuDay::Monday),
        Weekday::Tue => DayResolution::Open(MenuDay::Tuesday),
        Weekday::Wed => DayResolution::Open(MenuDay::Wednesday),
        Weekday::Thu => DayResolution::Open(MenuDay::Thursday),
        Weekday::Fri => DayResolution::Open(MenuDay::Friday),
        Weekday::Sat | Weekday::Sun => DayResolution::Closed,
    }
}

/// Keeps the items extracted for `day`, in order. Day words inside a
/// dish name play no part.
pub fn filter_for_day(items: Vec<(MenuDay, MenuItem)>, day: MenuDay) -> Vec<MenuItem> {
    items
        .into_iter()
        .filter(|(item_day, _)| *item_day == day)
        .map(|(_, item)| item)
        .collect()
}
