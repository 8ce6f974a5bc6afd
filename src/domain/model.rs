use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl MenuItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            price: None,
            category: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedMenu {
    pub source_id: String,
    pub items: Vec<MenuItem>,
    pub retrieved_at: DateTime<Utc>,
    pub source_url: String,
}

/// Outcome of one scrape call. Serialized as
/// `{"success": bool, "menu"?: {...}, "error"?: "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireResult", into = "WireResult")]
pub enum ScraperResult {
    Success(ScrapedMenu),
    Failure(String),
}

impl ScraperResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn menu(&self) -> Option<&ScrapedMenu> {
        match self {
            Self::Success(menu) => Some(menu),
            Self::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(message) => Some(message),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct WireResult {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    menu: Option<ScrapedMenu>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<ScraperResult> for WireResult {
    fn from(result: ScraperResult) -> Self {
        match result {
            ScraperResult::Success(menu) => WireResult {
                success: true,
                menu: Some(menu),
                error: None,
            },
            ScraperResult::Failure(error) => WireResult {
                success: false,
                menu: None,
                error: Some(error),
            },
        }
    }
}

impl TryFrom<WireResult> for ScraperResult {
    type Error = String;

    fn try_from(wire: WireResult) -> std::result::Result<Self, Self::Error> {
        match wire {
            WireResult {
                success: true,
                menu: Some(menu),
                error: None,
            } => Ok(ScraperResult::Success(menu)),
            WireResult {
                success: false,
                menu: None,
                error,
            } => Ok(ScraperResult::Failure(error.unwrap_or_default())),
            WireResult { success: true, .. } => {
                Err("successful result must carry a menu and no error".to_string())
            }
            WireResult { success: false, .. } => {
                Err("failed result must not carry a menu".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub id: String,
    pub display_name: String,
    pub source_url: String,
}

impl SourceInfo {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            source_url: source_url.into(),
        }
    }
}
