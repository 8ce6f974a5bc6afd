use crate::core::registry::ScrapeResults;
use crate::domain::model::{ScraperResult, SourceInfo};
use crate::utils::error::{Result, ScrapeError};
use std::fmt::Write as _;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!(
                "unsupported format '{}'. Valid formats: text, json, csv",
                other
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        })
    }
}

pub fn render(
    results: &ScrapeResults,
    sources: &[SourceInfo],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(results, sources)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(results)?),
        OutputFormat::Csv => render_csv(results),
    }
}

fn render_text(results: &ScrapeResults, sources: &[SourceInfo]) -> String {
    let mut out = String::new();

    for (id, result) in results.iter() {
        let name = sources
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.display_name.as_str())
            .unwrap_or(id);
        let _ = writeln!(out, "== {} ==", name);

        match result {
            ScraperResult::Success(menu) if menu.items.is_empty() => {
                let _ = writeln!(out, "  (no menu items found)");
            }
            ScraperResult::Success(menu) => {
                for item in &menu.items {
                    match &item.category {
                        Some(category) => {
                            let _ = writeln!(out, "  * {} [{}]", item.name, category);
                        }
                        None => {
                            let _ = writeln!(out, "  * {}", item.name);
                        }
                    }
                    if let Some(description) = &item.description {
                        let _ = writeln!(out, "      {}", description);
                    }
                    if let Some(price) = &item.price {
                        let _ = writeln!(out, "      {}", price);
                    }
                }
            }
            ScraperResult::Failure(error) => {
                let _ = writeln!(out, "  ❌ {}", error);
            }
        }
        out.push('\n');
    }

    out
}

fn render_csv(results: &ScrapeResults) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "source_id",
        "success",
        "name",
        "category",
        "description",
        "price",
        "error",
    ])?;

    for (id, result) in results.iter() {
        match result {
            ScraperResult::Success(menu) => {
                for item in &menu.items {
                    writer.write_record([
                        id,
                        "true",
                        item.name.as_str(),
                        item.category.as_deref().unwrap_or(""),
                        item.description.as_deref().unwrap_or(""),
                        item.price.as_deref().unwrap_or(""),
                        "",
                    ])?;
                }
            }
            ScraperResult::Failure(error) => {
                writer.write_record([id, "false", "", "", "", "", error.as_str()])?;
            }
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ScrapeError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{MenuItem, ScrapedMenu};
    use chrono::Utc;

    fn results() -> ScrapeResults {
        vec![
            (
                "bistrot".to_string(),
                ScraperResult::Success(ScrapedMenu {
                    source_id: "bistrot".to_string(),
                    items: vec![MenuItem::new("Caesarsallad - Måndag")
                        .with_description("Krutonger, parmesan, dressing")
                        .with_category("Sallad")],
                    retrieved_at: Utc::now(),
                    source_url: "https://bistrot.se/".to_string(),
                }),
            ),
            (
                "kooperativet".to_string(),
                ScraperResult::failure("HTTP error! status: 500"),
            ),
        ]
        .into_iter()
        .collect()
    }

    fn sources() -> Vec<SourceInfo> {
        vec![SourceInfo::new("bistrot", "Bistrot", "https://bistrot.se/")]
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("csv".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_text() {
        let text = render(&results(), &sources(), OutputFormat::Text).unwrap();

        assert!(text.contains("== Bistrot =="));
        assert!(text.contains("* Caesarsallad - Måndag [Sallad]"));
        assert!(text.contains("Krutonger, parmesan, dressing"));
        assert!(text.contains("== kooperativet =="));
        assert!(text.contains("❌ HTTP error! status: 500"));
    }

    #[test]
    fn test_render_csv() {
        let csv = render(&results(), &sources(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "source_id,success,name,category,description,price,error");
        assert_eq!(
            lines[1],
            "bistrot,true,Caesarsallad - Måndag,Sallad,\"Krutonger, parmesan, dressing\",,"
        );
        assert_eq!(lines[2], "kooperativet,false,,,,,HTTP error! status: 500");
    }

    #[test]
    fn test_render_json_is_keyed_by_source() {
        let json = render(&results(), &sources(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["bistrot"]["success"], true);
        assert_eq!(value["kooperativet"]["error"], "HTTP error! status: 500");
    }
}
