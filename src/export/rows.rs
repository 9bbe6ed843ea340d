use crate::model::{Article, CrawlResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column names, in output order
pub const HEADERS: [&str; 7] = ["id", "date", "link", "title", "text", "tags", "metadata"];

/// Order of day and month in exported dates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateLayout {
    /// `dd.mm.yyyy HH:MM`
    #[default]
    DayMonthYear,

    /// `mm.dd.yyyy HH:MM`
    MonthDayYear,
}

impl DateLayout {
    /// chrono format string of this layout
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::DayMonthYear => "%d.%m.%Y %H:%M",
            Self::MonthDayYear => "%m.%d.%Y %H:%M",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DayMonthYear => "day-month-year",
            Self::MonthDayYear => "month-day-year",
        }
    }
}

impl fmt::Display for DateLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DateLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day-month-year" => Ok(Self::DayMonthYear),
            "month-day-year" => Ok(Self::MonthDayYear),
            other => Err(format!(
                "unknown date format '{}', expected day-month-year or month-day-year",
                other
            )),
        }
    }
}

/// One flat output record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRow {
    pub id: usize,
    pub date: String,
    pub link: String,
    pub title: String,
    pub text: String,
    pub tags: String,
    pub metadata: String,
}

/// Field-level normalization applied while building rows
#[derive(Debug, Clone)]
pub struct RowOptions {
    pub date_layout: DateLayout,

    /// Joins `tags` and `metadata` entries
    pub list_separator: String,

    /// Replaced by a single space in `title` and `text`
    pub stop_symbols: Vec<String>,
}

impl Default for RowOptions {
    fn default() -> Self {
        Self {
            date_layout: DateLayout::default(),
            list_separator: ",".to_string(),
            stop_symbols: Vec::new(),
        }
    }
}

/// Converts a crawl result into rows, in id order
pub fn to_rows(result: &CrawlResult, options: &RowOptions) -> Vec<ArticleRow> {
    result
        .iter()
        .map(|article| to_row(article, options))
        .collect()
}

fn to_row(article: &Article, options: &RowOptions) -> ArticleRow {
    ArticleRow {
        id: article.id,
        date: article
            .published_at
            .map(|date| date.format(options.date_layout.pattern()).to_string())
            .unwrap_or_default(),
        link: article.link.clone(),
        title: replace_stop_symbols(&article.title, &options.stop_symbols),
        text: replace_stop_symbols(&article.body, &options.stop_symbols),
        tags: article.tags.join(&options.list_separator),
        metadata: article.metadata.join(&options.list_separator),
    }
}

/// Replaces every stop symbol occurrence with a space
///
/// Lossy: the original characters cannot be recovered.
pub fn replace_stop_symbols(text: &str, stop_symbols: &[String]) -> String {
    stop_symbols
        .iter()
        .filter(|symbol| !symbol.is_empty())
        .fold(text.to_string(), |acc, symbol| acc.replace(symbol.as_str(), " "))
}
