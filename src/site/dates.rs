//! Publish date parsing
//!
//! News pages render dates in many shapes: machine-readable `datetime`
//! attributes, `12.03.2024 14:35`, `12 марта 2024, 14:35`, `вчера, 09:10`,
//! or a bare `14:35` for today's items. Everything is parsed relative to a
//! caller-supplied `today` so results are reproducible.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2}):(\d{2})\b").unwrap());
static NUMERIC_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})\.(\d{1,2})\.(\d{4})\b").unwrap());
static NAMED_MONTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2})\s+(\p{L}+)\.?(?:\s+(\d{4}))?").unwrap()
});

/// Lowercase month-name prefixes, Russian genitive/nominative and English
const MONTH_PREFIXES: &[(&str, u32)] = &[
    ("янв", 1),
    ("фев", 2),
    ("мар", 3),
    ("апр", 4),
    ("мая", 5),
    ("май", 5),
    ("июн", 6),
    ("июл", 7),
    ("авг", 8),
    ("сен", 9),
    ("окт", 10),
    ("ноя", 11),
    ("дек", 12),
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

const ISO_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a human-readable publish date
///
/// Returns None if no date can be recognised. A missing year defaults to the
/// year of `today`, a missing time to midnight. Text holding only a time of
/// day is taken to mean today.
pub fn parse_date(text: &str, today: NaiveDate) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.naive_local());
    }
    for layout in ISO_LAYOUTS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, layout) {
            return Some(datetime);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }

    let lower = text.to_lowercase();
    let time = find_time(&lower);
    let date = numeric_date(&lower)
        .or_else(|| named_month_date(&lower, today))
        .or_else(|| relative_day(&lower, today))
        .or_else(|| time.map(|_| today))?;

    Some(date.and_time(time.unwrap_or(NaiveTime::MIN)))
}

fn find_time(text: &str) -> Option<NaiveTime> {
    TIME_RE.captures_iter(text).find_map(|caps| {
        let hour = caps[1].parse().ok()?;
        let minute = caps[2].parse().ok()?;
        NaiveTime::from_hms_opt(hour, minute, 0)
    })
}

fn numeric_date(text: &str) -> Option<NaiveDate> {
    NUMERIC_DATE_RE.captures_iter(text).find_map(|caps| {
        let day = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let year = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    })
}

fn named_month_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    NAMED_MONTH_RE.captures_iter(text).find_map(|caps| {
        let day = caps[1].parse().ok()?;
        let month = month_number(&caps[2])?;
        let year = match caps.get(3) {
            Some(year) => year.as_str().parse().ok()?,
            None => today.year(),
        };
        NaiveDate::from_ymd_opt(year, month, day)
    })
}

fn month_number(word: &str) -> Option<u32> {
    MONTH_PREFIXES
        .iter()
        .find(|(prefix, _)| word.starts_with(prefix))
        .map(|(_, month)| *month)
}

fn relative_day(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    if text.contains("сегодня") || text.contains("today") {
        Some(today)
    } else if text.contains("вчера") || text.contains("yesterday") {
        Some(today - Duration::days(1))
    } else {
        None
    }
}
