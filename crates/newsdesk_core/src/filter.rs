use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::NewsItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Most recent first; unparsable dates last.
    #[default]
    Date,
    /// Alphabetical by title.
    Title,
}

impl SortKey {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "date" => Some(SortKey::Date),
            "title" => Some(SortKey::Title),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Title => "title",
        }
    }
}

/// User-controlled view settings. Never touched by network results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewFilter {
    pub keyword: String,
    pub sort_by: SortKey,
}

/// Case-insensitive keyword match against title or author.
pub fn matches_keyword(item: &NewsItem, keyword: &str) -> bool {
    if keyword.is_empty() {
        return true;
    }
    let needle = keyword.to_lowercase();
    item.title.to_lowercase().contains(&needle) || item.author.to_lowercase().contains(&needle)
}

/// Derives the displayed list. The input is left untouched and ties keep
/// their input order.
pub fn filter_and_sort(items: &[NewsItem], filter: &ViewFilter) -> Vec<NewsItem> {
    let mut kept: Vec<NewsItem> = items
        .iter()
        .filter(|item| matches_keyword(item, &filter.keyword))
        .cloned()
        .collect();

    match filter.sort_by {
        SortKey::Date => {
            let mut keyed: Vec<(Option<i64>, NewsItem)> = kept
                .into_iter()
                .map(|item| (parse_display_date(&item.date), item))
                .collect();
            keyed.sort_by(|(a, _), (b, _)| newest_first(*a, *b));
            kept = keyed.into_iter().map(|(_, item)| item).collect();
        }
        SortKey::Title => kept.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }
    kept
}

fn newest_first(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Alphabetical order the way a reader expects it: accents and case only
/// break ties, so "Éxito" files under E and "Ñino" under N.
fn compare_titles(a: &str, b: &str) -> Ordering {
    title_collation_key(a)
        .cmp(&title_collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Primary sort key for titles: decomposed, diacritics dropped, lowercased.
pub fn title_collation_key(title: &str) -> String {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%B %d, %Y %I:%M %p",
    "%b %d, %Y %I:%M %p",
    "%A, %B %d, %Y %I:%M %p",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%A, %B %d, %Y",
];

/// Parses a free-form display date into milliseconds since the Unix epoch.
///
/// Values without a zone are read as UTC. Returns `None` when nothing matches.
pub fn parse_display_date(raw: &str) -> Option<i64> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.timestamp_millis());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(parsed.timestamp_millis());
    }

    let naive = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;
    Some(naive.and_utc().timestamp_millis())
}
