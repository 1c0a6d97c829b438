//! Article dates: parsing front-matter values and long-form display.
//!
//! The raw string from front matter is kept next to the parsed date. The
//! sitemap publishes the raw value, ordering uses the parsed one, and pages
//! show the long localized form.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Locale used for human-readable dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayLocale {
    /// Thai, Buddhist-era year: `1 มกราคม 2567`.
    #[default]
    Th,
    /// English: `January 1, 2024`.
    En,
}

const THAI_MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Offset between the Gregorian and the Thai solar (Buddhist era) year.
const BUDDHIST_ERA_OFFSET: i32 = 543;

/// A calendar date together with the text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDate {
    pub date: NaiveDate,
    pub raw: String,
}

impl ArticleDate {
    /// Parse a front-matter date.
    ///
    /// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `YYYY-MM-DD HH:MM[:SS]`.
    /// Time and offset are discarded; the date as written is what counts.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                chrono::DateTime::parse_from_rfc3339(trimmed)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
            .or_else(|| {
                ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"]
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                    .map(|dt| dt.date())
            })?;
        Some(Self {
            date,
            raw: trimmed.to_string(),
        })
    }

    /// Date with its ISO form as the raw text. Used for defaults.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            date,
            raw: date.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn display(&self, locale: DisplayLocale) -> String {
        format_long(self.date, locale)
    }
}

impl fmt::Display for ArticleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Render a date with the full month name, day and year.
pub fn format_long(date: NaiveDate, locale: DisplayLocale) -> String {
    let month = date.month0() as usize;
    match locale {
        DisplayLocale::Th => format!(
            "{} {} {}",
            date.day(),
            THAI_MONTHS[month],
            date.year() + BUDDHIST_ERA_OFFSET
        ),
        DisplayLocale::En => format!("{} {}, {}", ENGLISH_MONTHS[month], date.day(), date.year()),
    }
}

/// Today's date in local time.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
