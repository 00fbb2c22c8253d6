use crate::models::Clipping;
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

pub const SEPARATOR: &str = "==========";

const ADDED_ON: &str = "Added on";
const BOM: char = '\u{feff}';

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

// Tried in order; the weekday prefix has already been removed.
const DATETIME_LAYOUTS: [&str; 2] = ["%B %d, %Y %I:%M:%S %p", "%d %B %Y %H:%M:%S"];
const DATE_LAYOUTS: [&str; 2] = ["%B %d, %Y", "%d %B %Y"];

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

#[derive(Debug, Default)]
struct Metadata {
    page: Option<u32>,
    start_location: Option<u32>,
    end_location: Option<u32>,
    date: Option<String>,
}

/// Parses one block of `My Clippings.txt`. Missing fields are `None`.
pub fn parse_clipping(raw: &str) -> Clipping {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let metadata = lines
        .get(1)
        .map(|line| parse_metadata(line))
        .unwrap_or_default();

    Clipping {
        title_author: lines.first().map(|line| line.to_string()),
        page: metadata.page,
        start_location: metadata.start_location,
        end_location: metadata.end_location,
        date: metadata.date,
        text: lines.get(2).map(|line| line.to_string()),
    }
}

pub fn split_clippings(content: &str) -> Vec<&str> {
    content
        .split(SEPARATOR)
        .map(|block| block.trim_start().trim_start_matches(BOM))
        .filter(|block| !block.trim().is_empty())
        .collect()
}

pub fn parse_clippings(content: &str) -> Vec<Clipping> {
    split_clippings(content)
        .into_iter()
        .map(parse_clipping)
        .collect()
}

// "- Your Highlight on page 45 | location 678-680 | Added on ..." has three
// segments; exports without page numbers drop the first one.
fn parse_metadata(line: &str) -> Metadata {
    let segments: Vec<&str> = line.split('|').map(str::trim).collect();

    let (page, location) = match segments.as_slice() {
        [location, _] => (None, Some(*location)),
        [page, location, _] => (Some(*page), Some(*location)),
        _ => (None, None),
    };

    let (start_location, end_location) = location.map(locations).unwrap_or_default();

    Metadata {
        page: page.and_then(first_number),
        start_location,
        end_location,
        date: segments.last().map(|segment| clean_date(segment)),
    }
}

fn first_number(phrase: &str) -> Option<u32> {
    DIGIT_RUN
        .find(phrase)
        .and_then(|run| run.as_str().parse().ok())
}

fn locations(phrase: &str) -> (Option<u32>, Option<u32>) {
    let mut runs = DIGIT_RUN
        .find_iter(phrase)
        .map(|run| run.as_str().parse::<u32>().ok());

    let start = runs.next().flatten();
    let end = match start {
        Some(_) => runs.next().flatten(),
        None => None,
    };

    (start, end)
}

fn clean_date(segment: &str) -> String {
    let date = segment.trim();
    let date = date.strip_prefix(ADDED_ON).unwrap_or(date).trim();
    date.strip_suffix(ADDED_ON).unwrap_or(date).trim().to_string()
}

// The weekday is discarded, not checked against the date.
pub fn parse_added_on(date: &str) -> Option<NaiveDateTime> {
    let date = strip_weekday(date.trim());

    DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(date, layout).ok())
        .or_else(|| {
            DATE_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDate::parse_from_str(date, layout).ok())
                .and_then(|day| day.and_hms_opt(0, 0, 0))
        })
}

fn strip_weekday(date: &str) -> &str {
    match date.split_once(',') {
        Some((first, rest)) if is_weekday(first) => rest.trim(),
        _ => date,
    }
}

fn is_weekday(word: &str) -> bool {
    WEEKDAYS
        .iter()
        .any(|day| word.trim().eq_ignore_ascii_case(day))
}

// Bounds are inclusive; clippings with an unreadable date are dropped.
pub fn filter_by_date(clippings: Vec<Clipping>, from: NaiveDate, to: NaiveDate) -> Vec<Clipping> {
    clippings
        .into_iter()
        .filter(|c| {
            c.added_on()
                .map(|added| {
                    let day = added.date();
                    day >= from && day <= to
                })
                .unwrap_or(false)
        })
        .collect()
}
