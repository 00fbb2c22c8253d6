use chrono::NaiveDateTime;
use serde::Serialize;

use crate::parser::parse_added_on;

pub const CSV_HEADER: [&str; 6] = [
    "title_author",
    "page",
    "start_location",
    "end_location",
    "date",
    "text",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Clipping {
    pub title_author: Option<String>,
    // Numbers that do not fit a u32 are None. An unreadable start also drops
    // the end, so end_location is only ever set alongside start_location.
    pub page: Option<u32>,
    pub start_location: Option<u32>,
    pub end_location: Option<u32>,
    pub date: Option<String>,
    pub text: Option<String>,
}

impl Clipping {
    pub fn added_on(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_added_on)
    }
}
