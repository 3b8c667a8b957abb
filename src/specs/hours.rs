// src/specs/hours.rs
//! Scraping *spec* for the hours page.
//!
//! Purpose:
//! - Read the **second table** of the hours page: one row per facility, with a
//!   label cell and day-group cells (Mon–Fri, Saturday, optionally Sunday).
//! - Match rows to facilities by the first 8 characters of the facility name.
//!
//! Sunday:
//! - Row mentions "Closed Sunday" → closed all day.
//! - Otherwise Sunday keeps Saturday's hours. A third day-group cell, when the
//!   page has one, is never read as hours.

use scraper::Html;

use crate::config::consts::{CLOSED_SUNDAY, HOURS_TABLE_INDEX, NAME_PREFIX_CHARS};
use crate::core::html;
use crate::core::sanitize::{char_prefix, contains_ci};
use crate::error::{Error, Result};
use crate::schedule::{WeekSchedule, Window};

/// Raw text of one hours row, before any time parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoursRow {
    pub label: String,
    pub cells: Vec<String>,
}

impl HoursRow {
    fn mentions_closed_sunday(&self) -> bool {
        contains_ci(&self.label, CLOSED_SUNDAY) || self.cells.iter().any(|c| contains_ci(c, CLOSED_SUNDAY))
    }

    /// Day-group cells → three windows.
    pub fn schedule(&self) -> Result<WeekSchedule> {
        let day_cell = |i: usize| {
            self.cells
                .get(i)
                .map(|c| strip_ci(c, CLOSED_SUNDAY))
                .ok_or_else(|| Error::Hours(format!("{}: missing day group {i}", self.label)))
        };

        let weekday = Window::parse(&day_cell(0)?)?;
        let saturday = Window::parse(&day_cell(1)?)?;
        let sunday = if self.mentions_closed_sunday() { Window::CLOSED } else { saturday };
        Ok(WeekSchedule::new(weekday, saturday, sunday))
    }
}

/// Every row of the hours table that has a label and at least one day group.
pub fn read_rows(page: &str) -> Result<Vec<HoursRow>> {
    let doc = Html::parse_document(page);
    let table = html::nth_table(&doc, HOURS_TABLE_INDEX)
        .ok_or_else(|| Error::structure("hours table not found"))?;

    let rows = html::all_rows(table)
        .into_iter()
        .filter_map(|row| {
            let mut cells = html::cells(row).into_iter().map(html::text);
            let label = cells.next()?;
            let cells: Vec<String> = cells.collect();
            if cells.is_empty() { None } else { Some(HoursRow { label, cells }) }
        })
        .collect();
    Ok(rows)
}

/// The one row whose label contains the facility's name prefix.
/// More than one match is reported, not guessed at.
pub fn row_for<'a>(rows: &'a [HoursRow], name: &str) -> Result<&'a HoursRow> {
    let prefix = char_prefix(name, NAME_PREFIX_CHARS);
    let mut hits = rows.iter().filter(|r| r.label.contains(prefix));
    match (hits.next(), hits.next()) {
        (Some(row), None) => Ok(row),
        (None, _) => Err(Error::MissingSchedule(s!(name))),
        (Some(_), Some(_)) => Err(Error::AmbiguousSchedule(s!(name))),
    }
}

pub fn schedule_for(rows: &[HoursRow], name: &str) -> Result<WeekSchedule> {
    row_for(rows, name)?.schedule()
}

/// Drop every case-insensitive occurrence of `needle`.
fn strip_ci(haystack: &str, needle: &str) -> String {
    let lower = haystack.to_ascii_lowercase();
    let needle = needle.to_ascii_lowercase();
    let mut out = String::with_capacity(haystack.len());
    let mut pos = 0;
    while let Some(off) = lower[pos..].find(&needle) {
        out.push_str(&haystack[pos..pos + off]);
        pos += off + needle.len();
    }
    out.push_str(&haystack[pos..]);
    out.trim().to_string()
}
