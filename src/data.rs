// src/data.rs
//
// Per-run records. Built fresh on every invocation, never persisted.

use std::{fmt, str::FromStr};

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::error::Error;

/// Occupancy colour as shown on the capacity page.
/// Ordering follows crowding: green < yellow < red.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Green,
    Yellow,
    Red,
}

impl Status {
    /// Numeric level pushed alongside the colour.
    pub fn capacity(self) -> u8 {
        match self {
            Status::Green => 0,
            Status::Yellow => 1,
            Status::Red => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Green => "green",
            Status::Yellow => "yellow",
            Status::Red => "red",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "green" => Ok(Status::Green),
            "yellow" => Ok(Status::Yellow),
            "red" => Ok(Status::Red),
            _ => Err(Error::UnknownStatus(s!(s))),
        }
    }
}

/// One facility's line in the pushed batch.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FacilityRecord {
    pub name: String,
    pub status: Status,
    pub open: bool,
    pub open_time: DateTime<FixedOffset>,
    pub close_time: DateTime<FixedOffset>,
    pub capacity: u8,
}

impl FacilityRecord {
    /// A closed facility always reports red; capacity always tracks status.
    pub fn new(
        name: String,
        scraped: Status,
        open: bool,
        open_time: DateTime<FixedOffset>,
        close_time: DateTime<FixedOffset>,
    ) -> Self {
        let status = if open { scraped } else { Status::Red };
        Self {
            name,
            status,
            open,
            open_time,
            close_time,
            capacity: status.capacity(),
        }
    }
}
