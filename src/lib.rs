// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod data;
pub mod emit;
pub mod error;
pub mod runner;
pub mod schedule;
pub mod specs;

pub use data::{FacilityRecord, Status};
pub use error::{Error, Result};
