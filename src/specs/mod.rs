// src/specs/mod.rs
//! # Page specs
//!
//! One module per remote page. Each spec knows *where the ground truth lives
//! in that page's HTML* and turns it into typed values. Nothing here fetches,
//! logs results, or decides what to do with a failure; that is the runner's job.
//!
//! ## Current specs
//! - `capacity`: facility names from the first table, plus the colour each
//!   one gets from the page's inline script (`#id` → `addClass("…")`).
//! - `hours`: opening hours from the second table of the hours page, matched
//!   to facilities by name prefix.
//!
//! ## Conventions
//! - Specs take the page body as `&str` so they can be tested offline against
//!   captured fixtures.
//! - Structure problems are errors, not empty results. A run either extracts
//!   everything or pushes nothing.
pub mod capacity;
pub mod hours;
