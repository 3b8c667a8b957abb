// src/runner.rs
//
// One run: fetch both pages, extract, check hours, push. Extraction is all or
// nothing; pushing is best effort. Nothing here ends the process.

use chrono::{DateTime, TimeZone, Utc};

use crate::{
    config::{Options, consts::TIMEZONE, options::SourceOptions},
    core::net::{HttpClient, Transport},
    data::FacilityRecord,
    emit::{self, MetricsBatch, PushOutcome},
    error::{Error, Result},
    specs::{capacity, hours},
};

/// What a run produced.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub records: Vec<FacilityRecord>,
    pub push: PushOutcome,
}

/// Top-level runner. `now` is taken by the caller so runs are reproducible.
pub fn run<T: Transport>(client: &HttpClient<T>, opts: &Options, now: DateTime<Utc>) -> RunSummary {
    let local = now.with_timezone(&TIMEZONE);

    let records = match collect(client, &opts.sources, &local) {
        Ok(records) => records,
        Err(e @ (Error::Http { .. } | Error::Status { .. })) => {
            loge!("HTTP error in GET: {e}");
            Vec::new()
        }
        Err(e) => {
            loge!("scrape failed: {e}");
            Vec::new()
        }
    };

    let batch = match MetricsBatch::from_records(opts.push.job.as_str(), &records, now) {
        Ok(batch) => batch,
        Err(e) => {
            loge!("could not build batch: {e}");
            MetricsBatch::new(opts.push.job.as_str())
        }
    };

    let push = emit::push(client, &opts.push, &batch);
    RunSummary { records, push }
}

/// Fetch and extract every facility, or fail as a whole.
pub fn collect<T, Tz>(client: &HttpClient<T>, sources: &SourceOptions, now: &DateTime<Tz>) -> Result<Vec<FacilityRecord>>
where
    T: Transport,
    Tz: TimeZone,
{
    let capacity_page = client.get_text(&sources.capacity_url)?;
    let hours_page = client.get_text(&sources.hours_url)?;
    build_records(&capacity_page, &hours_page, now)
}

/// Pure part of a run: two page bodies and a clock in, records out.
pub fn build_records<Tz: TimeZone>(capacity_page: &str, hours_page: &str, now: &DateTime<Tz>) -> Result<Vec<FacilityRecord>> {
    let facilities = capacity::extract(capacity_page)?;
    let rows = hours::read_rows(hours_page)?;

    facilities
        .into_iter()
        .map(|f| -> Result<FacilityRecord> {
            let state = hours::schedule_for(&rows, &f.name)?.evaluate(now)?;
            if !state.open {
                logd!("{} is closed ({} to {})", f.name, state.open_at, state.close_at);
            }
            Ok(FacilityRecord::new(f.name, f.status, state.open, state.open_at, state.close_at))
        })
        .collect()
}
