// src/emit.rs
//
// Loki push. One stream, one label, one value per facility:
//
//   {"streams":[{"stream":{"job":"ymca_pools"},
//                "values":[["1718226000000000000","{\"name\":…}"], …]}]}

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::consts::PUSH_TIMEOUT_SECS;
use crate::config::options::PushOptions;
use crate::core::net::{HttpClient, Request, Transport};
use crate::data::FacilityRecord;
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricsBatch {
    job: String,
    /// (nanoseconds since epoch, record JSON)
    values: Vec<(String, String)>,
}

#[derive(Serialize)]
struct PushBody<'a> {
    streams: [Stream<'a>; 1],
}

#[derive(Serialize)]
struct Stream<'a> {
    stream: Labels<'a>,
    values: &'a [(String, String)],
}

#[derive(Serialize)]
struct Labels<'a> {
    job: &'a str,
}

impl MetricsBatch {
    pub fn new(job: impl Into<String>) -> Self {
        Self { job: job.into(), values: Vec::new() }
    }

    /// Every record stamped with `at`, in the order given.
    pub fn from_records(job: impl Into<String>, records: &[FacilityRecord], at: DateTime<Utc>) -> Result<Self> {
        let mut batch = Self::new(job);
        for r in records {
            batch.push(r, at)?;
        }
        Ok(batch)
    }

    pub fn push(&mut self, record: &FacilityRecord, at: DateTime<Utc>) -> Result<()> {
        let ns = at.timestamp_nanos_opt().unwrap_or(i64::MAX);
        self.values.push((ns.to_string(), serde_json::to_string(record)?));
        Ok(())
    }

    pub fn job(&self) -> &str {
        &self.job
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Request body for the push endpoint.
    pub fn to_json(&self) -> Result<String> {
        let body = PushBody {
            streams: [Stream { stream: Labels { job: &self.job }, values: &self.values }],
        };
        Ok(serde_json::to_string(&body)?)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PushOutcome {
    /// Nothing to send; no request made.
    Empty,
    /// Credentials not configured; no request made.
    NoCredentials,
    Sent { status: u16 },
    Rejected { status: u16, body: String },
    Failed(String),
}

impl PushOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, PushOutcome::Sent { .. })
    }
}

/// Best effort: every failure is logged and reported back, never raised.
/// Any 2xx counts as accepted.
pub fn push<T: Transport>(client: &HttpClient<T>, opts: &PushOptions, batch: &MetricsBatch) -> PushOutcome {
    if batch.is_empty() {
        logd!("empty batch, nothing to push");
        return PushOutcome::Empty;
    }
    let Some(auth) = opts.auth.as_ref() else {
        loge!("push skipped: push credentials are not set");
        return PushOutcome::NoCredentials;
    };

    let body = match batch.to_json() {
        Ok(b) => b,
        Err(e) => {
            loge!("HTTP error in POST: {e}");
            return PushOutcome::Failed(e.to_string());
        }
    };

    let req = Request::post_json(&opts.url, &body)
        .with_auth(Some(auth))
        .with_timeout(Duration::from_secs(PUSH_TIMEOUT_SECS));

    match client.send(&req) {
        Ok(resp) if resp.is_success() => {
            logf!("pushed {} records ({})", batch.len(), resp.status);
            PushOutcome::Sent { status: resp.status }
        }
        Ok(resp) => {
            loge!("HTTP error in POST: {} {}", resp.status, resp.body);
            PushOutcome::Rejected { status: resp.status, body: resp.body }
        }
        Err(e) => {
            loge!("HTTP error in POST: {e}");
            PushOutcome::Failed(e.to_string())
        }
    }
}
