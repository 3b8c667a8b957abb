// src/core/net.rs
//
// Blocking HTTP with a bounded retry policy. The client is a plain value the
// caller builds and passes down; nothing here is process-global.

use std::{thread, time::Duration};

use chrono::{DateTime, Utc};
use reqwest::header::{CONTENT_TYPE, RETRY_AFTER};

use crate::config::BasicAuth;
use crate::config::consts::{
    FETCH_TIMEOUT_SECS, RETRY_BACKOFF_MAX_SECS, RETRY_BACKOFF_SECS, RETRY_STATUSES, RETRY_TOTAL,
    USER_AGENT,
};
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Clone, Debug)]
pub struct Request<'a> {
    pub method: Method,
    pub url: &'a str,
    /// JSON body, POST only.
    pub body: Option<&'a str>,
    pub auth: Option<&'a BasicAuth>,
    pub timeout: Duration,
}

impl<'a> Request<'a> {
    pub fn get(url: &'a str) -> Self {
        Self {
            method: Method::Get,
            url,
            body: None,
            auth: None,
            timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
        }
    }

    pub fn post_json(url: &'a str, body: &'a str) -> Self {
        Self {
            method: Method::Post,
            url,
            body: Some(body),
            auth: None,
            timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
        }
    }

    pub fn with_auth(mut self, auth: Option<&'a BasicAuth>) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
    /// Server-requested pause from a `Retry-After` header.
    pub retry_after: Option<Duration>,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into(), retry_after: None }
    }

    pub fn with_retry_after(mut self, wait: Option<Duration>) -> Self {
        self.retry_after = wait;
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// `Retry-After` as delta-seconds or an HTTP date. Dates in the past mean no wait.
pub fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let value = value.trim();
    if let Ok(secs) = value.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }
    let at = DateTime::parse_from_rfc2822(value).ok()?;
    Some((at.with_timezone(&Utc) - now).to_std().unwrap_or(Duration::ZERO))
}

/// One attempt at one request. Retrying is the client's job, not the transport's.
pub trait Transport {
    fn send(&self, req: &Request<'_>) -> Result<Response>;
}

pub struct ReqwestTransport {
    inner: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let inner = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Http { url: s!("<client setup>"), source: Box::new(e) })?;
        Ok(Self { inner })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, req: &Request<'_>) -> Result<Response> {
        let http_err = |e: reqwest::Error| Error::Http { url: s!(req.url), source: Box::new(e) };

        let mut builder = match req.method {
            Method::Get => self.inner.get(req.url),
            Method::Post => self.inner.post(req.url),
        }
        .timeout(req.timeout);

        if let Some(body) = req.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_owned());
        }
        if let Some(auth) = req.auth {
            builder = builder.basic_auth(&auth.user, Some(&auth.password));
        }

        let resp = builder.send().map_err(http_err)?;
        let status = resp.status().as_u16();
        let retry_after = resp
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| parse_retry_after(v, Utc::now()));
        let body = resp.text().map_err(http_err)?;
        Ok(Response::new(status, body).with_retry_after(retry_after))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub total: u32,
    pub backoff_factor: Duration,
    pub backoff_max: Duration,
    pub retry_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            total: RETRY_TOTAL,
            backoff_factor: Duration::from_secs_f64(RETRY_BACKOFF_SECS),
            backoff_max: Duration::from_secs_f64(RETRY_BACKOFF_MAX_SECS),
            retry_statuses: RETRY_STATUSES.to_vec(),
        }
    }
}

impl RetryPolicy {
    pub fn is_retryable(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }

    /// Pause before the next attempt, given how many attempts have failed in a row.
    /// The first retry goes out immediately.
    pub fn backoff(&self, consecutive_errors: u32) -> Duration {
        if consecutive_errors <= 1 {
            return Duration::ZERO;
        }
        let exp = 2f64.powi(consecutive_errors.saturating_sub(1).min(63) as i32);
        let secs = (self.backoff_factor.as_secs_f64() * exp).min(self.backoff_max.as_secs_f64());
        Duration::from_secs_f64(secs)
    }

    /// Pause before retrying `resp`: the server's `Retry-After` when given,
    /// capped at `backoff_max`, else the usual backoff.
    pub fn wait_after(&self, resp: &Response, consecutive_errors: u32) -> Duration {
        match resp.retry_after {
            Some(wait) => wait.min(self.backoff_max),
            None => self.backoff(consecutive_errors),
        }
    }
}

pub struct HttpClient<T: Transport = ReqwestTransport> {
    transport: T,
    retry: RetryPolicy,
}

impl HttpClient<ReqwestTransport> {
    /// Real network client with the default retry policy.
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(ReqwestTransport::new()?, RetryPolicy::default()))
    }
}

impl<T: Transport> HttpClient<T> {
    pub fn with_transport(transport: T, retry: RetryPolicy) -> Self {
        Self { transport, retry }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send with retries on transport errors and retryable statuses.
    /// When retries run out the last outcome is returned as is.
    pub fn send(&self, req: &Request<'_>) -> Result<Response> {
        let mut failures = 0u32;
        loop {
            let outcome = self.transport.send(req);
            let retry = match &outcome {
                Ok(resp) => self.retry.is_retryable(resp.status),
                Err(Error::Http { .. }) => true,
                Err(_) => false,
            };
            if !retry || failures >= self.retry.total {
                return outcome;
            }

            failures += 1;
            let wait = match &outcome {
                Ok(resp) => {
                    let wait = self.retry.wait_after(resp, failures);
                    logw!("{} answered {}, retry {failures}/{} in {wait:?}", req.url, resp.status, self.retry.total);
                    wait
                }
                Err(e) => {
                    let wait = self.retry.backoff(failures);
                    logw!("{e}, retry {failures}/{} in {wait:?}", self.retry.total);
                    wait
                }
            };
            if !wait.is_zero() {
                thread::sleep(wait);
            }
        }
    }

    /// GET a page body. Anything but 200 is an error.
    pub fn get_text(&self, url: &str) -> Result<String> {
        let resp = self.send(&Request::get(url))?;
        if resp.status != 200 {
            return Err(Error::Status { url: s!(url), status: resp.status, body: resp.body });
        }
        Ok(resp.body)
    }
}
