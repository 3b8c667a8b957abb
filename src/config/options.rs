// src/config/options.rs
use std::fmt;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub sources: SourceOptions,
    pub push: PushOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            sources: SourceOptions::default(),
            push: PushOptions::default(),
        }
    }
}

impl Options {
    /// Read overrides and credentials from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, with an injectable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut opts = Options::default();
        if let Some(url) = get(ENV_CAPACITY_URL) {
            opts.sources.capacity_url = url;
        }
        if let Some(url) = get(ENV_HOURS_URL) {
            opts.sources.hours_url = url;
        }
        if let Some(url) = get(ENV_PUSH_URL) {
            opts.push.url = url;
        }
        opts.push.auth = match (get(ENV_PUSH_USER), get(ENV_PUSH_PASSWORD)) {
            (Some(user), Some(password)) => Some(BasicAuth { user, password }),
            _ => None,
        };
        opts
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceOptions {
    pub capacity_url: String,
    pub hours_url: String,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            capacity_url: s!(CAPACITY_URL),
            hours_url: s!(HOURS_URL),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PushOptions {
    pub url: String,
    pub job: String,
    pub auth: Option<BasicAuth>,
}

impl Default for PushOptions {
    fn default() -> Self {
        Self {
            url: s!(PUSH_URL),
            job: s!(JOB_LABEL),
            auth: None,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub user: String,
    pub password: String,
}

// Keep the password out of debug logs
impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}
