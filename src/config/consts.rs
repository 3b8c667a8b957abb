// src/config/consts.rs

// Sources
pub const CAPACITY_URL: &str = "https://www.ymcacalgary.org/capacity/";
pub const HOURS_URL: &str = "https://www.ymcacalgary.org/faq/";

// Sink
pub const PUSH_URL: &str = "http://localhost:3100/loki/api/v1/push";
pub const JOB_LABEL: &str = "ymca_pools";

// Env
pub const ENV_PUSH_USER: &str = "LOKI_USER";
pub const ENV_PUSH_PASSWORD: &str = "LOKI_PASSWORD";
pub const ENV_CAPACITY_URL: &str = "POOL_CHECK_CAPACITY_URL";
pub const ENV_HOURS_URL: &str = "POOL_CHECK_HOURS_URL";
pub const ENV_PUSH_URL: &str = "POOL_CHECK_PUSH_URL";

// Net
pub const USER_AGENT: &str = concat!("pool_check/", env!("CARGO_PKG_VERSION"));
pub const FETCH_TIMEOUT_SECS: u64 = 15;
pub const PUSH_TIMEOUT_SECS: u64 = 20;
pub const RETRY_TOTAL: u32 = 5;
pub const RETRY_BACKOFF_SECS: f64 = 0.5;
pub const RETRY_BACKOFF_MAX_SECS: f64 = 120.0;
// Statuses that carry Retry-After semantics
pub const RETRY_STATUSES: &[u16] = &[413, 429, 503];

// Page layout
pub const SCRIPT_INDEX: usize = 3; // 4th <script> holds the addClass calls
pub const HOURS_TABLE_INDEX: usize = 1;
pub const NAME_PREFIX_CHARS: usize = 8;
pub const CLOSED_SUNDAY: &str = "closed sunday";

pub const TIMEZONE: chrono_tz::Tz = chrono_tz::America::Edmonton;
