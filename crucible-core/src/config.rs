use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::channel::{Channel, default_channels};
use crate::error::CrucibleError;

/// Default historian zone; the plant historian stores Berlin wall-clock time.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Berlin;
/// Local hour of day at which a new charge is considered started.
pub const DEFAULT_CHARGE_START_HOUR: u32 = 6;
/// Rolling retention horizon for cached rows, in hours.
pub const DEFAULT_RETENTION_HOURS: u32 = 24;
/// Recorded-values requests can be slow when a window spans many hours.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection settings for the PI Web API historian.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorianConfig {
    /// Base URL of the historian host, without the `/piwebapi` suffix.
    /// A trailing slash is tolerated.
    pub base_url: String,
    /// Basic-auth username.
    pub username: String,
    /// Basic-auth password.
    pub password: String,
    /// Zone the historian's timestamps are local to.
    pub timezone: Tz,
    /// Per-request timeout; a timed-out fetch degrades to an empty table.
    pub request_timeout: Duration,
    /// Verify the historian's TLS certificate. Plant deployments commonly
    /// run self-signed, so this defaults to off.
    pub verify_cert: bool,
    /// Channels requested on every fetch; fixed for the lifetime of the
    /// connector.
    pub channels: Vec<Channel>,
}

impl HistorianConfig {
    /// Config for `base_url` with the given credentials and defaults for
    /// everything else.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            timezone: DEFAULT_TIMEZONE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            verify_cert: false,
            channels: default_channels(),
        }
    }

    /// Fail fast on anything that would make every later fetch useless.
    ///
    /// # Errors
    /// `CrucibleError::Config` when the base URL, username, or password is
    /// empty, or when the base URL does not parse as a URL.
    pub fn validate(&self) -> Result<(), CrucibleError> {
        if self.base_url.trim().is_empty() {
            return Err(CrucibleError::config("base_url must be provided"));
        }
        if self.username.is_empty() {
            return Err(CrucibleError::config("username must be provided"));
        }
        if self.password.is_empty() {
            return Err(CrucibleError::config("password must be provided"));
        }
        Url::parse(self.base_url.trim_end_matches('/'))
            .map_err(|e| CrucibleError::config(format!("base_url is not a valid URL: {e}")))?;
        Ok(())
    }
}

/// Settings for the range cache itself.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Zone used to normalize query bounds, compute the charge anchor, and
    /// evaluate the retention horizon.
    pub timezone: Tz,
    /// Rows older than `now - retention_hours` are evicted after each query.
    pub retention_hours: u32,
    /// Local hour seeding the bootstrap window ("yesterday at this hour").
    pub charge_start_hour: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            retention_hours: DEFAULT_RETENTION_HOURS,
            charge_start_hour: DEFAULT_CHARGE_START_HOUR,
        }
    }
}

impl CacheConfig {
    /// Retention horizon as a chrono duration.
    #[must_use]
    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.retention_hours))
    }
}
