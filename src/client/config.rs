use std::fmt;
use std::time::Duration;

/// Default ESMFold endpoint (synchronous)
pub const DEFAULT_ESMFOLD_URL: &str = "https://health.api.nvidia.com/v1/biology/nvidia/esmfold";
/// Default Boltz-2 endpoint (may defer)
pub const DEFAULT_BOLTZ2_URL: &str =
    "https://health.api.nvidia.com/v1/biology/mit/boltz2/predict";
/// Default status endpoint base; the job id is appended as a path segment
pub const DEFAULT_STATUS_URL: &str = "https://api.nvcf.nvidia.com/v2/nvcf/pexec/status";

/// Bound on every single submit or poll exchange
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(400);
/// Delay between two status queries
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// Server-side long-poll hint sent with every request
pub const DEFAULT_POLL_SECONDS: u32 = 300;

/// Configuration for the invocation client.
///
/// Passed explicitly at construction so tests and callers can inject their own
/// endpoints, credentials and timing.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub esmfold_url: String,
    pub boltz2_url: String,
    pub status_url: String,
    pub request_timeout: Duration,
    pub poll_interval: Duration,
    pub poll_seconds: u32,
    /// Maximum number of status queries per invocation; `None` polls until a terminal status
    pub max_polls: Option<u32>,
    /// Maximum time spent polling per invocation; `None` polls until a terminal status
    pub max_wait: Option<Duration>,
    /// Log raw provider responses at debug level
    pub debug: bool,
}

impl ClientConfig {
    /// Create a config for the hosted endpoints with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            esmfold_url: DEFAULT_ESMFOLD_URL.to_string(),
            boltz2_url: DEFAULT_BOLTZ2_URL.to_string(),
            status_url: DEFAULT_STATUS_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_seconds: DEFAULT_POLL_SECONDS,
            max_polls: None,
            max_wait: None,
            debug: false,
        }
    }

    #[must_use]
    pub fn with_esmfold_url(mut self, url: impl Into<String>) -> Self {
        self.esmfold_url = url.into();
        self
    }

    #[must_use]
    pub fn with_boltz2_url(mut self, url: impl Into<String>) -> Self {
        self.boltz2_url = url.into();
        self
    }

    #[must_use]
    pub fn with_status_url(mut self, url: impl Into<String>) -> Self {
        self.status_url = url.into();
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Opt in to a bound on the number of status queries.
    ///
    /// A bound of zero behaves like one: the first status query is always made.
    #[must_use]
    pub fn with_max_polls(mut self, max_polls: Option<u32>) -> Self {
        self.max_polls = max_polls;
        self
    }

    /// Opt in to a wall-clock bound on polling
    #[must_use]
    pub fn with_max_wait(mut self, max_wait: Option<Duration>) -> Self {
        self.max_wait = max_wait;
        self
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Status endpoint for a deferred job
    #[must_use]
    pub fn status_url_for(&self, job_id: &str) -> String {
        format!("{}/{}", self.status_url.trim_end_matches('/'), job_id)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"[REDACTED]")
            .field("esmfold_url", &self.esmfold_url)
            .field("boltz2_url", &self.boltz2_url)
            .field("status_url", &self.status_url)
            .field("request_timeout", &self.request_timeout)
            .field("poll_interval", &self.poll_interval)
            .field("poll_seconds", &self.poll_seconds)
            .field("max_polls", &self.max_polls)
            .field("max_wait", &self.max_wait)
            .field("debug", &self.debug)
            .finish()
    }
}
