use thiserror::Error;

pub type Result<T> = std::result::Result<T, PostError>;

#[derive(Debug, Error)]
pub enum PostError {
    /// A run was requested while another is active. This is an expected
    /// rejection, not a failure; the caller should tell the operator to
    /// wait and try again.
    #[error("a posting run is already in progress")]
    AlreadyRunning,

    /// The browser automation session could not be started. Fatal to the
    /// run; no destination is attempted.
    #[error("failed to launch browser session: {0}")]
    SessionLaunch(String),

    /// Login did not complete within the navigation timeout. Fatal to the
    /// run; no destination is attempted.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Navigation to a single destination failed. Recovered inside the
    /// posting loop; the destination is skipped.
    #[error("navigation to {url} failed: {source}")]
    Navigation { url: String, source: anyhow::Error },

    #[error("timed out after {ms}ms waiting for {what}")]
    Timeout { ms: u64, what: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PostError {
    /// True for errors that abort the whole run before any destination is
    /// attempted, as opposed to per-destination failures.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PostError::SessionLaunch(_) | PostError::Authentication(_)
        )
    }
}
