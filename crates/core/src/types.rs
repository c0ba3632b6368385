//! Core data types for a posting run.

use serde::Deserialize;

/// One addressable remote location content can be posted to.
///
/// The identifier pair forms the destination's unique address: `server_id`
/// scopes the community, `channel_id` the channel inside it. Destinations
/// come from a static ordered list loaded once per run and are immutable
/// for the run's duration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    #[serde(alias = "guildId")]
    pub server_id: String,
    pub channel_id: String,
}

impl Destination {
    /// Full channel URL under `base_url`.
    pub fn address(&self, base_url: &str) -> String {
        format!(
            "{}/channels/{}/{}",
            base_url.trim_end_matches('/'),
            self.server_id,
            self.channel_id
        )
    }
}

/// Operator-supplied payload for one run.
///
/// Stored verbatim. [`lines`](AdContent::lines) yields the payload split on
/// line breaks so the session can type each line followed by a soft
/// line-break keystroke instead of a literal newline character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdContent {
    text: String,
}

impl AdContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Lines to type, in order. Empty content yields no lines, so the post
    /// degenerates to a single submit keystroke.
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.text.lines()
    }
}

impl From<&str> for AdContent {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for AdContent {
    fn from(text: String) -> Self {
        Self { text }
    }
}

/// Login credentials for the remote service.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

// Keep the password out of logs and error chains.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Ordered record of destination addresses successfully posted to during
/// the current run. Returned by value from each run, never shared across
/// invocations.
pub type SuccessLog = Vec<String>;
