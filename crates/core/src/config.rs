//! Static run configuration: session settings, credentials, destinations.
//!
//! Loaded once per run and read-only to the pipeline. The on-disk layout
//! mirrors the deployment split: one file with session settings and
//! credentials, and an ordered destination list either inline or in its
//! own file.

use std::path::Path;

use serde::Deserialize;

use crate::error::{PostError, Result};
use crate::types::{Credentials, Destination};

/// Browser session settings consumed by
/// [`BrowserComposer::open`](crate::session::BrowserComposer::open).
///
/// The selector and URL defaults target the stock Discord web client; a
/// deployment can retarget any of them without code changes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    /// WebDriver endpoint the browser is driven through.
    pub webdriver_url: String,
    pub headless: bool,
    /// Service root used to build destination addresses.
    pub base_url: String,
    pub login_url: String,
    pub email_selector: String,
    pub password_selector: String,
    pub login_submit_selector: String,
    /// The message input surface that must be ready before typing.
    pub composer_selector: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".into(),
            headless: true,
            base_url: "https://discord.com".into(),
            login_url: "https://discord.com/login".into(),
            email_selector: r#"input[name="email"]"#.into(),
            password_selector: r#"input[name="password"]"#.into(),
            login_submit_selector: r#"button[type="submit"]"#.into(),
            composer_selector: r#"div[role="textbox"]"#.into(),
        }
    }
}

/// Everything one posting run needs, minus the content itself.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostConfig {
    #[serde(default)]
    pub session: SessionConfig,
    pub credentials: Credentials,
    #[serde(default)]
    pub destinations: Vec<Destination>,
}

impl PostConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Replaces the destination list with one loaded from its own file.
    pub fn load_destinations(&mut self, path: &Path) -> Result<()> {
        let raw = std::fs::read_to_string(path)?;
        self.destinations = serde_json::from_str(&raw)?;
        Ok(())
    }

    /// Rejects configurations that cannot possibly authenticate. An empty
    /// destination list is allowed; such a run completes trivially.
    pub fn validate(&self) -> Result<()> {
        if self.credentials.email.is_empty() || self.credentials.password.is_empty() {
            return Err(PostError::Config(
                "credentials.email and credentials.password must be set".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn minimal_config_uses_session_defaults() {
        let config: PostConfig = serde_json::from_str(
            r#"{"credentials": {"email": "ops@example.com", "password": "hunter2"}}"#,
        )
        .unwrap();

        assert_eq!(config.session.webdriver_url, "http://localhost:9515");
        assert_eq!(config.session.login_url, "https://discord.com/login");
        assert_eq!(config.session.composer_selector, r#"div[role="textbox"]"#);
        assert!(config.session.headless);
        assert!(config.destinations.is_empty());
        config.validate().unwrap();
    }

    #[test]
    fn inline_destinations_preserve_order() {
        let config: PostConfig = serde_json::from_str(
            r#"{
                "credentials": {"email": "e", "password": "p"},
                "destinations": [
                    {"serverId": "1", "channelId": "10"},
                    {"serverId": "2", "channelId": "20"}
                ]
            }"#,
        )
        .unwrap();

        let channels: Vec<&str> = config
            .destinations
            .iter()
            .map(|d| d.channel_id.as_str())
            .collect();
        assert_eq!(channels, vec!["10", "20"]);
    }

    #[test]
    fn empty_credentials_fail_validation() {
        let config: PostConfig =
            serde_json::from_str(r#"{"credentials": {"email": "", "password": ""}}"#).unwrap();
        assert!(matches!(config.validate(), Err(PostError::Config(_))));
    }

    #[test]
    fn destinations_load_from_separate_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"guildId": "7", "channelId": "70"}}, {{"guildId": "8", "channelId": "80"}}]"#
        )
        .unwrap();

        let mut config: PostConfig =
            serde_json::from_str(r#"{"credentials": {"email": "e", "password": "p"}}"#).unwrap();
        config.load_destinations(file.path()).unwrap();

        assert_eq!(config.destinations.len(), 2);
        assert_eq!(config.destinations[0].server_id, "7");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = PostConfig::from_file(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(matches!(err, PostError::Io(_)));
    }
}
