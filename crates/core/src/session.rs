//! Browser session lifecycle and the composer seam.
//!
//! [`Composer`] is the surface the posting pipeline drives: authenticate
//! once, then navigate, type and submit per destination. The production
//! implementation is [`BrowserComposer`], backed by a WebDriver-driven
//! browser; tests drive the pipeline through
//! [`FakeComposer`](crate::fake_composer::FakeComposer) instead.
//!
//! A session moves Unopened -> Open (after [`BrowserComposer::open`]) ->
//! Authenticated (after [`Composer::authenticate`]) -> Closed (after
//! [`Composer::close`], which consumes the session). There is no path back
//! from Closed; the next run opens a fresh session.

use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::Key;
use thirtyfour::prelude::*;
use tokio::time::{Instant, sleep};
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::{PostError, Result};
use crate::types::{Credentials, Destination};

/// Upper bound for any single navigation or readiness wait.
pub const NAVIGATION_TIMEOUT_MS: u64 = 60_000;
/// Inter-keystroke delay while typing message content.
pub const TYPE_DELAY_MS: u64 = 5;
/// Inter-keystroke delay while typing credentials.
pub const LOGIN_TYPE_DELAY_MS: u64 = 10;
/// Poll interval for readiness checks bounded by [`NAVIGATION_TIMEOUT_MS`].
const POLL_INTERVAL_MS: u64 = 500;

/// An authenticated automation session viewed as a message composer.
#[async_trait]
pub trait Composer: Send + Sync + Sized {
    /// Logs in and waits for confirmation that the login surface has been
    /// left behind.
    async fn authenticate(&self, credentials: &Credentials) -> Result<()>;

    /// Navigates to the destination and waits for its input surface to
    /// become ready. Returns the destination's address.
    async fn open_destination(&self, destination: &Destination) -> Result<String>;

    /// Types one line of content character-stream-wise.
    async fn type_line(&self, line: &str) -> Result<()>;

    /// Emits a soft line-break keystroke, not a submit.
    async fn soft_line_break(&self) -> Result<()>;

    /// Emits the submit keystroke that finalizes the post.
    async fn submit(&self) -> Result<()>;

    /// Releases all session resources. Called exactly once per session,
    /// on every exit path.
    async fn close(self) -> Result<()>;
}

/// [`Composer`] backed by a real browser behind a WebDriver endpoint.
#[derive(Debug)]
pub struct BrowserComposer {
    driver: WebDriver,
    config: SessionConfig,
}

impl BrowserComposer {
    /// Connects to the configured WebDriver endpoint and applies the
    /// navigation timeout.
    ///
    /// # Errors
    ///
    /// Returns [`PostError::SessionLaunch`] if the endpoint is unreachable
    /// or the browser cannot start.
    pub async fn open(config: &SessionConfig) -> Result<Self> {
        debug!(
            target = "adpost.session",
            endpoint = %config.webdriver_url,
            headless = config.headless,
            "starting browser session"
        );

        let mut caps = DesiredCapabilities::chrome();
        if config.headless {
            caps.set_headless()
                .map_err(|e| PostError::SessionLaunch(e.to_string()))?;
        }

        let driver = WebDriver::new(config.webdriver_url.as_str(), caps)
            .await
            .map_err(|e| PostError::SessionLaunch(e.to_string()))?;
        driver
            .set_page_load_timeout(Duration::from_millis(NAVIGATION_TIMEOUT_MS))
            .await
            .map_err(|e| PostError::SessionLaunch(e.to_string()))?;

        Ok(Self {
            driver,
            config: config.clone(),
        })
    }

    async fn login(&self, credentials: &Credentials) -> Result<()> {
        self.driver.goto(self.config.login_url.as_str()).await?;
        self.wait_for_selector(&self.config.email_selector).await?;

        self.type_into(
            &self.config.email_selector,
            &credentials.email,
            LOGIN_TYPE_DELAY_MS,
        )
        .await?;
        self.type_into(
            &self.config.password_selector,
            &credentials.password,
            LOGIN_TYPE_DELAY_MS,
        )
        .await?;

        self.driver
            .find(By::Css(&self.config.login_submit_selector))
            .await?
            .click()
            .await?;

        self.wait_for_login_navigation().await
    }

    /// Types into the first element matching `selector`, one character per
    /// keystroke with `delay_ms` between keystrokes.
    async fn type_into(&self, selector: &str, text: &str, delay_ms: u64) -> Result<()> {
        let field = self.driver.find(By::Css(selector)).await?;
        for ch in text.chars() {
            field.send_keys(ch.to_string().as_str()).await?;
            sleep(Duration::from_millis(delay_ms)).await;
        }
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str) -> Result<()> {
        let deadline = Instant::now() + Duration::from_millis(NAVIGATION_TIMEOUT_MS);
        loop {
            if self.driver.find(By::Css(selector)).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(PostError::Timeout {
                    ms: NAVIGATION_TIMEOUT_MS,
                    what: format!("selector {selector}"),
                });
            }
            sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
        }
    }

    /// The login surface counts as left behind once the browser URL no
    /// longer points at it.
    async fn wait_for_login_navigation(&self) -> Result<()> {
        let deadline = Instant::now() + Duration::from_millis(NAVIGATION_TIMEOUT_MS);
        loop {
            let url = self.driver.current_url().await?;
            if !url.as_str().starts_with(&self.config.login_url) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(PostError::Timeout {
                    ms: NAVIGATION_TIMEOUT_MS,
                    what: "post-login navigation".into(),
                });
            }
            sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
        }
    }
}

#[async_trait]
impl Composer for BrowserComposer {
    async fn authenticate(&self, credentials: &Credentials) -> Result<()> {
        info!(
            target = "adpost.session",
            url = %self.config.login_url,
            email = %credentials.email,
            "authenticating"
        );

        self.login(credentials).await.map_err(|e| match e {
            PostError::Authentication(_) => e,
            other => PostError::Authentication(other.to_string()),
        })
    }

    async fn open_destination(&self, destination: &Destination) -> Result<String> {
        let address = destination.address(&self.config.base_url);
        debug!(target = "adpost.session", %address, "opening destination");

        self.driver
            .goto(address.as_str())
            .await
            .map_err(|source| PostError::Navigation {
                url: address.clone(),
                source: source.into(),
            })?;
        self.wait_for_selector(&self.config.composer_selector).await?;

        Ok(address)
    }

    async fn type_line(&self, line: &str) -> Result<()> {
        self.type_into(&self.config.composer_selector, line, TYPE_DELAY_MS)
            .await
    }

    async fn soft_line_break(&self) -> Result<()> {
        self.driver
            .action_chain()
            .key_down(Key::Shift)
            .key_down(Key::Enter)
            .key_up(Key::Enter)
            .key_up(Key::Shift)
            .perform()
            .await?;
        Ok(())
    }

    async fn submit(&self) -> Result<()> {
        self.driver
            .action_chain()
            .key_down(Key::Enter)
            .key_up(Key::Enter)
            .perform()
            .await?;
        Ok(())
    }

    async fn close(self) -> Result<()> {
        debug!(target = "adpost.session", "closing browser session");
        self.driver.quit().await?;
        Ok(())
    }
}
