//! Fake composer for testing the posting pipeline without a browser.
//!
//! Records every action the pipeline performs, in call order, and can be
//! scripted to fail authentication, navigation to individual channels, or
//! teardown.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::error::{PostError, Result};
use crate::session::Composer;
use crate::types::{Credentials, Destination};

/// Base URL the fake uses to build destination addresses.
pub const BASE_URL: &str = "https://chat.invalid";

/// The address the fake reports for `destination`.
pub fn address_of(destination: &Destination) -> String {
    destination.address(BASE_URL)
}

/// One recorded pipeline action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Authenticate,
    OpenDestination(String),
    TypeLine(String),
    SoftLineBreak,
    Submit,
    Close,
}

/// In-memory [`Composer`] with scripted failures.
pub struct FakeComposer {
    journal: Arc<Mutex<Vec<Action>>>,
    fail_authentication: bool,
    fail_close: bool,
    failing_channels: HashSet<String>,
    hold_on_authenticate: Option<Arc<Notify>>,
}

impl FakeComposer {
    pub fn new() -> Self {
        Self {
            journal: Arc::new(Mutex::new(Vec::new())),
            fail_authentication: false,
            fail_close: false,
            failing_channels: HashSet::new(),
            hold_on_authenticate: None,
        }
    }

    /// Scripts `authenticate` to fail.
    pub fn fail_authentication(mut self) -> Self {
        self.fail_authentication = true;
        self
    }

    /// Scripts `close` to fail.
    pub fn fail_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    /// Scripts navigation to the given channel to fail.
    pub fn fail_channel(mut self, channel_id: &str) -> Self {
        self.failing_channels.insert(channel_id.to_string());
        self
    }

    /// Parks `authenticate` until `gate` is notified, for tests that need
    /// a run held in flight.
    pub fn hold_on_authenticate(mut self, gate: Arc<Notify>) -> Self {
        self.hold_on_authenticate = Some(gate);
        self
    }

    /// Handle on the recorded action stream; stays valid after `close`.
    pub fn journal(&self) -> Arc<Mutex<Vec<Action>>> {
        Arc::clone(&self.journal)
    }

    fn record(&self, action: Action) {
        self.journal.lock().push(action);
    }
}

impl Default for FakeComposer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Composer for FakeComposer {
    async fn authenticate(&self, _credentials: &Credentials) -> Result<()> {
        self.record(Action::Authenticate);
        if let Some(gate) = &self.hold_on_authenticate {
            gate.notified().await;
        }
        if self.fail_authentication {
            return Err(PostError::Authentication("scripted failure".into()));
        }
        Ok(())
    }

    async fn open_destination(&self, destination: &Destination) -> Result<String> {
        let address = address_of(destination);
        self.record(Action::OpenDestination(address.clone()));
        if self.failing_channels.contains(&destination.channel_id) {
            return Err(PostError::Navigation {
                url: address,
                source: anyhow::anyhow!("scripted navigation failure"),
            });
        }
        Ok(address)
    }

    async fn type_line(&self, line: &str) -> Result<()> {
        self.record(Action::TypeLine(line.to_string()));
        Ok(())
    }

    async fn soft_line_break(&self) -> Result<()> {
        self.record(Action::SoftLineBreak);
        Ok(())
    }

    async fn submit(&self) -> Result<()> {
        self.record(Action::Submit);
        Ok(())
    }

    async fn close(self) -> Result<()> {
        self.record(Action::Close);
        if self.fail_close {
            return Err(PostError::Io(std::io::Error::other(
                "scripted close failure",
            )));
        }
        Ok(())
    }
}
