//! The posting pipeline: one run across an ordered destination list.
//!
//! A run authenticates once, posts the content into every destination in
//! list order, and reports which addresses succeeded. Failure handling is
//! two-tiered: launch and authentication failures abort the run before any
//! destination is attempted, while a failure at a single destination is
//! logged and skipped. The session is torn down on every exit path.

use tracing::{info, warn};

use crate::config::PostConfig;
use crate::error::{PostError, Result};
use crate::guard::{RunGuard, RunPermit};
use crate::session::{BrowserComposer, Composer};
use crate::types::{AdContent, Credentials, Destination, SuccessLog};

/// Coordinates posting runs and enforces that at most one is in flight.
///
/// The run guard lives on the coordinator, not in global state; callers
/// share one `Poster` (typically behind an `Arc`) to share the admission
/// control.
#[derive(Debug, Default)]
pub struct Poster {
    guard: RunGuard,
}

impl Poster {
    pub const fn new() -> Self {
        Self {
            guard: RunGuard::new(),
        }
    }

    /// True while a run is in flight.
    pub fn is_running(&self) -> bool {
        self.guard.is_running()
    }

    /// Runs one end-to-end posting pass: launch, authenticate, post to
    /// every configured destination in order, tear down.
    ///
    /// Returns the addresses that were posted to successfully; a
    /// destination that failed is simply absent from the log.
    ///
    /// # Errors
    ///
    /// - [`PostError::AlreadyRunning`] if another run is active.
    /// - [`PostError::SessionLaunch`] if the browser session cannot start.
    /// - [`PostError::Authentication`] if login does not complete.
    pub async fn run(&self, config: &PostConfig, content: &AdContent) -> Result<SuccessLog> {
        let permit = self.guard.try_acquire().ok_or(PostError::AlreadyRunning)?;
        let session = BrowserComposer::open(&config.session).await?;
        drive(
            permit,
            session,
            &config.credentials,
            content,
            &config.destinations,
        )
        .await
    }

    /// Same as [`run`](Poster::run), over a session the caller has already
    /// opened. The session is consumed and closed either way.
    pub async fn run_with<C: Composer>(
        &self,
        session: C,
        credentials: &Credentials,
        content: &AdContent,
        destinations: &[Destination],
    ) -> Result<SuccessLog> {
        let permit = self.guard.try_acquire().ok_or(PostError::AlreadyRunning)?;
        drive(permit, session, credentials, content, destinations).await
    }
}

/// Runs the authenticated pass and guarantees the session is closed and
/// the permit released on every exit path.
async fn drive<C: Composer>(
    permit: RunPermit<'_>,
    session: C,
    credentials: &Credentials,
    content: &AdContent,
    destinations: &[Destination],
) -> Result<SuccessLog> {
    let outcome = post_all(&session, credentials, content, destinations).await;

    if let Err(err) = session.close().await {
        warn!(target = "adpost.pipeline", error = %err, "failed to close browser session");
    }
    drop(permit);

    outcome
}

async fn post_all<C: Composer>(
    session: &C,
    credentials: &Credentials,
    content: &AdContent,
    destinations: &[Destination],
) -> Result<SuccessLog> {
    session.authenticate(credentials).await?;

    let mut sent = SuccessLog::new();
    let mut failed = 0usize;

    for destination in destinations {
        match post_one(session, content, destination).await {
            Ok(address) => sent.push(address),
            Err(err) => {
                failed += 1;
                warn!(
                    target = "adpost.pipeline",
                    server = %destination.server_id,
                    channel = %destination.channel_id,
                    error = %err,
                    "posting failed, continuing with next destination"
                );
            }
        }
    }

    info!(
        target = "adpost.pipeline",
        sent = sent.len(),
        failed,
        "run complete"
    );
    Ok(sent)
}

/// Posts the content into a single destination: navigate, type each line
/// followed by a soft line break, then submit.
async fn post_one<C: Composer>(
    session: &C,
    content: &AdContent,
    destination: &Destination,
) -> Result<String> {
    let address = session.open_destination(destination).await?;

    for line in content.lines() {
        session.type_line(line).await?;
        session.soft_line_break().await?;
    }
    session.submit().await?;

    Ok(address)
}
