// adpost: posts one piece of operator-supplied content into an ordered list
// of chat destinations through a single browser automation session, and
// reports which destinations succeeded.
//
// The library is the whole engine; the `adpost-cli` crate is a thin
// front end that loads configuration and triggers a run.

pub mod config;
pub mod error;
pub mod fake_composer;
pub mod guard;
pub mod pipeline;
pub mod report;
pub mod session;
pub mod types;

pub use config::{PostConfig, SessionConfig};
pub use error::{PostError, Result};
pub use guard::{RunGuard, RunPermit};
pub use pipeline::Poster;
pub use report::{REPORT_CHUNK_SIZE, chunk};
pub use session::{BrowserComposer, Composer, NAVIGATION_TIMEOUT_MS};
pub use types::{AdContent, Credentials, Destination, SuccessLog};
