//! Review session state for change-detection samples.
//!
//! The session owns the identifier list, the cursor and the flagged set, and
//! mediates every durable side effect (progress file, error log, screenshots).
//! Nothing in this module depends on the windowing layer.

mod error;
/// Intents dispatched from the UI into the session.
pub mod intent;
/// Dataset folder conventions and identifier listing.
pub mod layout;
mod session;
/// Progress file and error log persistence.
pub mod storage;

pub use error::ReviewError;
pub use intent::ReviewIntent;
pub use layout::{DatasetLayout, PanelRole};
pub use session::{FlagOutcome, Session};
