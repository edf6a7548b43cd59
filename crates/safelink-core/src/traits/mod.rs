//! Collaborator traits defined in `safelink-core` and implemented by the
//! CLI, the HTTP layer, and tests.

pub mod clock;
pub mod collaborator;

pub use clock::{Clock, ManualClock, SystemClock};
pub use collaborator::{Clipboard, NavigationMode, Navigator, VerificationOpener};
