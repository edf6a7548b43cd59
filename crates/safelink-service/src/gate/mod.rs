//! Landing-side redirect gate.
//!
//! A [`GateSession`] holds the state of one page load. It is only ever
//! changed through [`RedirectGate`] methods, which enforce the countdown,
//! the optional password, and the verification step before navigating.

pub mod countdown;
pub mod machine;
pub mod outcome;
pub mod session;

pub use countdown::{Countdown, CountdownFrame};
pub use machine::{RedirectGate, token_from_query};
pub use outcome::{
    PasswordOutcome, PendingPasswordCheck, RedirectOutcome, RedirectRefusal, VerifyOutcome,
};
pub use session::{GateFailure, GateNotice, GatePhase, GateSession};
