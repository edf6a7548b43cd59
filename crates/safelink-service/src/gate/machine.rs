//! Redirect gate transitions.

use std::sync::Arc;

use tracing::{info, warn};

use safelink_auth::password::PasswordHasher;
use safelink_core::config::GateConfig;
use safelink_core::traits::{Clock, NavigationMode, Navigator, VerificationOpener};

use super::countdown::{Countdown, CountdownFrame};
use super::outcome::{
    DigestResult, PasswordOutcome, PendingPasswordCheck, RedirectOutcome, RedirectRefusal,
    VerifyOutcome,
};
use super::session::{GateFailure, GateNotice, GatePhase, GateSession};
use crate::link::codec::PayloadCodec;
use crate::validation::check_public_http_url;

/// Drives [`GateSession`]s from landing to redirect.
///
/// Holds only configuration and collaborators; all per-visit state lives
/// in the session, so one gate can serve any number of visits.
#[derive(Debug, Clone)]
pub struct RedirectGate {
    /// Gate configuration.
    config: GateConfig,
    /// Time source for the countdown.
    clock: Arc<dyn Clock>,
    /// Token codec.
    codec: PayloadCodec,
    /// Password hasher for synchronous submissions.
    hasher: PasswordHasher,
}

impl RedirectGate {
    /// Creates a new redirect gate.
    pub fn new(config: GateConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            codec: PayloadCodec::new(),
            hasher: PasswordHasher::new(),
        }
    }

    /// Gate configuration in use.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Start a session from a raw query string such as `?url=...&x=1`.
    pub fn open_query_string(&self, query: &str, has_referrer: bool) -> GateSession {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        self.open(pairs, has_referrer)
    }

    /// Start a session from decoded query pairs.
    ///
    /// The token is picked by [`token_from_query`].
    pub fn open<I, K, V>(&self, pairs: I, has_referrer: bool) -> GateSession
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let pairs: Vec<(K, V)> = pairs.into_iter().collect();
        let mut session = GateSession::new(has_referrer);

        let Some(token) = token_from_query(&self.config.accepted_params, &pairs) else {
            session.fail(GateFailure::NoToken);
            return session;
        };

        let decoded = match self.codec.decode(token) {
            Ok(decoded) => decoded,
            Err(_) => {
                session.fail(GateFailure::DecodeFailed);
                return session;
            }
        };

        if let Err(rejection) = check_public_http_url(&decoded.payload.url) {
            info!(reason = rejection.code(), "Decoded target rejected");
            session.fail(GateFailure::InvalidTarget);
            return session;
        }

        session.target_url = Some(decoded.payload.url);
        session.required_password_hash = decoded.payload.password_hash;
        session.countdown = Some(Countdown::start(self.clock.now(), self.config.countdown()));
        session.enter(GatePhase::Counting);

        info!(
            tier = ?decoded.tier,
            password_required = session.password_required(),
            has_referrer,
            "Gate opened"
        );

        session
    }

    /// Redraw the countdown. `None` outside [`GatePhase::Counting`].
    ///
    /// When the countdown reaches zero the session moves to the password
    /// prompt, or straight to verification for open links.
    pub fn tick(&self, session: &mut GateSession) -> Option<CountdownFrame> {
        if session.phase != GatePhase::Counting {
            return None;
        }

        let frame = session.countdown?.frame(self.clock.now());
        if frame.finished {
            let next = if session.password_required() {
                GatePhase::AwaitingPassword
            } else {
                GatePhase::AwaitingVerification
            };
            session.enter(next);
        }
        Some(frame)
    }

    /// Check a password in one step, hashing on the caller's thread.
    pub fn submit_password(&self, session: &mut GateSession, input: &str) -> PasswordOutcome {
        match self.begin_password_check(session, input) {
            Ok(pending) => {
                let digest = self.hasher.hash(Some(pending.input()));
                self.complete_password_check(session, Ok(digest))
            }
            Err(outcome) => outcome,
        }
    }

    /// Accept a submission for checking.
    ///
    /// On success the session is marked busy until
    /// [`complete_password_check`](Self::complete_password_check) runs;
    /// further submissions get [`PasswordOutcome::Busy`].
    pub fn begin_password_check(
        &self,
        session: &mut GateSession,
        input: &str,
    ) -> Result<PendingPasswordCheck, PasswordOutcome> {
        if session.phase != GatePhase::AwaitingPassword {
            return Err(PasswordOutcome::NotExpected(session.phase));
        }
        if session.password_check_in_flight {
            return Err(PasswordOutcome::Busy);
        }
        if input.is_empty() {
            session.notice = Some(GateNotice::EnterPassword);
            return Err(PasswordOutcome::Empty);
        }

        session.password_check_in_flight = true;
        Ok(PendingPasswordCheck {
            input: input.to_string(),
        })
    }

    /// Finish a check started with
    /// [`begin_password_check`](Self::begin_password_check).
    pub fn complete_password_check(
        &self,
        session: &mut GateSession,
        result: DigestResult,
    ) -> PasswordOutcome {
        if session.phase != GatePhase::AwaitingPassword {
            return PasswordOutcome::NotExpected(session.phase);
        }
        session.password_check_in_flight = false;

        let digest = match result {
            Ok(digest) => digest,
            Err(e) => {
                warn!(error = %e, "Password digest failed");
                session.notice = Some(GateNotice::HashFailed);
                return PasswordOutcome::HashFailed;
            }
        };

        let matched = match (&session.required_password_hash, &digest) {
            (Some(expected), Some(actual)) => actual.matches(expected),
            (None, _) => true,
            (Some(_), None) => false,
        };

        if !matched {
            info!("Gate password mismatch");
            session.notice = Some(GateNotice::IncorrectPassword);
            return PasswordOutcome::Mismatch;
        }

        session.notice = None;
        session.enter(GatePhase::AwaitingVerification);
        PasswordOutcome::Accepted
    }

    /// Open the verification resource, once per session.
    pub fn trigger_verification(
        &self,
        session: &mut GateSession,
        opener: &dyn VerificationOpener,
    ) -> VerifyOutcome {
        if session.verified {
            return VerifyOutcome::AlreadyVerified;
        }
        if session.phase != GatePhase::AwaitingVerification {
            return VerifyOutcome::NotReady(session.phase);
        }

        match opener.open(&self.config.verification_url) {
            Ok(()) => {
                info!("Gate verification opened");
                session.verified = true;
                session.notice = None;
                session.enter(GatePhase::ReadyToRedirect);
                VerifyOutcome::Opened
            }
            Err(e) => {
                warn!(error = %e, "Verification resource did not open");
                session.notice = Some(GateNotice::AllowPopups);
                VerifyOutcome::Blocked
            }
        }
    }

    /// Navigate to the destination.
    ///
    /// Requires a destination, a completed verification, and a destination
    /// that still passes the URL checks, reported in that order.
    pub fn redirect(&self, session: &mut GateSession, navigator: &dyn Navigator) -> RedirectOutcome {
        if session.phase.is_terminal() {
            return RedirectOutcome::NotReady(session.phase);
        }

        let Some(target) = session.target_url.clone() else {
            return refuse(session, RedirectRefusal::NoTarget, GateNotice::NoTarget);
        };
        if !session.verified {
            return refuse(session, RedirectRefusal::NotVerified, GateNotice::NotVerified);
        }
        if let Err(rejection) = check_public_http_url(&target) {
            warn!(reason = rejection.code(), "Redirect target rejected");
            return refuse(session, RedirectRefusal::InvalidTarget, GateNotice::InvalidTarget);
        }

        let mode = if session.has_referrer {
            NavigationMode::Replace
        } else {
            NavigationMode::Push
        };

        match navigator.navigate(&target, mode) {
            Ok(()) => {
                info!(mode = ?mode, "Redirected");
                session.notice = None;
                session.enter(GatePhase::Redirected);
                RedirectOutcome::Navigated(mode)
            }
            Err(e) => {
                warn!(error = %e, "Navigation failed");
                refuse(
                    session,
                    RedirectRefusal::NavigationFailed,
                    GateNotice::NavigationFailed,
                )
            }
        }
    }
}

/// First non-empty value among `accepted_params`, checked in order.
///
/// Only the first occurrence of each name counts, so `?url=&url=x` has no
/// token under `url`.
pub fn token_from_query<'a, K, V>(accepted_params: &[String], pairs: &'a [(K, V)]) -> Option<&'a str>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    accepted_params.iter().find_map(|name| {
        pairs
            .iter()
            .find(|(key, _)| key.as_ref() == name.as_str())
            .map(|(_, value)| value.as_ref())
            .filter(|value| !value.is_empty())
    })
}

fn refuse(session: &mut GateSession, refusal: RedirectRefusal, notice: GateNotice) -> RedirectOutcome {
    session.notice = Some(notice);
    RedirectOutcome::Refused(refusal)
}
