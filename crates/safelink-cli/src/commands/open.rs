//! Walk a SafeLink's redirect gate in the terminal.
//!
//! Mirrors the landing page: countdown, optional password, verification
//! step, then the redirect.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;

use safelink_auth::PasswordHasher;
use safelink_core::config::AppConfig;
use safelink_core::error::AppError;
use safelink_core::traits::{Navigator, SystemClock, VerificationOpener};
use safelink_service::gate::{
    GatePhase, GateSession, PasswordOutcome, RedirectGate, RedirectOutcome, VerifyOutcome,
};

use crate::output;
use crate::terminal::{PrintOnly, SystemBrowser};

/// Countdown redraw interval.
const REDRAW_INTERVAL: Duration = Duration::from_millis(200);

/// Arguments for the open command
#[derive(Debug, Args)]
pub struct OpenArgs {
    /// Full link, query string, or bare token
    pub link: String,

    /// Print URLs instead of opening a browser
    #[arg(long)]
    pub no_browser: bool,

    /// Treat the visit as coming from another page
    #[arg(long)]
    pub referrer: bool,

    /// Skip the confirmation before the verification step
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute the open command
pub async fn execute(args: &OpenArgs, config: AppConfig) -> Result<(), AppError> {
    let gate = RedirectGate::new(config.gate, Arc::new(SystemClock));
    let hasher = PasswordHasher::new();

    let pairs = super::extract_query_pairs(&args.link);
    let mut session = gate.open(pairs, args.referrer);

    if let Some(failure) = session.failure() {
        return Err(failure.into());
    }

    run_countdown(&gate, &mut session).await;

    if session.phase() == GatePhase::AwaitingPassword {
        prompt_password(&gate, &hasher, &mut session).await?;
    }

    let (opener, navigator): (&dyn VerificationOpener, &dyn Navigator) = if args.no_browser {
        (&PrintOnly, &PrintOnly)
    } else {
        (&SystemBrowser, &SystemBrowser)
    };

    verify(&gate, &mut session, opener, args.yes)?;

    match gate.redirect(&mut session, navigator) {
        RedirectOutcome::Navigated(_) => {
            if !args.no_browser {
                output::print_success("Link ready to access! Opened in your browser.");
            }
            Ok(())
        }
        RedirectOutcome::Refused(refusal) => {
            let notice = session
                .notice()
                .map(|n| n.message())
                .unwrap_or("Redirect refused");
            tracing::debug!(?refusal, "Redirect refused");
            Err(AppError::external_service(notice))
        }
        RedirectOutcome::NotReady(phase) => Err(AppError::internal(format!(
            "Gate not ready to redirect (phase: {phase})"
        ))),
    }
}

async fn run_countdown(gate: &RedirectGate, session: &mut GateSession) {
    while let Some(frame) = gate.tick(session) {
        print!(
            "\r  Please wait {:>2}s [{:<20}]",
            frame.seconds_left,
            "#".repeat((frame.progress_percent / 5.0) as usize)
        );
        let _ = std::io::stdout().flush();

        if frame.finished {
            println!();
            break;
        }
        tokio::time::sleep(REDRAW_INTERVAL).await;
    }
}

async fn prompt_password(
    gate: &RedirectGate,
    hasher: &PasswordHasher,
    session: &mut GateSession,
) -> Result<(), AppError> {
    output::print_warning("This link is password protected");

    loop {
        let input: String = dialoguer::Password::new()
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

        let outcome = match gate.begin_password_check(session, &input) {
            Ok(pending) => {
                let digest = hasher.hash_async(pending.into_input()).await;
                gate.complete_password_check(session, digest)
            }
            Err(outcome) => outcome,
        };

        match outcome {
            PasswordOutcome::Accepted => {
                output::print_success("Password accepted");
                return Ok(());
            }
            PasswordOutcome::Empty | PasswordOutcome::Mismatch | PasswordOutcome::HashFailed => {
                if let Some(notice) = session.notice() {
                    output::print_error(notice.message());
                }
            }
            PasswordOutcome::Busy => {}
            PasswordOutcome::NotExpected(phase) => {
                return Err(AppError::internal(format!(
                    "Gate is not waiting for a password (phase: {phase})"
                )));
            }
        }
    }
}

fn verify(
    gate: &RedirectGate,
    session: &mut GateSession,
    opener: &dyn VerificationOpener,
    assume_yes: bool,
) -> Result<(), AppError> {
    loop {
        if !assume_yes {
            let proceed = dialoguer::Confirm::new()
                .with_prompt("Open the verification page to continue?")
                .default(true)
                .interact()
                .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;
            if !proceed {
                return Err(AppError::validation("Verification skipped; link not opened"));
            }
        }

        match gate.trigger_verification(session, opener) {
            VerifyOutcome::Opened | VerifyOutcome::AlreadyVerified => return Ok(()),
            VerifyOutcome::Blocked => {
                let message = session
                    .notice()
                    .map(|n| n.message())
                    .unwrap_or("Verification failed");
                if assume_yes {
                    return Err(AppError::verification_unavailable(message));
                }
                output::print_error(message);
            }
            VerifyOutcome::NotReady(phase) => {
                return Err(AppError::internal(format!(
                    "Gate not ready for verification (phase: {phase})"
                )));
            }
        }
    }
}
