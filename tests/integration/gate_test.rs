//! End-to-end gate tests: generate a link, then walk its landing page.

use std::cell::RefCell;
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use safelink_core::config::{GateConfig, LinkConfig};
use safelink_core::result::AppResult;
use safelink_core::traits::{ManualClock, NavigationMode, Navigator, VerificationOpener};
use safelink_service::gate::{
    GateFailure, GatePhase, PasswordOutcome, RedirectGate, RedirectOutcome, VerifyOutcome,
};
use safelink_service::link::{GenerateLinkRequest, LinkService};

#[derive(Debug, Default)]
struct CountingOpener {
    calls: RefCell<usize>,
}

impl VerificationOpener for CountingOpener {
    fn open(&self, _url: &str) -> AppResult<()> {
        *self.calls.borrow_mut() += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct RecordingNavigator {
    visited: RefCell<Option<(String, NavigationMode)>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str, mode: NavigationMode) -> AppResult<()> {
        *self.visited.borrow_mut() = Some((url.to_string(), mode));
        Ok(())
    }
}

fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
    ))
}

async fn generate(url: &str, password: Option<&str>) -> String {
    let service = LinkService::new(LinkConfig::default(), Arc::default());
    service
        .generate(GenerateLinkRequest {
            url: url.to_string(),
            password: password.map(str::to_string),
            param_name: None,
        })
        .await
        .expect("generate")
        .link
}

fn query_of(link: &str) -> &str {
    link.split_once('?').map(|(_, q)| q).expect("query")
}

#[tokio::test]
async fn test_open_link_end_to_end() {
    let link = generate("https://example.com/landing", None).await;
    let clock = clock();
    let gate = RedirectGate::new(GateConfig::default(), clock.clone());

    let mut session = gate.open_query_string(query_of(&link), false);
    assert_eq!(session.phase(), GatePhase::Counting);

    clock.advance(Duration::seconds(2));
    let frame = gate.tick(&mut session).expect("frame");
    assert_eq!(frame.seconds_left, 3);

    // Redraws may be late; the countdown follows the clock.
    clock.advance(Duration::seconds(10));
    assert!(gate.tick(&mut session).expect("frame").finished);
    assert_eq!(session.phase(), GatePhase::AwaitingVerification);
    assert!(!session.history().contains(&GatePhase::AwaitingPassword));

    let opener = CountingOpener::default();
    assert_eq!(
        gate.trigger_verification(&mut session, &opener),
        VerifyOutcome::Opened
    );
    assert_eq!(
        gate.trigger_verification(&mut session, &opener),
        VerifyOutcome::AlreadyVerified
    );
    assert_eq!(*opener.calls.borrow(), 1);

    let navigator = RecordingNavigator::default();
    assert_eq!(
        gate.redirect(&mut session, &navigator),
        RedirectOutcome::Navigated(NavigationMode::Push)
    );
    assert_eq!(
        navigator.visited.borrow().clone(),
        Some(("https://example.com/landing".to_string(), NavigationMode::Push))
    );
    assert_eq!(session.phase(), GatePhase::Redirected);
}

#[tokio::test]
async fn test_protected_link_end_to_end() {
    let link = generate("https://example.com/members", Some("hunter2")).await;
    let clock = clock();
    let gate = RedirectGate::new(GateConfig::default(), clock.clone());

    let mut session = gate.open_query_string(query_of(&link), true);
    assert!(session.password_required());
    assert_eq!(
        gate.submit_password(&mut session, "hunter2"),
        PasswordOutcome::NotExpected(GatePhase::Counting)
    );

    clock.advance(Duration::seconds(5));
    gate.tick(&mut session);
    assert_eq!(session.phase(), GatePhase::AwaitingPassword);

    assert_eq!(
        gate.submit_password(&mut session, "wrong"),
        PasswordOutcome::Mismatch
    );
    assert_eq!(session.phase(), GatePhase::AwaitingPassword);

    let pending = gate
        .begin_password_check(&mut session, "hunter2")
        .expect("accepted for checking");
    let digest = safelink_auth::PasswordHasher::new()
        .hash_async(pending.into_input())
        .await;
    assert_eq!(
        gate.complete_password_check(&mut session, digest),
        PasswordOutcome::Accepted
    );
    assert_eq!(session.notice(), None);

    gate.trigger_verification(&mut session, &CountingOpener::default());
    assert_eq!(
        gate.redirect(&mut session, &RecordingNavigator::default()),
        RedirectOutcome::Navigated(NavigationMode::Replace)
    );
}

#[test]
fn test_landing_without_token() {
    let gate = RedirectGate::new(GateConfig::default(), clock());
    let session = gate.open_query_string("?utm_source=mail", false);
    assert_eq!(session.phase(), GatePhase::Failed);
    assert_eq!(session.failure(), Some(GateFailure::NoToken));
}

#[test]
fn test_shorter_countdown_from_config() {
    let clock = clock();
    let config = GateConfig {
        countdown_seconds: 1,
        ..GateConfig::default()
    };
    let gate = RedirectGate::new(config, clock.clone());
    let token = legacy_token();
    let mut session = gate.open([("s", token.as_str())], false);
    assert_eq!(session.phase(), GatePhase::Counting);

    clock.advance(Duration::milliseconds(1_000));
    assert!(gate.tick(&mut session).expect("frame").finished);
}

/// A legacy base64 token, as older links carried.
fn legacy_token() -> String {
    "aHR0cHM6Ly9leGFtcGxlLmNvbS9vbGQtbGluaw==".to_string()
}
