// tests/lifecycle.rs
mod common;
use crate::common::{init_tracing, with_timeout, TestResult};

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use sitewatch::fs::mock::MockFileSystem;
use sitewatch::logging::Diagnostics;
use sitewatch::shutdown::ShutdownSignal;
use sitewatch::types::ChangeBatch;
use sitewatch::watch::{LifecycleState, WatchLifecycle, WatchOutcome, METADATA_FILE};
use sitewatch_test_utils::builders::WatchConfigBuilder;
use sitewatch_test_utils::fake_subscriber::FakeSubscriber;
use sitewatch_test_utils::recording_site::RecordingSite;

fn site_fs() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_dir("/s");
    fs.add_dir("/s/_site");
    fs
}

fn change(path: &str) -> ChangeBatch {
    ChangeBatch::new(vec![PathBuf::from(path)], vec![], vec![])
}

#[tokio::test]
async fn blocks_until_interrupted_then_stops_subscription() -> TestResult {
    init_tracing();

    let fs = site_fs();
    let subscriber = FakeSubscriber::new();
    let site = RecordingSite::new("/s");
    site.fail_next("broken layout");
    let probe = site.clone();

    let cfg = WatchConfigBuilder::new("/s").force_polling(true).build();
    let lifecycle = WatchLifecycle::new(cfg, Diagnostics::default());

    let (trigger, signal) = ShutdownSignal::manual();
    let installed = AtomicBool::new(false);

    let watching = lifecycle.watch(Box::new(site), &fs, &subscriber, || {
        installed.store(true, Ordering::SeqCst);
        signal
    });

    let driver = async {
        tokio::task::yield_now().await;
        // A failing rebuild must not end the session.
        assert!(subscriber.emit(change("/s/index.md")));
        assert!(subscriber.emit(change("/s/about.md")));
        trigger.trigger();
    };

    let (outcome, ()) = with_timeout(async { tokio::join!(watching, driver) }).await;

    assert!(matches!(outcome?, WatchOutcome::Halted));
    assert!(installed.load(Ordering::SeqCst));
    assert!(subscriber.is_stopped());
    assert_eq!(probe.calls(), 2);

    let request = subscriber.last_request().expect("subscribed");
    assert_eq!(request.roots.as_slice(), &[PathBuf::from("/s")]);
    assert_eq!(request.source, PathBuf::from("/s"));
    assert!(request.force_polling);
    assert_eq!(request.ignore.prefixes(), vec!["_site/", METADATA_FILE]);
    Ok(())
}

#[tokio::test]
async fn serving_mode_returns_immediately_without_trapping_interrupts() -> TestResult {
    init_tracing();

    let fs = site_fs();
    let subscriber = FakeSubscriber::new();
    let site = RecordingSite::new("/s");
    let probe = site.clone();

    let cfg = WatchConfigBuilder::new("/s").serving(true).build();
    let outcome = with_timeout(WatchLifecycle::new(cfg, Diagnostics::default()).watch(
        Box::new(site),
        &fs,
        &subscriber,
        || -> ShutdownSignal { panic!("serving mode must not install an interrupt handler") },
    ))
    .await?;

    let WatchOutcome::Serving(mut session) = outcome else {
        panic!("expected the running session back");
    };
    assert_eq!(session.state(), LifecycleState::Watching);

    assert!(subscriber.emit(change("/s/index.md")));
    assert_eq!(probe.calls(), 1);

    session.stop();
    assert_eq!(session.state(), LifecycleState::Stopped);
    assert!(subscriber.is_stopped());
    assert!(!subscriber.emit(change("/s/index.md")));
    assert_eq!(probe.calls(), 1);
    Ok(())
}

#[test]
fn vendored_theme_is_not_watched_but_local_theme_is() -> TestResult {
    init_tracing();

    let fs = site_fs();

    let subscriber = FakeSubscriber::new();
    let vendored = RecordingSite::new("/s")
        .with_theme("plain", Some(PathBuf::from("/s/vendor/bundle/gems/plain")));
    let mut lifecycle = WatchLifecycle::new(WatchConfigBuilder::new("/s").build(), Diagnostics::default());
    lifecycle.start(Box::new(vendored), &fs, &subscriber)?;
    assert_eq!(lifecycle.watch_roots().as_slice(), &[PathBuf::from("/s")]);
    lifecycle.stop();

    let subscriber = FakeSubscriber::new();
    let local = RecordingSite::new("/s")
        .with_theme("plain", Some(PathBuf::from("/s/themes/plain")));
    let mut lifecycle = WatchLifecycle::new(WatchConfigBuilder::new("/s").build(), Diagnostics::default());
    lifecycle.start(Box::new(local), &fs, &subscriber)?;
    assert_eq!(
        lifecycle.watch_roots().as_slice(),
        &[PathBuf::from("/s"), PathBuf::from("/s/themes/plain")]
    );
    lifecycle.stop();
    Ok(())
}

#[test]
fn site_config_watch_dirs_become_roots() -> TestResult {
    let fs = site_fs();
    let subscriber = FakeSubscriber::new();

    let config = sitewatch::config::SiteConfigFile {
        watch_dirs: vec![PathBuf::from("data"), PathBuf::from("/shared")],
        ..Default::default()
    };
    let site = RecordingSite::new("/s").with_config(config);

    let cfg = WatchConfigBuilder::new("/s").watch_dir("/extra").build();
    let mut lifecycle = WatchLifecycle::new(cfg, Diagnostics::new(true, false));
    lifecycle.start(Box::new(site), &fs, &subscriber)?;

    let request = subscriber.last_request().expect("subscribed");
    assert_eq!(
        request.roots.as_slice(),
        &[
            PathBuf::from("/s"),
            PathBuf::from("/extra"),
            PathBuf::from("/s/data"),
            PathBuf::from("/shared"),
        ]
    );
    Ok(())
}

#[test]
fn starting_twice_is_rejected() -> TestResult {
    let fs = site_fs();
    let subscriber = FakeSubscriber::new();
    let mut lifecycle = WatchLifecycle::new(WatchConfigBuilder::new("/s").build(), Diagnostics::default());

    assert_eq!(lifecycle.state(), LifecycleState::Idle);
    lifecycle.start(Box::new(RecordingSite::new("/s")), &fs, &subscriber)?;
    assert!(lifecycle
        .start(Box::new(RecordingSite::new("/s")), &fs, &subscriber)
        .is_err());
    assert_eq!(subscriber.subscribe_count(), 1);

    lifecycle.stop();
    lifecycle.stop();
    assert_eq!(lifecycle.state(), LifecycleState::Stopped);
    Ok(())
}

#[tokio::test]
async fn dropped_trigger_counts_as_shutdown() {
    let (trigger, mut signal) = ShutdownSignal::manual();
    drop(trigger);
    with_timeout(signal.wait()).await;
}

#[tokio::test]
async fn triggered_signal_resolves_wait() {
    let (trigger, mut signal) = ShutdownSignal::manual();
    assert!(!signal.is_triggered());
    trigger.trigger();
    assert!(signal.is_triggered());
    with_timeout(signal.wait()).await;
}

#[tokio::test]
async fn interrupt_during_initial_build_halts_without_watching() -> TestResult {
    init_tracing();

    let fs = site_fs();
    let subscriber = FakeSubscriber::new();
    let site = RecordingSite::new("/s");
    let probe = site.clone();

    let (trigger, signal) = ShutdownSignal::manual();
    trigger.trigger();

    let cfg = WatchConfigBuilder::new("/s").build();
    let outcome = with_timeout(sitewatch::build_and_watch(
        cfg,
        Box::new(site),
        Diagnostics::default(),
        &fs,
        &subscriber,
        signal,
    ))
    .await?;

    assert!(matches!(outcome, WatchOutcome::Halted));
    assert_eq!(probe.calls(), 1);
    assert_eq!(subscriber.subscribe_count(), 0);
    Ok(())
}

#[tokio::test]
async fn initial_build_runs_before_watching() -> TestResult {
    init_tracing();

    let fs = site_fs();
    let subscriber = FakeSubscriber::new();
    let site = RecordingSite::new("/s");
    site.fail_next("missing layout");
    let probe = site.clone();

    let (trigger, signal) = ShutdownSignal::manual();
    let cfg = WatchConfigBuilder::new("/s").build();

    let watching = sitewatch::build_and_watch(
        cfg,
        Box::new(site),
        Diagnostics::default(),
        &fs,
        &subscriber,
        signal,
    );

    let driver = async {
        while subscriber.subscribe_count() == 0 {
            tokio::task::yield_now().await;
        }
        // The failed initial build does not prevent later rebuilds.
        assert_eq!(probe.calls(), 1);
        assert!(subscriber.emit(change("/s/index.md")));
        trigger.trigger();
    };

    let (outcome, ()) = with_timeout(async { tokio::join!(watching, driver) }).await;

    assert!(matches!(outcome?, WatchOutcome::Halted));
    assert_eq!(probe.calls(), 2);
    assert!(subscriber.is_stopped());
    Ok(())
}
