//! Tests for the popsim tracing setup.

use std::sync::Mutex;

use popsim_core::tracing::init_tracing;
use popsim_core::tracing::spans::names;

/// Serializes tracing tests (env var manipulation).
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn init_tracing_accepts_per_target_filters() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("POPSIM_LOG", "popsim_balancer=trace,popsim_factoring=warn");
    init_tracing();
    std::env::remove_var("POPSIM_LOG");
}

#[test]
fn init_tracing_is_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
}

#[test]
fn span_names_are_namespaced() {
    assert!(names::BALANCE.starts_with("popsim."));
    assert!(names::FACTORING.starts_with("popsim."));
}
