// src/watch/dispatch.rs

//! Run one rebuild without letting its failure escape.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use tracing::{info, warn};

use crate::logging::Diagnostics;
use crate::site::Site;
use crate::types::RebuildOutcome;
use crate::watch::coalesce::REGENERATING_TARGET;

/// Call `site.process()` exactly once and report how it went.
///
/// Errors and panics from the build become a [`RebuildOutcome::Failed`]
/// plus two warnings. A blank separator line is logged either way.
pub fn dispatch(site: &mut dyn Site, started: Instant, diagnostics: &Diagnostics) -> RebuildOutcome {
    let result = panic::catch_unwind(AssertUnwindSafe(|| site.process()));

    let outcome = match result {
        Ok(Ok(())) => {
            let elapsed = started.elapsed();
            info!(
                target: REGENERATING_TARGET,
                "...done in {:.6} seconds.",
                elapsed.as_secs_f64()
            );
            RebuildOutcome::Success { elapsed }
        }
        Ok(Err(err)) => failed(err.to_string(), diagnostics),
        Err(payload) => failed(panic_message(payload.as_ref()), diagnostics),
    };

    info!(target: REGENERATING_TARGET, "");
    outcome
}

fn failed(message: String, diagnostics: &Diagnostics) -> RebuildOutcome {
    warn!(target: "sitewatch::build", "Error: {}", message);
    warn!(target: "sitewatch::build", "{}", diagnostics.failure_hint());
    RebuildOutcome::Failed { message }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("build panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("build panicked: {s}")
    } else {
        "build panicked".to_string()
    }
}
