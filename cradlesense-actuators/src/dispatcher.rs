//! Fail-open command dispatch
//!
//! Resolves the policy table for a classification and attempts every
//! resulting command through the link. A failed command is logged at warn
//! and counted; it never short-circuits the remaining commands and never
//! surfaces as an error. The dispatcher holds no locks and owns no state
//! beyond the link and its cumulative counters, so callers are free to
//! invoke it outside any baseline or store lock.

use std::sync::Mutex;

use log::{debug, warn};

use cradlesense_core::{GestureKind, HealthStatus};

use crate::{policy, ActuatorLink, LinkError};

/// Outcome of one dispatch invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Commands the policy table produced
    pub attempted: usize,
    /// Commands acknowledged by the transport
    pub delivered: usize,
    /// Commands that failed at the transport
    pub failed: usize,
}

/// Cumulative dispatch counters
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchStats {
    /// Total commands delivered since construction
    pub delivered: u64,
    /// Total commands failed since construction
    pub failed: u64,
}

/// Policy-driven dispatcher over some transport
pub struct Dispatcher<L: ActuatorLink> {
    link: L,
    stats: Mutex<DispatchStats>,
}

impl<L: ActuatorLink> Dispatcher<L> {
    /// Dispatcher over the given transport
    pub fn new(link: L) -> Self {
        Self {
            link,
            stats: Mutex::new(DispatchStats::default()),
        }
    }

    /// Issue the commands for a gesture classification
    pub fn dispatch_gesture(&self, kind: GestureKind) -> DispatchReport {
        self.run(policy::for_gesture(kind))
    }

    /// Issue the commands for a health status
    pub fn dispatch_health(&self, status: HealthStatus) -> DispatchReport {
        self.run(policy::for_health(status))
    }

    /// Cumulative counters since construction
    pub fn stats(&self) -> DispatchStats {
        *self.stats.lock().unwrap()
    }

    fn run(&self, actions: &[policy::Action]) -> DispatchReport {
        let mut report = DispatchReport {
            attempted: actions.len(),
            ..DispatchReport::default()
        };

        for action in actions {
            match self.link.send(action.path(), &action.payload()) {
                Ok(()) => {
                    debug!("actuator '{}' delivered", action.name());
                    report.delivered += 1;
                }
                Err(err) => {
                    // Fail open: the device being unreachable is not a
                    // pipeline error
                    warn!("actuator '{}' failed: {err}", action.name());
                    report.failed += 1;
                }
            }
        }

        let mut stats = self.stats.lock().unwrap();
        stats.delivered += report.delivered as u64;
        stats.failed += report.failed as u64;
        report
    }
}
