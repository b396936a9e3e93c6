//! Actuator command policy and dispatch for CradleSense
//!
//! ## Overview
//!
//! Maps a classification to zero or more outbound hardware commands and
//! fires them at the companion device. Dispatch is fire-and-forget: every
//! command gets a bounded-timeout call, failures are logged and counted,
//! and nothing here ever aborts the classification pipeline. The device
//! being offline must not cost a telemetry record.
//!
//! ## Seams
//!
//! The dispatcher core has no network dependency. It talks through the
//! [`ActuatorLink`] trait; [`http::HttpLink`] is the production transport
//! and tests substitute a recording double to assert on command counts
//! and payloads without a live device.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod dispatcher;
pub mod http;
pub mod policy;

pub use dispatcher::{DispatchReport, DispatchStats, Dispatcher};
pub use http::{HttpConfig, HttpLink};
pub use policy::{Action, Command};

use thiserror::Error;

/// Transport-level dispatch failures
///
/// These are terminal at the dispatcher boundary: logged, counted, never
/// propagated into the pipeline.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Device endpoint unreachable or connection refused
    #[error("device unreachable: {0}")]
    Unreachable(String),

    /// No response within the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Device answered with a non-success status
    #[error("device rejected command: status {0}")]
    Rejected(u16),
}

/// Outbound transport to the companion device
///
/// One call per command; the response body is ignored.
pub trait ActuatorLink: Send + Sync {
    /// Deliver one command payload to `path` under the device base address
    fn send(&self, path: &str, payload: &serde_json::Value) -> Result<(), LinkError>;
}

impl<L: ActuatorLink + ?Sized> ActuatorLink for &L {
    fn send(&self, path: &str, payload: &serde_json::Value) -> Result<(), LinkError> {
        (**self).send(path, payload)
    }
}

impl<L: ActuatorLink + ?Sized> ActuatorLink for std::sync::Arc<L> {
    fn send(&self, path: &str, payload: &serde_json::Value) -> Result<(), LinkError> {
        (**self).send(path, payload)
    }
}
