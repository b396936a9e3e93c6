//! Pipeline orchestration for CradleSense
//!
//! ## Overview
//!
//! One engine instance serves every user of a device. Each submitted
//! sample, temperature reading, or task batch is an independent,
//! request-scoped run:
//!
//! ```text
//! sample ──► gesture + mood classification ──► actuator dispatch
//!                      │                          (fail-open)
//!                      └──────────► telemetry store (encrypted)
//! ```
//!
//! ## Concurrency model
//!
//! Runs for different users share no mutable state except the telemetry
//! store. The per-user gesture baseline is the only read-modify-write
//! state: the [`baseline::BaselineRegistry`] serializes same-user runs
//! while users never contend with each other. Actuator commands are
//! issued after every lock is released; their outcome never blocks or
//! fails the telemetry write path.
//!
//! ## Failure scoping
//!
//! Invalid input aborts only its own run. An unreachable device is logged
//! and counted. A storage failure surfaces to the caller, because a record
//! must never be silently dropped. Nothing here terminates the process.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod baseline;
pub mod config;
pub mod engine;

pub use baseline::BaselineRegistry;
pub use config::EngineConfig;
pub use engine::{CommunityEvent, Engine, EngineError, HealthOutcome, SampleOutcome};
