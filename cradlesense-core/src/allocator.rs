//! Task allocation between two caregivers
//!
//! ## Overview
//!
//! Given an ordered list of task names, an allocator assigns each task to
//! one of two parties. The [`Allocator`] trait is the seam: callers hold a
//! `dyn Allocator` so the policy can be swapped without touching them
//! (a deterministic double in tests, a real scheduler later).
//!
//! [`CoinFlipAllocator`] is explicitly a placeholder policy, not a
//! scheduler or optimizer: every task gets an independent uniform draw.
//! The random source is injected so tests can seed it.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// One of the two parties a task can go to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assignee {
    /// First caregiver
    PartyA,
    /// Second caregiver
    PartyB,
}

impl Assignee {
    /// Get human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Assignee::PartyA => "party_a",
            Assignee::PartyB => "party_b",
        }
    }
}

/// A task with its assigned party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Task name as submitted
    pub task: String,
    /// Party the task was assigned to
    pub assignee: Assignee,
}

/// Assignment policy seam
pub trait Allocator {
    /// Assign every task in submission order
    fn assign(&mut self, tasks: &[&str]) -> Vec<Assignment>;
}

/// Uniform random assignment - the placeholder policy
pub struct CoinFlipAllocator<R: Rng> {
    rng: R,
}

impl CoinFlipAllocator<StdRng> {
    /// Allocator seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic allocator for tests
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for CoinFlipAllocator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> CoinFlipAllocator<R> {
    /// Allocator over a caller-supplied random source
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Allocator for CoinFlipAllocator<R> {
    fn assign(&mut self, tasks: &[&str]) -> Vec<Assignment> {
        tasks
            .iter()
            .map(|task| Assignment {
                task: (*task).to_string(),
                assignee: if self.rng.gen::<bool>() {
                    Assignee::PartyA
                } else {
                    Assignee::PartyB
                },
            })
            .collect()
    }
}

/// Strict alternation - deterministic, keeps the split even
#[derive(Debug, Clone, Default)]
pub struct RoundRobinAllocator {
    next_is_b: bool,
}

impl Allocator for RoundRobinAllocator {
    fn assign(&mut self, tasks: &[&str]) -> Vec<Assignment> {
        tasks
            .iter()
            .map(|task| {
                let assignee = if self.next_is_b {
                    Assignee::PartyB
                } else {
                    Assignee::PartyA
                };
                self.next_is_b = !self.next_is_b;
                Assignment {
                    task: (*task).to_string(),
                    assignee,
                }
            })
            .collect()
    }
}
