//! Per-user gesture baselines
//!
//! The baseline is the one piece of cross-run state in the system: the
//! previous analysis window, read by the classifier and replaced at the
//! end of each run. Same-user runs must serialize their read-modify-write
//! to avoid lost updates; different users never contend.
//!
//! Each user gets an `Arc<Mutex<Vec<f64>>>` cell. The registry map itself
//! is locked only long enough to clone the Arc, so holding one user's
//! baseline never blocks another user's lookup.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use cradlesense_core::zero_baseline;

/// Shared handle to one user's baseline window
pub type BaselineCell = Arc<Mutex<Vec<f64>>>;

/// Registry of per-user baseline cells
#[derive(Default)]
pub struct BaselineRegistry {
    cells: Mutex<HashMap<String, BaselineCell>>,
}

impl BaselineRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the user's baseline cell, creating a zeroed one on first use
    pub fn cell(&self, user: &str) -> BaselineCell {
        let mut cells = self.cells.lock().unwrap();
        cells
            .entry(user.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(zero_baseline())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cradlesense_core::WINDOW;

    #[test]
    fn first_use_is_zeroed_at_window_width() {
        let registry = BaselineRegistry::new();
        let cell = registry.cell("alice");
        let baseline = cell.lock().unwrap();
        assert_eq!(baseline.len(), WINDOW);
        assert!(baseline.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn same_user_gets_the_same_cell() {
        let registry = BaselineRegistry::new();
        let a = registry.cell("alice");
        let b = registry.cell("alice");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn different_users_get_independent_cells() {
        let registry = BaselineRegistry::new();
        let a = registry.cell("alice");
        let b = registry.cell("bob");
        assert!(!Arc::ptr_eq(&a, &b));

        a.lock().unwrap()[0] = 42.0;
        assert_eq!(b.lock().unwrap()[0], 0.0);
    }

    #[test]
    fn holding_one_baseline_does_not_block_registry() {
        let registry = BaselineRegistry::new();
        let a = registry.cell("alice");
        let _held = a.lock().unwrap();
        // Must not deadlock while alice's cell is held
        let _b = registry.cell("bob");
    }
}
