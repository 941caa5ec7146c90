//! Selection coordinator
//!
//! Two-state machine shared by both views. Clicking the selected claim again
//! clears the selection; clicking another claim switches to it directly.

use crate::HighlightError;
use tracing::debug;
use trustlens_domain::{Claim, ClaimId};

/// Current selection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// No claim selected
    #[default]
    NoneSelected,

    /// One claim selected
    Selected(ClaimId),
}

impl Selection {
    /// Selected claim id, if any
    pub fn claim_id(&self) -> Option<&ClaimId> {
        match self {
            Selection::NoneSelected => None,
            Selection::Selected(id) => Some(id),
        }
    }

    /// Whether `id` is the selected claim
    pub fn is_selected(&self, id: &ClaimId) -> bool {
        self.claim_id() == Some(id)
    }
}

/// A transition applied by the coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    /// State before the event
    pub previous: Selection,
    /// State after the event
    pub current: Selection,
}

impl SelectionChange {
    /// Whether the event changed anything
    pub fn is_noop(&self) -> bool {
        self.previous == self.current
    }
}

/// Owner of the selection state
///
/// Transitions are applied in call order; `&mut self` rules out interleaving.
#[derive(Debug, Default)]
pub struct SelectionCoordinator {
    state: Selection,
    revision: u64,
}

impl SelectionCoordinator {
    /// Start with nothing selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn current(&self) -> &Selection {
        &self.state
    }

    /// Number of transitions applied so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Select `id`, or clear the selection if `id` is already selected
    pub fn select(&mut self, id: ClaimId) -> SelectionChange {
        let next = if self.state.is_selected(&id) {
            Selection::NoneSelected
        } else {
            Selection::Selected(id)
        };
        self.transition(next)
    }

    /// Clear the selection
    pub fn reset(&mut self) -> SelectionChange {
        self.transition(Selection::NoneSelected)
    }

    /// Return to `previous`, undoing a transition the views could not apply
    pub fn restore(&mut self, previous: Selection) -> SelectionChange {
        self.transition(previous)
    }

    fn transition(&mut self, next: Selection) -> SelectionChange {
        let previous = std::mem::replace(&mut self.state, next);
        self.revision += 1;
        debug!(
            from = ?previous.claim_id(),
            to = ?self.state.claim_id(),
            revision = self.revision,
            "Selection transition"
        );
        SelectionChange {
            previous,
            current: self.state.clone(),
        }
    }
}

/// A view that reflects the selection
pub trait SelectionObserver {
    /// Called after every transition with the newly selected claim
    ///
    /// Recoverable problems (the claim cannot be shown in this view) are
    /// handled inside the observer; only fatal errors are returned.
    fn selection_changed(&mut self, selected: Option<&Claim>) -> Result<(), HighlightError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn id(s: &str) -> ClaimId {
        ClaimId::from(s)
    }

    #[test]
    fn test_starts_unselected() {
        let coordinator = SelectionCoordinator::new();
        assert_eq!(coordinator.current(), &Selection::NoneSelected);
        assert_eq!(coordinator.revision(), 0);
    }

    #[test]
    fn test_select_same_claim_twice_toggles_off() {
        let mut coordinator = SelectionCoordinator::new();
        coordinator.select(id("x"));
        assert_eq!(coordinator.current(), &Selection::Selected(id("x")));
        let change = coordinator.select(id("x"));
        assert_eq!(change.previous, Selection::Selected(id("x")));
        assert_eq!(coordinator.current(), &Selection::NoneSelected);
    }

    #[test]
    fn test_select_other_claim_switches() {
        let mut coordinator = SelectionCoordinator::new();
        coordinator.select(id("x"));
        let change = coordinator.select(id("y"));
        assert_eq!(change.current, Selection::Selected(id("y")));
        assert!(coordinator.current().is_selected(&id("y")));
        assert!(!coordinator.current().is_selected(&id("x")));
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut coordinator = SelectionCoordinator::new();
        assert!(coordinator.reset().is_noop());
        coordinator.select(id("x"));
        let change = coordinator.reset();
        assert!(!change.is_noop());
        assert_eq!(coordinator.current(), &Selection::NoneSelected);
        assert_eq!(coordinator.revision(), 3);
    }

    proptest! {
        #[test]
        fn prop_state_matches_toggle_model(events in prop::collection::vec(prop::option::of(0u8..4), 0..40)) {
            let mut coordinator = SelectionCoordinator::new();
            let mut model: Option<u8> = None;
            for event in events {
                match event {
                    Some(n) => {
                        coordinator.select(id(&n.to_string()));
                        model = if model == Some(n) { None } else { Some(n) };
                    }
                    None => {
                        coordinator.reset();
                        model = None;
                    }
                }
                let expected = model.map(|n| id(&n.to_string()));
                prop_assert_eq!(coordinator.current().claim_id(), expected.as_ref());
            }
        }
    }
}
