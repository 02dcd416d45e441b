//! Frame-count debounce aggregator

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{DrowsinessConfig, NoFacePolicy};
use crate::state::{CombinedEyeState, Status, Transition};

/// Consecutive-frame run lengths. Mutually exclusive: advancing one
/// zeroes the other two every frame.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RunCounters {
    pub sleep: u32,
    pub drowsy: u32,
    pub active: u32,
}

/// Debounces per-frame combined eye states into a stable status.
///
/// The machine holds its last confirmed status while evidence
/// accumulates; a single anomalous frame cannot flip it. A transition
/// is emitted exactly once, when a run first reaches the frame
/// threshold with a status different from the current one.
#[derive(Debug)]
pub struct DebounceAggregator {
    config: DrowsinessConfig,
    counters: RunCounters,
    status: Status,
}

impl DebounceAggregator {
    pub fn new(config: DrowsinessConfig) -> Self {
        Self {
            config,
            counters: RunCounters::default(),
            status: Status::default(),
        }
    }

    /// Current confirmed status
    pub fn status(&self) -> Status {
        self.status
    }

    /// Current run counters
    pub fn counters(&self) -> RunCounters {
        self.counters
    }

    /// Consume one frame's observation (`None` = no face detected).
    /// Returns the transition if this frame confirmed a status change.
    pub fn observe(&mut self, observation: Option<CombinedEyeState>) -> Option<Transition> {
        let observed = match observation {
            Some(state) => state,
            None => match self.config.no_face_policy {
                NoFacePolicy::Freeze => {
                    debug!("No face detected, counters frozen");
                    return None;
                }
                NoFacePolicy::TreatAsClosed => CombinedEyeState::BothClosed,
            },
        };

        let mut candidate = self.status;
        match observed {
            CombinedEyeState::BothClosed => {
                self.counters.sleep = self.counters.sleep.saturating_add(1);
                self.counters.drowsy = 0;
                self.counters.active = 0;
                if self.counters.sleep >= self.config.frame_threshold {
                    candidate = Status::Sleeping;
                }
            }
            CombinedEyeState::EitherHalf => {
                self.counters.drowsy = self.counters.drowsy.saturating_add(1);
                self.counters.sleep = 0;
                self.counters.active = 0;
                if self.counters.drowsy >= self.config.frame_threshold {
                    candidate = Status::Drowsy;
                }
            }
            CombinedEyeState::Open => {
                self.counters.active = self.counters.active.saturating_add(1);
                self.counters.sleep = 0;
                self.counters.drowsy = 0;
                if self.counters.active >= self.config.frame_threshold {
                    candidate = Status::Active;
                }
            }
        }

        if candidate != self.status {
            let transition = Transition {
                from: self.status,
                to: candidate,
            };
            info!("Status transition: {} -> {}", transition.from, transition.to);
            self.status = candidate;
            Some(transition)
        } else {
            None
        }
    }

    /// Reset to the initial state (session stop/restart)
    pub fn reset(&mut self) {
        self.counters = RunCounters::default();
        self.status = Status::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregator() -> DebounceAggregator {
        DebounceAggregator::new(DrowsinessConfig::default())
    }

    fn feed(
        agg: &mut DebounceAggregator,
        state: CombinedEyeState,
        frames: u32,
    ) -> Vec<Transition> {
        (0..frames).filter_map(|_| agg.observe(Some(state))).collect()
    }

    #[test]
    fn test_holds_status_below_threshold() {
        let mut agg = aggregator();
        let fired = feed(&mut agg, CombinedEyeState::BothClosed, 5);
        assert!(fired.is_empty());
        assert_eq!(agg.status(), Status::Active);
        assert_eq!(agg.counters().sleep, 5);
    }

    #[test]
    fn test_category_flip_resets_run() {
        let mut agg = aggregator();
        feed(&mut agg, CombinedEyeState::BothClosed, 5);
        let fired = feed(&mut agg, CombinedEyeState::EitherHalf, 1);
        assert!(fired.is_empty());
        assert_eq!(agg.status(), Status::Active);
        assert_eq!(agg.counters().sleep, 0);
        assert_eq!(agg.counters().drowsy, 1);
    }

    #[test]
    fn test_transition_fires_exactly_once_at_threshold() {
        let mut agg = aggregator();
        let fired = feed(&mut agg, CombinedEyeState::BothClosed, 6);
        assert_eq!(
            fired,
            vec![Transition {
                from: Status::Active,
                to: Status::Sleeping,
            }]
        );

        // Further closed frames must not re-fire
        let fired = feed(&mut agg, CombinedEyeState::BothClosed, 10);
        assert!(fired.is_empty());
        assert_eq!(agg.status(), Status::Sleeping);
    }

    #[test]
    fn test_recovery_back_to_active() {
        let mut agg = aggregator();
        feed(&mut agg, CombinedEyeState::BothClosed, 6);
        let fired = feed(&mut agg, CombinedEyeState::Open, 6);
        assert_eq!(
            fired,
            vec![Transition {
                from: Status::Sleeping,
                to: Status::Active,
            }]
        );
    }

    #[test]
    fn test_hysteresis_under_alternating_input() {
        // Alternating with period shorter than the frame threshold:
        // no run ever completes, status never moves.
        let mut agg = aggregator();
        for _ in 0..20 {
            feed(&mut agg, CombinedEyeState::BothClosed, 3);
            feed(&mut agg, CombinedEyeState::EitherHalf, 3);
        }
        assert_eq!(agg.status(), Status::Active);
    }

    #[test]
    fn test_no_face_freeze_policy() {
        let mut agg = aggregator();
        feed(&mut agg, CombinedEyeState::BothClosed, 5);
        for _ in 0..10 {
            assert!(agg.observe(None).is_none());
        }
        // Counters untouched; one more closed frame completes the run
        assert_eq!(agg.counters().sleep, 5);
        let fired = feed(&mut agg, CombinedEyeState::BothClosed, 1);
        assert_eq!(fired.len(), 1);
        assert_eq!(agg.status(), Status::Sleeping);
    }

    #[test]
    fn test_no_face_treat_as_closed_policy() {
        let config = DrowsinessConfig {
            no_face_policy: NoFacePolicy::TreatAsClosed,
            ..Default::default()
        };
        let mut agg = DebounceAggregator::new(config);
        let fired: Vec<_> = (0..6).filter_map(|_| agg.observe(None)).collect();
        assert_eq!(fired.len(), 1);
        assert_eq!(agg.status(), Status::Sleeping);
    }

    #[test]
    fn test_drowsy_path() {
        let mut agg = aggregator();
        let fired = feed(&mut agg, CombinedEyeState::EitherHalf, 6);
        assert_eq!(
            fired,
            vec![Transition {
                from: Status::Active,
                to: Status::Drowsy,
            }]
        );
    }

    #[test]
    fn test_reset_returns_to_initial_state() {
        let mut agg = aggregator();
        feed(&mut agg, CombinedEyeState::BothClosed, 6);
        agg.reset();
        assert_eq!(agg.status(), Status::Active);
        assert_eq!(agg.counters().sleep, 0);
    }
}
