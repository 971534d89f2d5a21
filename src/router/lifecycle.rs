//! Router lifecycle state machine
//!
//! Phases: `Installing -> Waiting -> Activating -> Activated`, with a
//! terminal `Redundant` reachable from any non-activated phase when a
//! newer registration supersedes this one.

use crate::error::{AirlockError, AirlockResult};
use std::fmt;

/// Lifecycle phase of the router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Populating the static partition from the manifests
    Installing,
    /// Installed, waiting to take over from a prior generation
    Waiting,
    /// Sweeping stale partitions and claiming clients
    Activating,
    /// Controlling all clients
    Activated,
    /// Superseded before activation; terminal
    Redundant,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Installing => write!(f, "installing"),
            Self::Waiting => write!(f, "waiting"),
            Self::Activating => write!(f, "activating"),
            Self::Activated => write!(f, "activated"),
            Self::Redundant => write!(f, "redundant"),
        }
    }
}

/// Tracks the phase plus the skip-waiting and client-claim flags
#[derive(Debug)]
pub struct Lifecycle {
    phase: Phase,
    skip_waiting: bool,
    controlling: bool,
}

impl Lifecycle {
    /// Start a fresh registration, about to install
    pub fn new() -> Self {
        Self::resume(Phase::Installing)
    }

    /// Resume a registration at a known phase
    ///
    /// The adapter uses this when a previously installed generation is
    /// already waiting or active.
    pub fn resume(phase: Phase) -> Self {
        Self {
            phase,
            skip_waiting: false,
            controlling: phase == Phase::Activated,
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether immediate activation has been requested
    pub fn skip_waiting_requested(&self) -> bool {
        self.skip_waiting
    }

    /// Whether this router controls existing clients
    pub fn is_controlling(&self) -> bool {
        self.controlling
    }

    /// Request immediate activation, bypassing the all-clients-closed gate
    pub fn request_skip_waiting(&mut self) {
        self.skip_waiting = true;
    }

    fn invalid(&self, to: Phase) -> AirlockError {
        AirlockError::LifecycleTransition {
            from: self.phase.to_string(),
            to: to.to_string(),
        }
    }

    /// Install finished: `Installing -> Waiting`
    pub fn installed(&mut self) -> AirlockResult<()> {
        if self.phase != Phase::Installing {
            return Err(self.invalid(Phase::Waiting));
        }
        self.phase = Phase::Waiting;
        Ok(())
    }

    /// Activation starting: `Waiting -> Activating`
    pub fn begin_activation(&mut self) -> AirlockResult<()> {
        if self.phase != Phase::Waiting {
            return Err(self.invalid(Phase::Activating));
        }
        self.phase = Phase::Activating;
        Ok(())
    }

    /// Activation finished: `Activating -> Activated`, now controlling
    pub fn activated(&mut self) -> AirlockResult<()> {
        if self.phase != Phase::Activating {
            return Err(self.invalid(Phase::Activated));
        }
        self.phase = Phase::Activated;
        self.controlling = true;
        Ok(())
    }

    /// Superseded by a newer registration; only valid before activation
    pub fn make_redundant(&mut self) -> AirlockResult<()> {
        if self.phase == Phase::Activated {
            return Err(self.invalid(Phase::Redundant));
        }
        self.phase = Phase::Redundant;
        Ok(())
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path() {
        let mut lc = Lifecycle::new();
        assert_eq!(lc.phase(), Phase::Installing);

        lc.installed().unwrap();
        assert_eq!(lc.phase(), Phase::Waiting);
        assert!(!lc.is_controlling());

        lc.begin_activation().unwrap();
        lc.activated().unwrap();
        assert_eq!(lc.phase(), Phase::Activated);
        assert!(lc.is_controlling());
    }

    #[test]
    fn skip_waiting_flag() {
        let mut lc = Lifecycle::new();
        assert!(!lc.skip_waiting_requested());
        lc.request_skip_waiting();
        assert!(lc.skip_waiting_requested());
    }

    #[test]
    fn cannot_activate_before_install() {
        let mut lc = Lifecycle::new();
        let err = lc.begin_activation().unwrap_err();
        assert!(matches!(err, AirlockError::LifecycleTransition { .. }));
    }

    #[test]
    fn cannot_install_twice() {
        let mut lc = Lifecycle::new();
        lc.installed().unwrap();
        assert!(lc.installed().is_err());
    }

    #[test]
    fn redundant_from_waiting_but_not_activated() {
        let mut waiting = Lifecycle::resume(Phase::Waiting);
        waiting.make_redundant().unwrap();
        assert_eq!(waiting.phase(), Phase::Redundant);

        let mut active = Lifecycle::resume(Phase::Activated);
        assert!(active.make_redundant().is_err());
    }

    #[test]
    fn resume_at_activated_is_controlling() {
        let lc = Lifecycle::resume(Phase::Activated);
        assert!(lc.is_controlling());
    }
}
