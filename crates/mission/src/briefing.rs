//! Mission briefing carousel state.

use tracing::debug;

use crate::error::{Error, Result};

/// The fixed briefing steps, shown in order.
pub const BRIEFING_STEPS: [&str; 4] = [
    "We've detected some target agents in your area. Your mission, should \
     you choose to accept it, is to avoid detection and eliminate the rival \
     agents.",
    "Once you accept your mission, you will choose your method that target \
     agents must use when attempting to eliminate you from the mission. \
     After this selection, you'll be sent your first target.",
    "After eliminating the target agent, mark your victory by scanning the \
     agent's secret code with your phone. Your next target will be assigned \
     after this confirmation.",
    "Are you ready?",
];

/// State of the briefing carousel.
///
/// The accept gate opens only while the final step is in view, mirroring
/// the swipe-through requirement of the onboarding screen.
#[derive(Debug, Clone, Default)]
pub struct Briefing {
    step: usize,
    accepted: bool,
}

impl Briefing {
    /// Start at the first step, mission not yet accepted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of steps in the carousel.
    pub fn step_count(&self) -> usize {
        BRIEFING_STEPS.len()
    }

    /// The step currently in view.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Text of the step currently in view.
    pub fn step_text(&self) -> &'static str {
        BRIEFING_STEPS.get(self.step).copied().unwrap_or("")
    }

    /// Move the carousel to a step.
    pub fn view_step(&mut self, step: usize) -> Result<()> {
        if step >= BRIEFING_STEPS.len() {
            return Err(Error::StepOutOfRange { step });
        }
        self.step = step;
        Ok(())
    }

    /// Whether ACCEPT MISSION is enabled: only while the final step is in
    /// view.
    pub fn can_accept(&self) -> bool {
        self.step == BRIEFING_STEPS.len() - 1
    }

    /// Accept the mission and leave the briefing.
    pub fn accept(&mut self) -> Result<()> {
        if !self.can_accept() {
            return Err(Error::BriefingIncomplete);
        }
        debug!("mission accepted");
        self.accepted = true;
        Ok(())
    }

    /// Whether the mission has been accepted.
    pub fn accepted(&self) -> bool {
        self.accepted
    }
}
