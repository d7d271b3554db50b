//! Visibility gating for the render loop.

/// Fraction of the effect that must be on screen before ticks are
/// scheduled.
pub const VISIBILITY_THRESHOLD: f32 = 0.1;

/// Whether the render loop is currently scheduling ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GateState {
    /// Off screen: no ticks scheduled, no state changes, no draws.
    #[default]
    Hidden,
    /// On screen: ticks run frame by frame.
    Animating,
}

/// State change reported by [`VisibilityGate::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Became visible: the host should schedule the next tick.
    Resumed,
    /// Became hidden: the host must cancel any pending tick.
    Parked,
}

/// Tracks whether the effect is visible enough to animate.
#[derive(Debug, Default)]
pub struct VisibilityGate {
    state: GateState,
}

impl VisibilityGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a visibility ratio in `[0, 1]`. Returns a transition only
    /// when the state actually changes.
    pub fn observe(&mut self, ratio: f32) -> Option<Transition> {
        let visible = ratio >= VISIBILITY_THRESHOLD;
        match (self.state, visible) {
            (GateState::Hidden, true) => {
                self.state = GateState::Animating;
                Some(Transition::Resumed)
            }
            (GateState::Animating, false) => {
                self.state = GateState::Hidden;
                Some(Transition::Parked)
            }
            _ => None,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.state == GateState::Animating
    }
}
