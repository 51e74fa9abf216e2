#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RotatorState {
    Loading,       // Fetch in flight, placeholder shown
    Fallback,      // No slides, fallback title shown
    Static,        // Exactly one slide, no timer
    Displaying,    // Showing the current slide, countdown running
    Transitioning, // Current slide is fading out
    Unmounted,     // Torn down, timers cancelled
}

impl RotatorState {
    pub fn is_rotating(self) -> bool {
        matches!(self, RotatorState::Displaying | RotatorState::Transitioning)
    }
}
