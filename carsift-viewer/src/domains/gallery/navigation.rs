//! Maps raw input onto gallery intents.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
    Escape,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavigationInput {
    Key(NavKey),
    /// Horizontal pointer travel from `start_x` to `end_x`.
    Swipe { start_x: f32, end_x: f32 },
    /// Raw text from the "jump to image" field, 1-based.
    IndexEntry(String),
    Previous,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationIntent {
    Previous,
    Next,
    /// Zero-based position, not yet clamped.
    GoTo(usize),
    Close,
    Nothing,
}

impl NavigationInput {
    pub fn intent(&self, swipe_threshold: f32) -> NavigationIntent {
        match self {
            Self::Key(NavKey::ArrowLeft) | Self::Previous => {
                NavigationIntent::Previous
            }
            Self::Key(NavKey::ArrowRight) | Self::Next => NavigationIntent::Next,
            Self::Key(NavKey::Escape) => NavigationIntent::Close,
            Self::Swipe { start_x, end_x } => {
                swipe_intent(*start_x, *end_x, swipe_threshold)
            }
            Self::IndexEntry(raw) => index_intent(raw),
        }
    }
}

/// Leftward travel beyond the threshold advances, rightward goes back.
fn swipe_intent(start_x: f32, end_x: f32, threshold: f32) -> NavigationIntent {
    let travel = start_x - end_x;
    if travel > threshold {
        NavigationIntent::Next
    } else if travel < -threshold {
        NavigationIntent::Previous
    } else {
        NavigationIntent::Nothing
    }
}

fn index_intent(raw: &str) -> NavigationIntent {
    match raw.trim().parse::<usize>() {
        Ok(one_based) => NavigationIntent::GoTo(one_based.saturating_sub(1)),
        Err(_) => NavigationIntent::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swipe_needs_to_cross_threshold() {
        let swipe = |start_x, end_x| {
            NavigationInput::Swipe { start_x, end_x }.intent(50.0)
        };
        assert_eq!(swipe(300.0, 200.0), NavigationIntent::Next);
        assert_eq!(swipe(200.0, 300.0), NavigationIntent::Previous);
        assert_eq!(swipe(200.0, 240.0), NavigationIntent::Nothing);
        assert_eq!(swipe(200.0, 150.0), NavigationIntent::Nothing);
    }

    #[test]
    fn index_entry_is_one_based_and_ignores_garbage() {
        let entry = |raw: &str| NavigationInput::IndexEntry(raw.into()).intent(50.0);
        assert_eq!(entry("3"), NavigationIntent::GoTo(2));
        assert_eq!(entry(" 1 "), NavigationIntent::GoTo(0));
        assert_eq!(entry("0"), NavigationIntent::GoTo(0));
        assert_eq!(entry("three"), NavigationIntent::Nothing);
        assert_eq!(entry("-2"), NavigationIntent::Nothing);
        assert_eq!(entry(""), NavigationIntent::Nothing);
    }

    #[test]
    fn keys_map_to_intents() {
        assert_eq!(
            NavigationInput::Key(NavKey::ArrowRight).intent(50.0),
            NavigationIntent::Next
        );
        assert_eq!(
            NavigationInput::Key(NavKey::ArrowLeft).intent(50.0),
            NavigationIntent::Previous
        );
        assert_eq!(
            NavigationInput::Key(NavKey::Escape).intent(50.0),
            NavigationIntent::Close
        );
    }
}
