/// Overlays that can sit on top of the ad card.
///
/// Only the gallery is owned by this crate; the other variants stand in for
/// sibling dialogs that share the same stack and must not leak keystrokes
/// into the gallery while they are in front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalKind {
    Gallery,
    Dialog(&'static str),
}

impl ModalKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gallery => "gallery",
            Self::Dialog(name) => name,
        }
    }
}

/// Focus snapshot handed to input handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusContext {
    pub kind: ModalKind,
    pub is_top: bool,
    pub generation: u64,
}

/// Tracks which overlay currently owns keyboard and gesture input.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<ModalKind>,
    generation: u64,
}

impl ModalStack {
    /// Push `kind` on top. An overlay already on the stack is moved to the
    /// top instead of being duplicated.
    pub fn push(&mut self, kind: ModalKind) {
        self.stack.retain(|entry| *entry != kind);
        self.stack.push(kind);
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn pop(&mut self) -> Option<ModalKind> {
        let popped = self.stack.pop();
        if popped.is_some() {
            self.generation = self.generation.wrapping_add(1);
        }
        popped
    }

    /// Remove `kind` wherever it sits. Returns whether it was present.
    pub fn remove(&mut self, kind: ModalKind) -> bool {
        let before = self.stack.len();
        self.stack.retain(|entry| *entry != kind);
        let removed = self.stack.len() != before;
        if removed {
            self.generation = self.generation.wrapping_add(1);
        }
        removed
    }

    pub fn top(&self) -> Option<ModalKind> {
        self.stack.last().copied()
    }

    pub fn is_top(&self, kind: ModalKind) -> bool {
        self.top() == Some(kind)
    }

    pub fn contains(&self, kind: ModalKind) -> bool {
        self.stack.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn focus_for(&self, kind: ModalKind) -> FocusContext {
        FocusContext {
            kind,
            is_top: self.is_top(kind),
            generation: self.generation,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_generation(&self, generation: u64) -> bool {
        self.generation == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gallery_loses_focus_under_another_dialog() {
        let mut modals = ModalStack::default();
        modals.push(ModalKind::Gallery);
        assert!(modals.focus_for(ModalKind::Gallery).is_top);

        modals.push(ModalKind::Dialog("mot-history"));
        assert!(!modals.focus_for(ModalKind::Gallery).is_top);

        assert_eq!(modals.pop(), Some(ModalKind::Dialog("mot-history")));
        assert!(modals.is_top(ModalKind::Gallery));
    }

    #[test]
    fn generation_moves_on_every_change() {
        let mut modals = ModalStack::default();
        let start = modals.generation();
        modals.push(ModalKind::Gallery);
        let pushed = modals.generation();
        assert_ne!(start, pushed);

        assert!(!modals.remove(ModalKind::Dialog("absent")));
        assert!(modals.is_generation(pushed));

        assert!(modals.remove(ModalKind::Gallery));
        assert!(!modals.is_generation(pushed));
        assert!(modals.is_empty());
    }

    #[test]
    fn repush_moves_to_top_without_duplicating() {
        let mut modals = ModalStack::default();
        modals.push(ModalKind::Gallery);
        modals.push(ModalKind::Dialog("bind-mot"));
        modals.push(ModalKind::Gallery);
        assert_eq!(modals.len(), 2);
        assert!(modals.is_top(ModalKind::Gallery));
    }
}
