/// Editor lifecycle for the item stores.
///
/// Switching the editor to another item is a two-phase transition: the
/// current editor closes synchronously, the next item parks in `Opening`,
/// and a later `settle` call promotes it to `Open`. Consumers observe the
/// closed state in between, which is what the UI's transition animations
/// rely on.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorState<T> {
    Closed,
    Opening(T),
    Open(T),
}

#[derive(Debug)]
pub struct Editor<T> {
    state: EditorState<T>,
}

impl<T> Default for Editor<T> {
    fn default() -> Self {
        Self {
            state: EditorState::Closed,
        }
    }
}

impl<T: Clone> Editor<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditorState<T> {
        &self.state
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, EditorState::Closed)
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, EditorState::Open(_))
    }

    /// The item currently attached to the editor, in either phase.
    pub fn item(&self) -> Option<&T> {
        match &self.state {
            EditorState::Closed => None,
            EditorState::Opening(item) | EditorState::Open(item) => Some(item),
        }
    }

    pub fn close(&mut self) {
        self.state = EditorState::Closed;
    }

    /// Closes whatever is open and parks `item` in `Opening`. The item is
    /// not editable until `settle` runs.
    pub fn request_open(&mut self, item: T) {
        self.state = EditorState::Closed;
        self.state = EditorState::Opening(item);
    }

    /// Promotes `Opening` to `Open`. A no-op in any other phase, so callers
    /// may invoke it unconditionally on their next tick.
    pub fn settle(&mut self) {
        let state = std::mem::replace(&mut self.state, EditorState::Closed);
        self.state = match state {
            EditorState::Opening(item) => EditorState::Open(item),
            other => other,
        };
    }

    /// Swaps the attached item without changing phase. Used when a save
    /// round trip returns the persisted copy of the item being edited.
    pub fn replace(&mut self, item: T) {
        self.state = match std::mem::replace(&mut self.state, EditorState::Closed) {
            EditorState::Closed => EditorState::Closed,
            EditorState::Opening(_) => EditorState::Opening(item),
            EditorState::Open(_) => EditorState::Open(item),
        };
    }
}
