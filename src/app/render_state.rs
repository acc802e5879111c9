use crate::reading::{clickable_indices, tokenize, Token};

/// Snapshot of a dialogue line for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct LineView {
    pub tokens: Vec<Token>,
    /// Token index under the follow-along highlight
    pub highlighted: Option<usize>,
    /// Token index under the keyboard cursor
    pub selected: Option<usize>,
}

impl LineView {
    pub fn new(text: &str) -> Self {
        Self {
            tokens: tokenize(text),
            highlighted: None,
            selected: None,
        }
    }

    pub fn clickable(&self) -> Vec<usize> {
        clickable_indices(&self.tokens)
    }

    pub fn selected_token(&self) -> Option<&Token> {
        self.selected.and_then(|i| self.tokens.get(i))
    }
}

/// Position of the cursor within `len` items after moving by `delta`,
/// clamped to the ends.
pub fn step(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let target = current as isize + delta;
    target.clamp(0, len as isize - 1) as usize
}
