//! Roving keyboard focus for toolbars.

/// Keys that move focus inside a toolbar, already resolved for text direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarKey {
    Previous,
    Next,
    First,
    Last,
}

impl ToolbarKey {
    /// Map a `KeyboardEvent.key` value. Left/right swap in right-to-left text.
    pub fn from_key(key: &str, rtl: bool) -> Option<Self> {
        let (prev, next) = if rtl {
            ("ArrowRight", "ArrowLeft")
        } else {
            ("ArrowLeft", "ArrowRight")
        };
        match key {
            k if k == prev => Some(ToolbarKey::Previous),
            k if k == next => Some(ToolbarKey::Next),
            "Home" => Some(ToolbarKey::First),
            "End" => Some(ToolbarKey::Last),
            _ => None,
        }
    }
}

/// Index to focus next, wrapping at both ends. `None` when nothing moves.
pub fn next_toolbar_index(key: ToolbarKey, current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = current.unwrap_or(0).min(len - 1);
    let next = match key {
        ToolbarKey::Next => (current + 1) % len,
        ToolbarKey::Previous => (current + len - 1) % len,
        ToolbarKey::First => 0,
        ToolbarKey::Last => len - 1,
    };
    (next != current).then_some(next)
}
