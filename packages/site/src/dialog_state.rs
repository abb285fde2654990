//! Which dialog is open, and where focus goes back to when it closes.
//!
//! The machine holds no DOM handles of its own type; `F` is whatever the
//! binding layer uses to refer to the previously focused element.

use crate::types::DialogKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Open(DialogKey),
}

/// What a transition did, for the binding layer to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition<F> {
    Opened {
        key: DialogKey,
        /// Dialog that was open before and has been closed in its favour.
        replaced: Option<DialogKey>,
    },
    Closed {
        key: DialogKey,
        restore_focus: Option<F>,
    },
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct DialogStateMachine<F> {
    state: DialogState,
    last_focused: Option<F>,
}

impl<F> Default for DialogStateMachine<F> {
    fn default() -> Self {
        Self {
            state: DialogState::Closed,
            last_focused: None,
        }
    }
}

impl<F> DialogStateMachine<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn current(&self) -> Option<DialogKey> {
        match self.state {
            DialogState::Open(key) => Some(key),
            DialogState::Closed => None,
        }
    }

    /// Open `key`. `focused` is captured only when coming from `Closed`;
    /// switching dialogs closes the current one and keeps the original
    /// focus target. Re-opening the open dialog changes nothing.
    pub fn open(&mut self, key: DialogKey, focused: Option<F>) -> Transition<F> {
        match self.state {
            DialogState::Open(current) if current == key => Transition::Unchanged,
            DialogState::Open(current) => {
                self.state = DialogState::Open(key);
                Transition::Opened {
                    key,
                    replaced: Some(current),
                }
            }
            DialogState::Closed => {
                self.last_focused = focused;
                self.state = DialogState::Open(key);
                Transition::Opened {
                    key,
                    replaced: None,
                }
            }
        }
    }

    pub fn close(&mut self) -> Transition<F> {
        match self.state {
            DialogState::Open(key) => {
                self.state = DialogState::Closed;
                Transition::Closed {
                    key,
                    restore_focus: self.last_focused.take(),
                }
            }
            DialogState::Closed => Transition::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        let machine = DialogStateMachine::<u32>::new();
        assert_eq!(machine.state(), DialogState::Closed);
        assert_eq!(machine.current(), None);
    }

    #[test]
    fn open_then_close_returns_focus_target() {
        let mut machine = DialogStateMachine::new();
        assert_eq!(
            machine.open(DialogKey::About, Some(7)),
            Transition::Opened {
                key: DialogKey::About,
                replaced: None
            }
        );
        assert_eq!(machine.current(), Some(DialogKey::About));
        assert_eq!(
            machine.close(),
            Transition::Closed {
                key: DialogKey::About,
                restore_focus: Some(7)
            }
        );
        assert_eq!(machine.state(), DialogState::Closed);
    }

    #[test]
    fn close_when_closed_is_a_no_op() {
        let mut machine = DialogStateMachine::<u32>::new();
        assert_eq!(machine.close(), Transition::Unchanged);
    }

    #[test]
    fn switching_dialogs_keeps_first_focus_target() {
        let mut machine = DialogStateMachine::new();
        machine.open(DialogKey::About, Some(1));
        assert_eq!(
            machine.open(DialogKey::Imprint, Some(2)),
            Transition::Opened {
                key: DialogKey::Imprint,
                replaced: Some(DialogKey::About)
            }
        );
        assert_eq!(
            machine.close(),
            Transition::Closed {
                key: DialogKey::Imprint,
                restore_focus: Some(1)
            }
        );
    }

    #[test]
    fn reopening_same_dialog_is_unchanged() {
        let mut machine = DialogStateMachine::new();
        machine.open(DialogKey::Privacy, Some(1));
        assert_eq!(machine.open(DialogKey::Privacy, Some(2)), Transition::Unchanged);
        assert_eq!(
            machine.close(),
            Transition::Closed {
                key: DialogKey::Privacy,
                restore_focus: Some(1)
            }
        );
    }

    #[test]
    fn focus_target_is_consumed_on_close() {
        let mut machine = DialogStateMachine::new();
        machine.open(DialogKey::About, Some(1));
        machine.close();
        machine.open(DialogKey::About, None);
        assert_eq!(
            machine.close(),
            Transition::Closed {
                key: DialogKey::About,
                restore_focus: None
            }
        );
    }
}
