// src/types.rs

/// What a key press on the control surface asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    ForceRun,
    Quit,
}

/// Single-key bindings for the interactive control surface.
///
/// Keys compare case-insensitively, so `f` and `F` both force a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub force: char,
    pub quit: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            force: 'f',
            quit: 'q',
        }
    }
}

impl KeyBindings {
    pub fn action_for(&self, key: char) -> Option<ControlAction> {
        if key.eq_ignore_ascii_case(&self.force) {
            Some(ControlAction::ForceRun)
        } else if key.eq_ignore_ascii_case(&self.quit) {
            Some(ControlAction::Quit)
        } else {
            None
        }
    }
}
