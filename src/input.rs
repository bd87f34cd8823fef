// src/input.rs

//! Interactive keyboard control.
//!
//! A dedicated thread reads single key presses (no Enter needed) and turns
//! them into runtime events. `read_key` blocks, so this cannot live on the
//! Tokio runtime.

use std::io::{self, IsTerminal};
use std::thread;

use dialoguer::console::{Key, Term};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::RuntimeEvent;
use crate::types::{ControlAction, KeyBindings};

/// ETX, what Ctrl-C reads as while the terminal is in raw mode.
const CTRL_C: char = '\u{3}';

/// Map a key press onto a runtime event.
pub fn event_for_key(key: &Key, bindings: &KeyBindings) -> Option<RuntimeEvent> {
    match key {
        Key::Char(CTRL_C) => Some(RuntimeEvent::ShutdownRequested),
        Key::Char(c) => bindings.action_for(*c).map(|action| match action {
            ControlAction::ForceRun => RuntimeEvent::ForceRun,
            ControlAction::Quit => RuntimeEvent::ShutdownRequested,
        }),
        _ => None,
    }
}

/// Keys come in on stdin and are read through the stderr terminal, so a piped
/// stdout (`| tee log`) keeps the controls.
fn keyboard_available(stdin_is_term: bool, stderr_is_term: bool) -> bool {
    stdin_is_term && stderr_is_term
}

/// Spawn the keyboard reader thread.
///
/// Does nothing when stdin or stderr is not a terminal, since single-key
/// reads need one.
pub fn spawn_key_reader(
    bindings: KeyBindings,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> io::Result<Option<thread::JoinHandle<()>>> {
    let term = Term::stderr();
    if !keyboard_available(io::stdin().is_terminal(), term.is_term()) {
        info!("not attached to a terminal; keyboard controls disabled");
        return Ok(None);
    }

    let handle = thread::Builder::new()
        .name("when-changed-keys".to_string())
        .spawn(move || read_keys(&term, bindings, &runtime_tx))?;
    Ok(Some(handle))
}

fn read_keys(term: &Term, bindings: KeyBindings, runtime_tx: &mpsc::Sender<RuntimeEvent>) {
    loop {
        let event = match term.read_key() {
            Ok(key) => {
                debug!(?key, "key pressed");
                event_for_key(&key, &bindings)
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                Some(RuntimeEvent::ShutdownRequested)
            }
            Err(err) => {
                warn!(error = %err, "reading keyboard failed; keyboard controls disabled");
                return;
            }
        };

        let Some(event) = event else { continue };
        let stop = event == RuntimeEvent::ShutdownRequested;
        if runtime_tx.blocking_send(event).is_err() || stop {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_and_quit_keys() {
        let keys = KeyBindings::default();
        assert_eq!(event_for_key(&Key::Char('F'), &keys), Some(RuntimeEvent::ForceRun));
        assert_eq!(
            event_for_key(&Key::Char('q'), &keys),
            Some(RuntimeEvent::ShutdownRequested)
        );
        assert_eq!(event_for_key(&Key::Char('z'), &keys), None);
        assert_eq!(event_for_key(&Key::Enter, &keys), None);
    }

    #[test]
    fn keyboard_needs_stdin_and_stderr_terminals() {
        assert!(keyboard_available(true, true));
        assert!(!keyboard_available(false, true));
        assert!(!keyboard_available(true, false));
    }

    #[test]
    fn raw_ctrl_c_shuts_down() {
        let keys = KeyBindings::default();
        assert_eq!(
            event_for_key(&Key::Char(CTRL_C), &keys),
            Some(RuntimeEvent::ShutdownRequested)
        );
    }
}
