//! Key normalization and the key-to-command table.
//!
//! Crossterm key events are normalized into a small name vocabulary
//! (printable characters plus `SPACE`, `ENTER`, `ESCAPE`, arrow keys and
//! `CTRL-<letter>` combinations). A fixed table maps lists of key names to
//! tagged command variants; dispatch is a plain match in the engine, with
//! no state captured in closures.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

// ============================================================================
// Command
// ============================================================================

/// A command the engine can execute in response to a key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Toggle Running <-> Paused
    Pause,
    /// Move elapsed time forward by the given seconds
    SeekForward(f64),
    /// Move elapsed time backward by the given seconds
    SeekBackward(f64),
    /// End the current phase without ringing (only when skipping is allowed)
    Skip,
    /// End the session and propagate quit to the caller
    Quit,
    /// Print the command list
    Help,
    /// Clear the screen and redraw
    ClearScreen,
}

// ============================================================================
// Key Table
// ============================================================================

/// One row of the key table: key names, command, help description.
pub struct KeyBinding {
    pub keys: &'static [&'static str],
    pub command: Command,
    pub description: &'static str,
}

/// The fixed key-to-command table, also the source of the help text.
pub const KEY_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        keys: &["p", "SPACE"],
        command: Command::Pause,
        description: "Pause/resume timer.",
    },
    KeyBinding {
        keys: &["RIGHT", "f"],
        command: Command::SeekForward(1.0),
        description: "Forward 1 second.",
    },
    KeyBinding {
        keys: &["LEFT", "b"],
        command: Command::SeekBackward(1.0),
        description: "Backward 1 second.",
    },
    KeyBinding {
        keys: &["UP", "F"],
        command: Command::SeekForward(10.0),
        description: "Forward 10 seconds.",
    },
    KeyBinding {
        keys: &["DOWN", "B"],
        command: Command::SeekBackward(10.0),
        description: "Backward 10 seconds.",
    },
    KeyBinding {
        keys: &["CTRL-L"],
        command: Command::ClearScreen,
        description: "Clear screen.",
    },
    KeyBinding {
        keys: &["n", "ENTER"],
        command: Command::Skip,
        description: "Skip to next timer.",
    },
    KeyBinding {
        keys: &["q", "ESCAPE", "CTRL-C"],
        command: Command::Quit,
        description: "Quit.",
    },
    KeyBinding {
        keys: &["h", "?"],
        command: Command::Help,
        description: "Show this help.",
    },
];

/// Looks up the command bound to a normalized key name.
///
/// Unbound keys return `None` and are ignored by the engine.
pub fn lookup(key_name: &str) -> Option<Command> {
    KEY_BINDINGS
        .iter()
        .find(|b| b.keys.contains(&key_name))
        .map(|b| b.command)
}

// ============================================================================
// Key Normalization
// ============================================================================

/// Normalizes a crossterm key event into a key name.
///
/// Returns `None` for release/repeat events and for keys outside the
/// vocabulary.
pub fn key_name(event: &KeyEvent) -> Option<String> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char(c) = event.code {
            return Some(format!("CTRL-{}", c.to_ascii_uppercase()));
        }
    }

    match event.code {
        KeyCode::Char(' ') => Some("SPACE".to_string()),
        KeyCode::Char(c) => Some(c.to_string()),
        KeyCode::Enter => Some("ENTER".to_string()),
        KeyCode::Esc => Some("ESCAPE".to_string()),
        KeyCode::Up => Some("UP".to_string()),
        KeyCode::Down => Some("DOWN".to_string()),
        KeyCode::Left => Some("LEFT".to_string()),
        KeyCode::Right => Some("RIGHT".to_string()),
        _ => None,
    }
}

/// Formats a binding's key list for the help text, e.g. `[p], [SPACE]`.
pub fn keys_str(keys: &[&str]) -> String {
    keys.iter()
        .map(|k| format!("[{k}]"))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Tests
// ============================================================================
