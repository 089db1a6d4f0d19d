//! Key mapping from terminal events to round commands and driver controls.

use crate::types::{Command, Control};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks of the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward to the round
    Command(Command),
    /// Handled by the driver itself
    Control(Control),
}

/// Map keyboard input to a command or control.
pub fn handle_key_event(key: KeyEvent) -> Option<KeyAction> {
    let command = match key.code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Command::Left,
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Command::Right,
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Command::SoftDrop,

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Command::RotateCw,
        KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Char('y') | KeyCode::Char('Y') => {
            Command::RotateCcw
        }

        KeyCode::Char(' ') => Command::HardDrop,
        KeyCode::Char('c') | KeyCode::Char('C')
            if !key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Command::Hold
        }

        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => {
            return Some(KeyAction::Control(Control::TogglePause))
        }
        KeyCode::Char('r') | KeyCode::Char('R') => return Some(KeyAction::Control(Control::Reset)),

        _ => return None,
    };
    Some(KeyAction::Command(command))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn command(code: KeyCode) -> Option<KeyAction> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(command(KeyCode::Left), Some(KeyAction::Command(Command::Left)));
        assert_eq!(command(KeyCode::Right), Some(KeyAction::Command(Command::Right)));
        assert_eq!(command(KeyCode::Down), Some(KeyAction::Command(Command::SoftDrop)));

        assert_eq!(command(KeyCode::Char('H')), Some(KeyAction::Command(Command::Left)));
        assert_eq!(command(KeyCode::Char('d')), Some(KeyAction::Command(Command::Right)));
        assert_eq!(command(KeyCode::Char('J')), Some(KeyAction::Command(Command::SoftDrop)));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(command(KeyCode::Up), Some(KeyAction::Command(Command::RotateCw)));
        assert_eq!(command(KeyCode::Char('x')), Some(KeyAction::Command(Command::RotateCw)));
        assert_eq!(command(KeyCode::Char('z')), Some(KeyAction::Command(Command::RotateCcw)));
        assert_eq!(command(KeyCode::Char('Y')), Some(KeyAction::Command(Command::RotateCcw)));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(command(KeyCode::Char(' ')), Some(KeyAction::Command(Command::HardDrop)));
        assert_eq!(command(KeyCode::Char('c')), Some(KeyAction::Command(Command::Hold)));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(command(KeyCode::Char('p')), Some(KeyAction::Control(Control::TogglePause)));
        assert_eq!(command(KeyCode::Esc), Some(KeyAction::Control(Control::TogglePause)));
        assert_eq!(command(KeyCode::Char('r')), Some(KeyAction::Control(Control::Reset)));
        assert_eq!(command(KeyCode::Char('v')), None);
    }

    #[test]
    fn test_ctrl_c_is_not_hold() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c), None);
        assert!(should_quit(ctrl_c));
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Char('Q'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
