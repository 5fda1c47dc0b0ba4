//! Game action definitions
//!
//! Movement is bound to the arrow keys with WASD as aliases.

use macroquad::input::KeyCode;

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    A,
    D,
    W,
    S,
}

impl Key {
    /// Map a platform key code, if the game cares about it
    pub fn from_keycode(code: KeyCode) -> Option<Key> {
        match code {
            KeyCode::Left => Some(Key::ArrowLeft),
            KeyCode::Right => Some(Key::ArrowRight),
            KeyCode::Up => Some(Key::ArrowUp),
            KeyCode::Down => Some(Key::ArrowDown),
            KeyCode::A => Some(Key::A),
            KeyCode::D => Some(Key::D),
            KeyCode::W => Some(Key::W),
            KeyCode::S => Some(Key::S),
            _ => None,
        }
    }
}

/// All actions the player can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::MoveUp,
        Action::MoveDown,
    ];

    /// Keys bound to this action: the arrow key, then its WASD alias
    pub fn keys(self) -> [Key; 2] {
        match self {
            Action::MoveLeft => [Key::ArrowLeft, Key::A],
            Action::MoveRight => [Key::ArrowRight, Key::D],
            Action::MoveUp => [Key::ArrowUp, Key::W],
            Action::MoveDown => [Key::ArrowDown, Key::S],
        }
    }

    /// Unit step of this action in screen space (y grows downward)
    pub fn unit(self) -> (f32, f32) {
        match self {
            Action::MoveLeft => (-1.0, 0.0),
            Action::MoveRight => (1.0, 0.0),
            Action::MoveUp => (0.0, -1.0),
            Action::MoveDown => (0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_belongs_to_one_action() {
        let keys = [
            Key::ArrowLeft,
            Key::ArrowRight,
            Key::ArrowUp,
            Key::ArrowDown,
            Key::A,
            Key::D,
            Key::W,
            Key::S,
        ];
        for key in keys {
            let owners = Action::ALL.iter().filter(|a| a.keys().contains(&key)).count();
            assert_eq!(owners, 1, "{:?}", key);
        }
    }

    #[test]
    fn test_keycode_mapping() {
        assert_eq!(Key::from_keycode(KeyCode::Left), Some(Key::ArrowLeft));
        assert_eq!(Key::from_keycode(KeyCode::S), Some(Key::S));
        assert_eq!(Key::from_keycode(KeyCode::Space), None);
    }
}
