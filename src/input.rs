//! Level-triggered input: the held action set is rebuilt from the full key
//! table every frame instead of being patched by key-down/key-up events.

use macroquad::input::KeyCode;

/// Logical actions the demo understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Scroll the camera left.
    MoveLeft,
    /// Scroll the camera right.
    MoveRight,
    /// Scroll the camera up.
    MoveUp,
    /// Scroll the camera down.
    MoveDown,
    /// Leave the frame loop.
    Quit,
}

impl Action {
    /// Every action, in bit order.
    pub const ALL: [Action; 5] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::MoveUp,
        Action::MoveDown,
        Action::Quit,
    ];

    #[inline]
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Physical key to action table. One key may drive several actions and one
/// action may be bound to several keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: Vec<(KeyCode, Action)>,
}

impl Default for KeyBindings {
    /// Arrows and WASD for movement, Escape to quit.
    fn default() -> Self {
        KeyBindings::empty()
            .bind(KeyCode::Left, Action::MoveLeft)
            .bind(KeyCode::A, Action::MoveLeft)
            .bind(KeyCode::Right, Action::MoveRight)
            .bind(KeyCode::D, Action::MoveRight)
            .bind(KeyCode::Up, Action::MoveUp)
            .bind(KeyCode::W, Action::MoveUp)
            .bind(KeyCode::Down, Action::MoveDown)
            .bind(KeyCode::S, Action::MoveDown)
            .bind(KeyCode::Escape, Action::Quit)
    }
}

impl KeyBindings {
    /// A table with no bindings.
    pub fn empty() -> Self {
        KeyBindings { bindings: Vec::new() }
    }

    /// Add `key → action`. Duplicate pairs are ignored.
    pub fn bind(mut self, key: KeyCode, action: Action) -> Self {
        if !self.bindings.contains(&(key, action)) {
            self.bindings.push((key, action));
        }
        self
    }

    /// Keys bound to `action`.
    pub fn keys_for(&self, action: Action) -> impl Iterator<Item = KeyCode> + '_ {
        self.bindings
            .iter()
            .filter(move |(_, a)| *a == action)
            .map(|(k, _)| *k)
    }

    /// All `(key, action)` pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (KeyCode, Action)> + '_ {
        self.bindings.iter().copied()
    }
}

/// Set of actions held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    held: u8,
}

impl InputState {
    /// Nothing held.
    pub fn empty() -> Self {
        InputState::default()
    }

    /// Recompute the held set from the complete key table. An action is held
    /// while any key bound to it is down.
    pub fn from_key_table<F>(bindings: &KeyBindings, is_down: F) -> Self
    where
        F: Fn(KeyCode) -> bool,
    {
        bindings
            .iter()
            .filter(|(key, _)| is_down(*key))
            .map(|(_, action)| action)
            .collect()
    }

    /// Whether `action` is held.
    #[inline]
    pub fn is_held(&self, action: Action) -> bool {
        self.held & action.bit() != 0
    }

    /// -1 for left, 1 for right, 0 for neither or both.
    pub fn horizontal(&self) -> i32 {
        self.is_held(Action::MoveRight) as i32 - self.is_held(Action::MoveLeft) as i32
    }

    /// -1 for up, 1 for down, 0 for neither or both.
    pub fn vertical(&self) -> i32 {
        self.is_held(Action::MoveDown) as i32 - self.is_held(Action::MoveUp) as i32
    }

    /// Held actions in [`Action::ALL`] order.
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL.into_iter().filter(move |a| self.is_held(*a))
    }
}

impl FromIterator<Action> for InputState {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let held = iter.into_iter().fold(0, |acc, a| acc | a.bit());
        InputState { held }
    }
}
