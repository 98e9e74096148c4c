//! Keyboard and mouse state collected from window events.
//!
//! Events land here as they arrive; the frame update reads the accumulated
//! state once per frame.

use std::collections::HashSet;

use glam::Vec2;
use winit::keyboard::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl Movement {
    pub const ALL: [Movement; 6] = [
        Movement::Forward,
        Movement::Backward,
        Movement::Left,
        Movement::Right,
        Movement::Up,
        Movement::Down,
    ];

    pub fn key(self) -> KeyCode {
        match self {
            Movement::Forward => KeyCode::KeyW,
            Movement::Backward => KeyCode::KeyS,
            Movement::Left => KeyCode::KeyA,
            Movement::Right => KeyCode::KeyD,
            Movement::Up => KeyCode::Space,
            Movement::Down => KeyCode::ShiftLeft,
        }
    }
}

#[derive(Debug)]
pub struct InputState {
    held: HashSet<KeyCode>,
    // Keys pressed since the last `clear_pressed`, even if already released.
    pressed: HashSet<KeyCode>,
    // Sum of raw mouse motion, so a grabbed cursor still yields a position.
    cursor: Vec2,
    moved: bool,
    wheel: f32,
    focused: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            held: HashSet::new(),
            pressed: HashSet::new(),
            cursor: Vec2::ZERO,
            moved: false,
            wheel: 0.0,
            focused: true,
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.held.insert(key);
            self.pressed.insert(key);
        } else {
            self.held.remove(&key);
        }
    }

    pub fn process_mouse_motion(&mut self, dx: f32, dy: f32) {
        self.cursor += Vec2::new(dx, dy);
        self.moved = true;
    }

    /// Scrolling is only collected while focused.
    pub fn process_wheel(&mut self, offset_y: f32) {
        if self.focused {
            self.wheel += offset_y;
        }
    }

    /// Dropping focus releases every key, since the matching key-up events
    /// go to another window, and discards any pending scroll.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.held.clear();
            self.pressed.clear();
            self.wheel = 0.0;
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Whether `key` went down since the last `clear_pressed`.
    pub fn was_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    pub fn clear_pressed(&mut self) {
        self.pressed.clear();
    }

    pub fn held_movements(&self) -> impl Iterator<Item = Movement> + '_ {
        Movement::ALL.into_iter().filter(move |m| self.is_held(m.key()))
    }

    /// Cursor position, or `None` before the first motion event.
    pub fn cursor(&self) -> Option<Vec2> {
        self.moved.then_some(self.cursor)
    }

    pub fn take_wheel(&mut self) -> f32 {
        std::mem::take(&mut self.wheel)
    }
}

/// Turns absolute cursor samples into per-frame deltas.
///
/// The first sample only records a reference point, so a cursor that starts
/// far from the origin does not spin the camera on frame one.
#[derive(Debug, Default)]
pub struct MouseLook {
    last: Option<Vec2>,
}

impl MouseLook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&mut self, position: Vec2) -> Vec2 {
        let delta = match self.last {
            Some(last) => position - last,
            None => Vec2::ZERO,
        };
        self.last = Some(position);
        delta
    }

    pub fn is_primed(&self) -> bool {
        self.last.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_press_and_release() {
        let mut input = InputState::new();

        input.process_key(KeyCode::KeyW, true);
        input.process_key(KeyCode::Space, true);
        let held: Vec<_> = input.held_movements().collect();
        assert_eq!(held, vec![Movement::Forward, Movement::Up]);

        input.process_key(KeyCode::KeyW, false);
        let held: Vec<_> = input.held_movements().collect();
        assert_eq!(held, vec![Movement::Up]);
    }

    #[test]
    fn test_movement_key_mapping() {
        let keys: Vec<_> = Movement::ALL.iter().map(|m| m.key()).collect();
        assert_eq!(
            keys,
            vec![
                KeyCode::KeyW,
                KeyCode::KeyS,
                KeyCode::KeyA,
                KeyCode::KeyD,
                KeyCode::Space,
                KeyCode::ShiftLeft,
            ]
        );
    }

    #[test]
    fn test_focus_loss_releases_keys() {
        let mut input = InputState::new();
        input.process_key(KeyCode::KeyD, true);
        input.set_focused(false);

        assert!(!input.is_focused());
        assert_eq!(input.held_movements().count(), 0);
    }

    #[test]
    fn test_press_is_latched_until_cleared() {
        let mut input = InputState::new();
        input.process_key(KeyCode::Escape, true);
        input.process_key(KeyCode::Escape, false);

        assert!(!input.is_held(KeyCode::Escape));
        assert!(input.was_pressed(KeyCode::Escape));

        input.clear_pressed();
        assert!(!input.was_pressed(KeyCode::Escape));
    }

    #[test]
    fn test_focus_loss_discards_wheel() {
        let mut input = InputState::new();
        input.process_wheel(5.0);
        input.set_focused(false);
        input.process_wheel(20.0);
        input.set_focused(true);

        assert_eq!(input.take_wheel(), 0.0);
    }

    #[test]
    fn test_cursor_accumulates_motion() {
        let mut input = InputState::new();
        assert_eq!(input.cursor(), None);

        input.process_mouse_motion(3.0, -1.0);
        input.process_mouse_motion(2.0, 4.0);
        assert_eq!(input.cursor(), Some(Vec2::new(5.0, 3.0)));
    }

    #[test]
    fn test_wheel_is_consumed() {
        let mut input = InputState::new();
        input.process_wheel(1.0);
        input.process_wheel(2.0);
        assert_eq!(input.take_wheel(), 3.0);
        assert_eq!(input.take_wheel(), 0.0);
    }

    #[test]
    fn test_first_mouse_sample_primes() {
        let mut look = MouseLook::new();
        assert!(!look.is_primed());

        assert_eq!(look.sample(Vec2::new(640.0, 360.0)), Vec2::ZERO);
        assert!(look.is_primed());
        assert_eq!(look.sample(Vec2::new(650.0, 355.0)), Vec2::new(10.0, -5.0));
    }
}
