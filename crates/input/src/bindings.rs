use glam::Vec2;

use crate::action::{Action, LookDir, MoveDir};

/// Degrees of yaw/pitch per pixel of mouse drag.
pub const MOUSE_LOOK_DEGREES_PER_PIXEL: f32 = 0.2;

/// A key as the input layer sees it, independent of the windowing toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    F1,
}

/// Map a key press to its action, if it has one.
pub fn bind_key(key: Key) -> Option<Action> {
    let action = match key {
        Key::Char(c) => match c.to_ascii_lowercase() {
            'q' => Action::Quit,
            'w' => Action::Move(MoveDir::Forward),
            's' => Action::Move(MoveDir::Back),
            'a' => Action::Move(MoveDir::Left),
            'd' => Action::Move(MoveDir::Right),
            'r' => Action::Move(MoveDir::Rise),
            'f' => Action::Move(MoveDir::Drop),
            'i' => Action::Look(LookDir::Up),
            'k' => Action::Look(LookDir::Down),
            'j' => Action::Look(LookDir::Left),
            'l' => Action::Look(LookDir::Right),
            '1' => Action::ToggleOrbit,
            '2' => Action::ToggleOrbitPause,
            '3' => Action::ToggleFollow,
            _ => return None,
        },
        Key::ArrowUp => Action::Look(LookDir::Up),
        Key::ArrowDown => Action::Look(LookDir::Down),
        Key::ArrowLeft => Action::Look(LookDir::Left),
        Key::ArrowRight => Action::Look(LookDir::Right),
        Key::F1 => Action::ToggleInspector,
    };
    tracing::trace!(?key, ?action, "key bound");
    Some(action)
}

/// Turn a mouse drag in pixels into a look action. Dragging up pitches up.
pub fn mouse_look(dx: f32, dy: f32) -> Action {
    Action::LookDelta(Vec2::new(dx, -dy) * MOUSE_LOOK_DEGREES_PER_PIXEL)
}
