use glam::Vec2;

/// Free-fly camera translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDir {
    Rise,
    Drop,
    Left,
    Right,
    Forward,
    Back,
}

/// Free-fly camera rotation in fixed steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookDir {
    Up,
    Down,
    Left,
    Right,
}

/// A high-level action produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Step the free-fly camera.
    Move(MoveDir),
    /// Turn the free-fly camera one step.
    Look(LookDir),
    /// Turn the free-fly camera by (yaw, pitch) degrees.
    LookDelta(Vec2),
    /// Orbit the town; turns follow mode off.
    ToggleOrbit,
    /// Freeze or resume the orbit.
    ToggleOrbitPause,
    /// Ride along with the first vehicle; turns orbit mode off.
    ToggleFollow,
    /// Show or hide the inspector overlay.
    ToggleInspector,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_move_is_constructible() {
        let a = Action::Move(MoveDir::Forward);
        assert!(matches!(a, Action::Move(MoveDir::Forward)));
    }

    #[test]
    fn action_look_delta_carries_degrees() {
        let a = Action::LookDelta(Vec2::new(1.5, -2.0));
        assert!(matches!(a, Action::LookDelta(d) if d.x == 1.5));
    }
}
