use glam::{Mat4, Vec2, Vec3};
use serde::Serialize;
use tinytown_input::{LookDir, MoveDir};

/// Vertical field of view in degrees.
pub const FOV_Y_DEGREES: f32 = 75.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 1000.0;

const PITCH_LIMIT: f32 = 85.0;
const LOOK_STEP: f32 = 5.0;
const VERTICAL_STEP: f32 = 4.0;
const WALK_STEP: f32 = 2.0;
/// Frames per radian of orbit.
const ORBIT_PERIOD: f32 = 150.0;
const FOLLOW_HEIGHT: f32 = 10.0;

/// Which rule produces the view this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CameraMode {
    Free,
    Orbit,
    Follow,
}

/// Eye, target and up vector of a look-at view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl CameraView {
    pub fn look_at(eye: Vec3, target: Vec3) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Perspective projection for a viewport of the given aspect ratio.
pub fn projection(aspect: f32) -> Mat4 {
    Mat4::perspective_rh(
        FOV_Y_DEGREES.to_radians(),
        aspect.max(f32::EPSILON),
        Z_NEAR,
        Z_FAR,
    )
}

/// Orbit around the plane centre at radius `width`, `frame` frames in.
pub fn orbit_view(frame: u64, width: f32, height: f32) -> CameraView {
    let angle = frame as f32 / ORBIT_PERIOD;
    let eye = Vec3::new(
        width * angle.cos() + width / 2.0,
        width / 2.0,
        width * angle.sin() - height / 2.0,
    );
    CameraView::look_at(eye, Vec3::new(width / 2.0, 0.0, -height / 2.0))
}

/// Ride along at a block-plane `position`, looking one unit along `direction`.
pub fn follow_view(position: Vec2, direction: Vec3) -> CameraView {
    let eye = Vec3::new(position.x, FOLLOW_HEIGHT, -position.y);
    CameraView::look_at(eye, eye + direction)
}

/// Free-fly camera. Angles are kept in degrees.
///
/// Yaw 0 looks down -Z; positive yaw turns towards +X.
#[derive(Debug, Clone, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(50.0, 150.0, 100.0),
            yaw: 20.0,
            pitch: -35.0,
        }
    }
}

impl FlyCamera {
    /// Unit view vector.
    pub fn forward(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(
            yaw.sin() * pitch.cos(),
            pitch.sin(),
            -yaw.cos() * pitch.cos(),
        )
    }

    /// Horizontal strafe direction.
    pub fn right(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        Vec3::new(yaw.cos(), 0.0, yaw.sin())
    }

    pub fn step(&mut self, dir: MoveDir) {
        match dir {
            MoveDir::Rise => self.position.y += VERTICAL_STEP,
            MoveDir::Drop => self.position.y -= VERTICAL_STEP,
            MoveDir::Left => self.position -= self.right() * WALK_STEP,
            MoveDir::Right => self.position += self.right() * WALK_STEP,
            MoveDir::Forward => self.position += self.forward() * WALK_STEP,
            MoveDir::Back => self.position -= self.forward() * WALK_STEP,
        }
    }

    pub fn look(&mut self, dir: LookDir) {
        let delta = match dir {
            LookDir::Up => Vec2::new(0.0, LOOK_STEP),
            LookDir::Down => Vec2::new(0.0, -LOOK_STEP),
            LookDir::Left => Vec2::new(-LOOK_STEP, 0.0),
            LookDir::Right => Vec2::new(LOOK_STEP, 0.0),
        };
        self.rotate(delta);
    }

    /// Turn by (yaw, pitch) degrees.
    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw = (self.yaw + delta.x) % 360.0;
        self.pitch = (self.pitch + delta.y).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn view(&self) -> CameraView {
        CameraView::look_at(self.position, self.position + self.forward())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn default_camera_looks_down_into_town() {
        let cam = FlyCamera::default();
        let f = cam.forward();
        assert!(f.y < 0.0);
        assert!(f.z < 0.0);
        assert!((f.length() - 1.0).abs() < 1e-5);
        let vp = projection(4.0 / 3.0) * cam.view().view_matrix();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn rise_and_drop_move_four_units() {
        let mut cam = FlyCamera::default();
        cam.step(MoveDir::Rise);
        assert_eq!(cam.position.y, 154.0);
        cam.step(MoveDir::Drop);
        cam.step(MoveDir::Drop);
        assert_eq!(cam.position.y, 146.0);
    }

    #[test]
    fn forward_then_back_returns() {
        let mut cam = FlyCamera::default();
        let start = cam.position;
        cam.step(MoveDir::Forward);
        assert!(((cam.position - start).length() - 2.0).abs() < 1e-4);
        cam.step(MoveDir::Back);
        assert!(close(cam.position, start));
    }

    #[test]
    fn strafe_is_horizontal() {
        let mut cam = FlyCamera::default();
        let y = cam.position.y;
        cam.step(MoveDir::Right);
        assert_eq!(cam.position.y, y);
        assert!(cam.right().dot(cam.forward()).abs() < 1e-5);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = FlyCamera::default();
        for _ in 0..100 {
            cam.look(LookDir::Up);
        }
        assert_eq!(cam.pitch, 85.0);
        for _ in 0..100 {
            cam.look(LookDir::Down);
        }
        assert_eq!(cam.pitch, -85.0);
    }

    #[test]
    fn look_left_turns_yaw() {
        let mut cam = FlyCamera::default();
        cam.look(LookDir::Left);
        assert_eq!(cam.yaw, 15.0);
    }

    #[test]
    fn orbit_starts_east_of_centre() {
        let view = orbit_view(0, 300.0, 300.0);
        assert!(close(view.eye, Vec3::new(450.0, 150.0, -150.0)));
        assert!(close(view.target, Vec3::new(150.0, 0.0, -150.0)));
    }

    #[test]
    fn follow_sits_above_vehicle() {
        let view = follow_view(Vec2::new(30.0, 60.0), Vec3::NEG_Z);
        assert!(close(view.eye, Vec3::new(30.0, 10.0, -60.0)));
        assert!(close(view.target, Vec3::new(30.0, 10.0, -61.0)));
    }
}
