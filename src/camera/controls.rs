//! Trackball camera controller.
//!
//! Dragging rotates the camera around its target as if rolling a ball
//! under the cursor. Zoom and pan work on normalized screen coordinates.
//! Motion is accumulated by input handlers and applied in [`update`],
//! which eases it out over several frames unless static moving is on.
//!
//! [`update`]: TrackballControls::update

use glam::{Quat, Vec2, Vec3};

use super::core::Camera;
use crate::input::MouseButton;
use crate::options::ControlsOptions;

/// Squared eye movement below which an update does not count as a change.
const CHANGE_EPS: f32 = 1e-6;

/// Zoom accumulated per wheel line.
const WHEEL_STEP: f32 = 0.03;

/// Pixel rectangle the controller maps pointer positions against.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenRect {
    /// Left edge in pixels.
    pub left: f32,
    /// Top edge in pixels.
    pub top: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl ScreenRect {
    /// Whether either dimension is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    None,
    Rotate,
    Zoom,
    Pan,
}

/// Orbit, zoom and pan around the camera target.
#[derive(Debug, Clone)]
pub struct TrackballControls {
    options: ControlsOptions,
    screen: ScreenRect,

    state: State,
    prev_state: State,

    rotate_start: Vec3,
    rotate_end: Vec3,
    zoom_start: Vec2,
    zoom_end: Vec2,
    pan_start: Vec2,
    pan_end: Vec2,

    /// Key whose press is being tracked; other presses wait for its release.
    held_key: Option<String>,
    last_position: Vec3,
}

impl TrackballControls {
    /// Controller with the given tuning and an empty screen rect.
    #[must_use]
    pub fn new(options: ControlsOptions) -> Self {
        Self {
            options,
            screen: ScreenRect::default(),
            state: State::None,
            prev_state: State::None,
            rotate_start: Vec3::ZERO,
            rotate_end: Vec3::ZERO,
            zoom_start: Vec2::ZERO,
            zoom_end: Vec2::ZERO,
            pan_start: Vec2::ZERO,
            pan_end: Vec2::ZERO,
            held_key: None,
            last_position: Vec3::ZERO,
        }
    }

    /// Replace the tuning without touching in-flight motion.
    pub fn apply_options(&mut self, options: ControlsOptions) {
        self.options = options;
    }

    /// Current tuning.
    #[must_use]
    pub fn options(&self) -> &ControlsOptions {
        &self.options
    }

    /// Tracked screen rect.
    #[must_use]
    pub fn screen(&self) -> ScreenRect {
        self.screen
    }

    /// Track a new viewport size anchored at the origin.
    pub fn handle_resize(&mut self, width: u32, height: u32) {
        self.screen = ScreenRect {
            left: 0.0,
            top: 0.0,
            width: width as f32,
            height: height as f32,
        };
    }

    /// Whether a drag or key mode is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state != State::None
    }

    fn mouse_on_screen(&self, x: f32, y: f32) -> Vec2 {
        if self.screen.is_empty() {
            return Vec2::ZERO;
        }
        Vec2::new(
            (x - self.screen.left) / self.screen.width,
            (y - self.screen.top) / self.screen.height,
        )
    }

    /// Project a pointer position onto the virtual ball around the target,
    /// expressed in world space.
    fn mouse_on_ball(&self, camera: &Camera, x: f32, y: f32) -> Vec3 {
        if self.screen.is_empty() {
            return Vec3::ZERO;
        }
        let half_w = self.screen.width * 0.5;
        let half_h = self.screen.height * 0.5;
        let mut ball = Vec3::new(
            (x - half_w - self.screen.left) / half_w,
            (half_h + self.screen.top - y) / half_h,
            0.0,
        );
        let length = ball.truncate().length();
        if self.options.no_roll {
            ball.z = if length < std::f32::consts::FRAC_1_SQRT_2 {
                (1.0 - length * length).sqrt()
            } else {
                0.5 / length
            };
        } else if length > 1.0 {
            ball = ball.normalize();
        } else {
            ball.z = (1.0 - length * length).sqrt();
        }

        let eye = camera.eye - camera.target;
        let up = camera.up;
        with_length(up, ball.y) + with_length(up.cross(eye), ball.x) + with_length(eye, ball.z)
    }

    /// Start a drag. Ignored while another mode is already active.
    pub fn pointer_down(&mut self, camera: &Camera, button: MouseButton, x: f32, y: f32) {
        if self.state == State::None {
            self.state = match button {
                MouseButton::Left => State::Rotate,
                MouseButton::Middle => State::Zoom,
                MouseButton::Right => State::Pan,
            };
        }
        match self.state {
            State::Rotate if !self.options.no_rotate => {
                self.rotate_start = self.mouse_on_ball(camera, x, y);
                self.rotate_end = self.rotate_start;
            }
            State::Zoom if !self.options.no_zoom => {
                self.zoom_start = self.mouse_on_screen(x, y);
                self.zoom_end = self.zoom_start;
            }
            State::Pan if !self.options.no_pan => {
                self.pan_start = self.mouse_on_screen(x, y);
                self.pan_end = self.pan_start;
            }
            _ => {}
        }
    }

    /// Move the end point of the active drag.
    pub fn pointer_move(&mut self, camera: &Camera, x: f32, y: f32) {
        match self.state {
            State::Rotate if !self.options.no_rotate => {
                self.rotate_end = self.mouse_on_ball(camera, x, y);
            }
            State::Zoom if !self.options.no_zoom => self.zoom_end = self.mouse_on_screen(x, y),
            State::Pan if !self.options.no_pan => self.pan_end = self.mouse_on_screen(x, y),
            _ => {}
        }
    }

    /// End the active drag.
    pub fn pointer_up(&mut self) {
        self.state = State::None;
    }

    /// Accumulate wheel zoom; positive `lines` zoom in.
    pub fn wheel(&mut self, lines: f32) {
        if self.options.no_zoom {
            return;
        }
        self.zoom_start.y += lines * WHEEL_STEP;
    }

    /// Enter the mode bound to `code` while it is held.
    ///
    /// Presses are ignored until the tracked key is released, so auto-repeat
    /// and overlapping keys cannot overwrite the state to restore.
    pub fn key_down(&mut self, code: &str) {
        if self.held_key.is_some() {
            return;
        }
        self.held_key = Some(code.to_owned());
        self.prev_state = self.state;
        if self.state != State::None {
            return;
        }
        if code == self.options.rotate_key && !self.options.no_rotate {
            self.state = State::Rotate;
        } else if code == self.options.zoom_key && !self.options.no_zoom {
            self.state = State::Zoom;
        } else if code == self.options.pan_key && !self.options.no_pan {
            self.state = State::Pan;
        }
    }

    /// Leave the key-held mode. Releases of untracked keys are ignored.
    pub fn key_up(&mut self, code: &str) {
        if self.held_key.as_deref() != Some(code) {
            return;
        }
        self.held_key = None;
        self.state = self.prev_state;
    }

    fn rotate(&mut self, eye: &mut Vec3, up: &mut Vec3) {
        let (start_len, end_len) = (self.rotate_start.length(), self.rotate_end.length());
        if start_len == 0.0 || end_len == 0.0 {
            return;
        }
        let cos = (self.rotate_start.dot(self.rotate_end) / start_len / end_len).clamp(-1.0, 1.0);
        let angle = cos.acos();
        let axis = self.rotate_start.cross(self.rotate_end).normalize_or_zero();
        if angle == 0.0 || axis == Vec3::ZERO {
            return;
        }

        let rotation = Quat::from_axis_angle(axis, -angle * self.options.rotate_speed);
        *eye = rotation * *eye;
        *up = rotation * *up;
        self.rotate_end = rotation * self.rotate_end;

        if self.options.static_moving {
            self.rotate_start = self.rotate_end;
        } else {
            let damping =
                Quat::from_axis_angle(axis, angle * (self.options.dynamic_damping_factor - 1.0));
            self.rotate_start = damping * self.rotate_start;
        }
    }

    fn zoom(&mut self, eye: &mut Vec3) {
        let factor = 1.0 + (self.zoom_end.y - self.zoom_start.y) * self.options.zoom_speed;
        if factor != 1.0 && factor > 0.0 {
            *eye *= factor;
            if self.options.static_moving {
                self.zoom_start = self.zoom_end;
            } else {
                self.zoom_start.y +=
                    (self.zoom_end.y - self.zoom_start.y) * self.options.dynamic_damping_factor;
            }
        }
    }

    fn pan(&mut self, eye: Vec3, up: Vec3, target: &mut Vec3) -> Vec3 {
        let change = self.pan_end - self.pan_start;
        if change.length_squared() == 0.0 {
            return Vec3::ZERO;
        }
        let change = change * eye.length() * self.options.pan_speed;
        let offset = with_length(eye.cross(up), change.x) + with_length(up, change.y);
        *target += offset;

        if self.options.static_moving {
            self.pan_start = self.pan_end;
        } else {
            self.pan_start += (self.pan_end - self.pan_start) * self.options.dynamic_damping_factor;
        }
        offset
    }

    fn clamp_distance(&self, eye: Vec3) -> Vec3 {
        if self.options.no_zoom && self.options.no_pan {
            return eye;
        }
        let length = eye.length();
        if length > self.options.max_distance {
            with_length(eye, self.options.max_distance)
        } else if length < self.options.min_distance {
            with_length(eye, self.options.min_distance)
        } else {
            eye
        }
    }

    /// Apply pending motion to the camera and report whether it moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let mut eye = camera.eye - camera.target;
        let mut up = camera.up;
        let mut target = camera.target;

        if !self.options.no_rotate {
            self.rotate(&mut eye, &mut up);
        }
        if !self.options.no_zoom {
            self.zoom(&mut eye);
        }
        if !self.options.no_pan {
            let _ = self.pan(eye, up, &mut target);
        }

        let eye = self.clamp_distance(eye);
        camera.target = target;
        camera.eye = target + eye;
        camera.up = up.normalize_or_zero();
        if camera.up == Vec3::ZERO {
            camera.up = Vec3::Y;
        }

        if self.last_position.distance_squared(camera.eye) > CHANGE_EPS {
            self.last_position = camera.eye;
            true
        } else {
            false
        }
    }
}

fn with_length(v: Vec3, length: f32) -> Vec3 {
    v.normalize_or_zero() * length
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CameraOptions;

    fn setup(static_moving: bool) -> (TrackballControls, Camera) {
        let options = ControlsOptions {
            static_moving,
            ..ControlsOptions::default()
        };
        let mut controls = TrackballControls::new(options);
        controls.handle_resize(800, 600);
        let camera = Camera::from_options(&CameraOptions::default(), 800.0 / 600.0);
        (controls, camera)
    }

    #[test]
    fn first_update_reports_change_then_settles() {
        let (mut controls, mut camera) = setup(false);
        assert!(controls.update(&mut camera));
        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn rotation_preserves_distance() {
        let (mut controls, mut camera) = setup(true);
        let _ = controls.update(&mut camera);
        let distance = camera.distance();
        controls.pointer_down(&camera, MouseButton::Left, 400.0, 300.0);
        controls.pointer_move(&camera, 500.0, 320.0);
        assert!(controls.update(&mut camera));
        controls.pointer_up();
        assert!((camera.distance() - distance).abs() < 1e-2);
        assert!(camera.target.length() < 1e-5);
    }

    #[test]
    fn dynamic_rotation_eases_out() {
        let (mut controls, mut camera) = setup(false);
        let _ = controls.update(&mut camera);
        controls.pointer_down(&camera, MouseButton::Left, 400.0, 300.0);
        controls.pointer_move(&camera, 600.0, 300.0);
        controls.pointer_up();
        let mut frames = 0;
        while controls.update(&mut camera) {
            frames += 1;
            assert!(frames < 1000);
        }
        assert!(frames > 1);
    }

    #[test]
    fn wheel_up_moves_closer() {
        let (mut controls, mut camera) = setup(true);
        let _ = controls.update(&mut camera);
        let distance = camera.distance();
        controls.wheel(1.0);
        assert!(controls.update(&mut camera));
        assert!(camera.distance() < distance);
    }

    #[test]
    fn pan_moves_target_with_eye() {
        let (mut controls, mut camera) = setup(true);
        let _ = controls.update(&mut camera);
        let offset = camera.eye - camera.target;
        controls.pointer_down(&camera, MouseButton::Right, 400.0, 300.0);
        controls.pointer_move(&camera, 450.0, 300.0);
        assert!(controls.update(&mut camera));
        assert!(camera.target.length() > 0.0);
        assert!((camera.eye - camera.target - offset).length() < 1e-3);
    }

    #[test]
    fn key_hold_selects_mode() {
        let (mut controls, mut camera) = setup(true);
        let _ = controls.update(&mut camera);
        let distance = camera.distance();
        controls.key_down("KeyS");
        controls.pointer_down(&camera, MouseButton::Left, 400.0, 300.0);
        controls.pointer_move(&camera, 400.0, 200.0);
        assert!(controls.update(&mut camera));
        assert!(camera.distance() < distance);
        controls.pointer_up();
        controls.key_up("KeyS");
        assert!(!controls.is_active());
    }

    #[test]
    fn overlapping_keys_release_to_idle() {
        let (mut controls, mut camera) = setup(true);
        let _ = controls.update(&mut camera);
        let eye = camera.eye;
        controls.key_down("KeyS");
        controls.key_down("KeyA");
        controls.key_up("KeyA");
        assert!(controls.is_active());
        controls.key_up("KeyS");
        assert!(!controls.is_active());

        controls.pointer_move(&camera, 400.0, 300.0);
        controls.pointer_move(&camera, 400.0, 100.0);
        assert!(!controls.update(&mut camera));
        assert_eq!(camera.eye, eye);
    }

    #[test]
    fn repeated_key_down_releases_once() {
        let (mut controls, _) = setup(true);
        controls.key_down("KeyS");
        controls.key_down("KeyS");
        controls.key_up("KeyS");
        assert!(!controls.is_active());
    }

    #[test]
    fn locked_zoom_ignores_wheel() {
        let (mut controls, mut camera) = setup(true);
        let mut options = controls.options().clone();
        options.no_zoom = true;
        controls.apply_options(options);
        let _ = controls.update(&mut camera);
        controls.wheel(3.0);
        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn max_distance_clamps() {
        let (mut controls, mut camera) = setup(true);
        let mut options = controls.options().clone();
        options.max_distance = 100.0;
        controls.apply_options(options);
        assert!(controls.update(&mut camera));
        assert!((camera.distance() - 100.0).abs() < 1e-3);
    }
}
