use crate::camera::Camera3d;
use crate::event::{Action, MouseButton, WindowEvent};
use crate::window::Canvas;
use glamx::{Mat4, Vec2, Vec3};
use std::f32;

/// Vertical field of view of the default camera, in radians (50°).
pub const DEFAULT_FOV_Y: f32 = 50.0 * f32::consts::PI / 180.0;

/// A camera orbiting around a target point.
///
/// # Default Controls
/// - **Left mouse + drag**: rotate around the target
/// - **Mouse wheel**: zoom in / zoom out
///
/// The eye sits at distance `dist` from the target, at the spherical angles
/// `yaw` (around the vertical axis) and `pitch` (from the vertical axis).
///
/// # Example
/// ```
/// # use cubeview::camera::{Camera3d, OrbitCamera3d};
/// # use glamx::Vec3;
/// let mut camera = OrbitCamera3d::new(Vec3::new(0.0, 0.0, 6.0), Vec3::ZERO);
/// camera.zoom(true);
/// assert!(camera.dist() < 6.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrbitCamera3d {
    at: Vec3,
    yaw: f32,
    pitch: f32,
    dist: f32,

    yaw_step: f32,
    pitch_step: f32,
    zoom_factor: f32,
    min_dist: f32,
    max_dist: f32,
    rotate_button: Option<MouseButton>,

    fov: f32,
    znear: f32,
    zfar: f32,
    proj: Mat4,
    view: Mat4,
    proj_view: Mat4,
    inverse_proj_view: Mat4,
    last_cursor_pos: Vec2,
    last_framebuffer_size: Vec2,
}

impl Default for OrbitCamera3d {
    fn default() -> Self {
        OrbitCamera3d::new(Vec3::new(0.0, 2.0, 6.0), Vec3::ZERO)
    }
}

impl OrbitCamera3d {
    /// Creates a new orbit camera with a 50° vertical field of view.
    ///
    /// # Arguments
    /// * `eye` - Initial camera position
    /// * `at` - The point to orbit around
    pub fn new(eye: Vec3, at: Vec3) -> OrbitCamera3d {
        OrbitCamera3d::new_with_frustum(DEFAULT_FOV_Y, 0.1, 1024.0, eye, at)
    }

    /// Creates a new orbit camera with custom frustum parameters.
    ///
    /// # Arguments
    /// * `fov` - Vertical field of view in radians
    /// * `znear` - Near clipping plane distance
    /// * `zfar` - Far clipping plane distance
    /// * `eye` - Initial camera position
    /// * `at` - The point to orbit around
    pub fn new_with_frustum(fov: f32, znear: f32, zfar: f32, eye: Vec3, at: Vec3) -> OrbitCamera3d {
        let mut res = OrbitCamera3d {
            at: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            dist: 0.0,
            yaw_step: 0.005,
            pitch_step: 0.005,
            zoom_factor: 1.1,
            min_dist: 0.5,
            max_dist: 100.0,
            rotate_button: Some(MouseButton::Button1),
            fov,
            znear,
            zfar,
            proj: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            proj_view: Mat4::IDENTITY,
            inverse_proj_view: Mat4::IDENTITY,
            last_cursor_pos: Vec2::ZERO,
            last_framebuffer_size: Vec2::new(800.0, 600.0),
        };

        res.look_at(eye, at);

        res
    }

    /// Changes the orientation and position of the camera to look at the specified point.
    pub fn look_at(&mut self, eye: Vec3, at: Vec3) {
        let offset = eye - at;
        let dist = offset.length();

        self.at = at;
        self.dist = dist.clamp(self.min_dist, self.max_dist);
        self.pitch = if dist > 0.0 {
            (offset.y / dist).acos()
        } else {
            f32::consts::FRAC_PI_2
        };
        self.yaw = offset.z.atan2(offset.x);
        self.update_restrictions();
        self.update_projviews();
    }

    /// The point the camera orbits around.
    #[inline]
    pub fn at(&self) -> Vec3 {
        self.at
    }

    /// The distance between the eye and the target.
    #[inline]
    pub fn dist(&self) -> f32 {
        self.dist
    }

    /// The angle around the vertical axis, in radians.
    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// The angle from the vertical axis, in radians.
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Sets the yaw increment per pixel of mouse movement. The default value is 0.005.
    #[inline]
    pub fn set_yaw_step(&mut self, step: f32) {
        self.yaw_step = step;
    }

    /// Sets the pitch increment per pixel of mouse movement. The default value is 0.005.
    #[inline]
    pub fn set_pitch_step(&mut self, step: f32) {
        self.pitch_step = step;
    }

    /// Sets the distance ratio applied by one zoom step. The default value is 1.1.
    ///
    /// # Panics
    /// If `factor` is not greater than 1.
    #[inline]
    pub fn set_zoom_factor(&mut self, factor: f32) {
        assert!(factor > 1.0, "The zoom factor must be greater than 1.");
        self.zoom_factor = factor;
    }

    /// Sets the closest and farthest distances the camera can zoom to.
    ///
    /// # Panics
    /// If `min` is not positive or `max` is smaller than `min`.
    pub fn set_dist_limits(&mut self, min: f32, max: f32) {
        assert!(min > 0.0 && max >= min, "Invalid camera distance limits.");
        self.min_dist = min;
        self.max_dist = max;
        self.update_restrictions();
        self.update_projviews();
    }

    /// The button used to rotate the camera.
    pub fn rotate_button(&self) -> Option<MouseButton> {
        self.rotate_button
    }

    /// Sets the button used to rotate the camera. Use `None` to disable rotation.
    pub fn rebind_rotate_button(&mut self, new_button: Option<MouseButton>) {
        self.rotate_button = new_button;
    }

    /// Rotates the camera around its target by a cursor displacement, in pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.yaw_step;
        self.pitch += dy * self.pitch_step;

        self.update_restrictions();
        self.update_projviews();
    }

    /// Moves the camera one step closer to (`zoom_in`) or farther from its target.
    pub fn zoom(&mut self, zoom_in: bool) {
        if zoom_in {
            self.dist /= self.zoom_factor;
        } else {
            self.dist *= self.zoom_factor;
        }

        self.update_restrictions();
        self.update_projviews();
    }

    #[doc(hidden)]
    pub fn handle_cursor_moved(&mut self, curr_pos: Vec2, rotating: bool) {
        if rotating {
            let dpos = curr_pos - self.last_cursor_pos;
            self.rotate(dpos.x, dpos.y);
        }

        self.last_cursor_pos = curr_pos;
    }

    #[doc(hidden)]
    pub fn handle_scroll(&mut self, yoff: f32) {
        // Anything but a positive offset zooms out, horizontal scrolls included.
        self.zoom(yoff > 0.0);
    }

    #[doc(hidden)]
    pub fn handle_framebuffer_size(&mut self, width: u32, height: u32) {
        self.last_framebuffer_size = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        self.update_projviews();
    }

    fn update_restrictions(&mut self) {
        self.dist = self.dist.clamp(self.min_dist, self.max_dist);
        self.pitch = self.pitch.clamp(0.01, f32::consts::PI - 0.01);
    }

    fn update_projviews(&mut self) {
        self.view = Mat4::look_at_rh(self.eye(), self.at, Vec3::Y);
        let aspect = self.last_framebuffer_size.x / self.last_framebuffer_size.y;
        self.proj = Mat4::perspective_rh(self.fov, aspect, self.znear, self.zfar);
        self.proj_view = self.proj * self.view;
        self.inverse_proj_view = self.proj_view.inverse();
    }
}

impl Camera3d for OrbitCamera3d {
    fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    fn handle_event(&mut self, canvas: &Canvas, event: &WindowEvent) {
        match *event {
            WindowEvent::CursorPos(x, y, _) => {
                let rotating = self
                    .rotate_button
                    .map_or(false, |button| canvas.get_mouse_button(button) == Action::Press);
                self.handle_cursor_moved(Vec2::new(x as f32, y as f32), rotating);
            }
            WindowEvent::Scroll(_, off, _) => self.handle_scroll(off as f32),
            WindowEvent::FramebufferSize(w, h) => self.handle_framebuffer_size(w, h),
            _ => {}
        }
    }

    fn eye(&self) -> Vec3 {
        let px = self.yaw.cos() * self.pitch.sin();
        let py = self.pitch.cos();
        let pz = self.yaw.sin() * self.pitch.sin();

        self.at + Vec3::new(px, py, pz) * self.dist
    }

    fn view_matrix(&self) -> Mat4 {
        self.view
    }

    fn projection_matrix(&self) -> Mat4 {
        self.proj
    }

    fn transformation(&self) -> Mat4 {
        self.proj_view
    }

    fn inverse_transformation(&self) -> Mat4 {
        self.inverse_proj_view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1.0e-4, "{:?} != {:?}", a, b);
    }

    #[test]
    fn eye_is_recovered_from_look_at() {
        let eye = Vec3::new(3.0, 2.0, -4.0);
        let camera = OrbitCamera3d::new(eye, Vec3::new(0.0, 0.5, 0.0));
        assert_close(camera.eye(), eye);
    }

    #[test]
    fn rotation_keeps_the_distance() {
        let mut camera = OrbitCamera3d::default();
        let dist = (camera.eye() - camera.at()).length();

        camera.rotate(120.0, -45.0);

        assert!(((camera.eye() - camera.at()).length() - dist).abs() < 1.0e-4);
        assert!((camera.yaw() - (f32::consts::FRAC_PI_2 + 0.6)).abs() < 1.0e-5);
    }

    #[test]
    fn pitch_never_reaches_the_poles() {
        let mut camera = OrbitCamera3d::default();

        camera.rotate(0.0, 1.0e6);
        assert!((camera.pitch() - (f32::consts::PI - 0.01)).abs() < 1.0e-6);

        camera.rotate(0.0, -1.0e6);
        assert!((camera.pitch() - 0.01).abs() < 1.0e-6);
    }

    #[test]
    fn dragging_down_increases_the_pitch() {
        let mut camera = OrbitCamera3d::new(Vec3::new(0.0, 0.0, 6.0), Vec3::ZERO);
        let pitch = camera.pitch();

        camera.rotate(0.0, 10.0);
        assert!((camera.pitch() - (pitch + 10.0 * 0.005)).abs() < 1.0e-6);

        camera.handle_cursor_moved(Vec2::new(0.0, 0.0), false);
        camera.handle_cursor_moved(Vec2::new(0.0, -10.0), true);
        assert!((camera.pitch() - pitch).abs() < 1.0e-6);
    }

    #[test]
    fn zoom_steps_are_reversible_and_bounded() {
        let mut camera = OrbitCamera3d::new(Vec3::new(0.0, 0.0, 6.0), Vec3::ZERO);

        camera.zoom(true);
        assert!((camera.dist() - 6.0 / 1.1).abs() < 1.0e-5);
        camera.zoom(false);
        assert!((camera.dist() - 6.0).abs() < 1.0e-5);

        for _ in 0..200 {
            camera.zoom(true);
        }
        assert_eq!(camera.dist(), 0.5);

        for _ in 0..200 {
            camera.zoom(false);
        }
        assert_eq!(camera.dist(), 100.0);
    }

    #[test]
    fn cursor_rotates_only_while_dragging() {
        let mut camera = OrbitCamera3d::default();
        let yaw = camera.yaw();

        camera.handle_cursor_moved(Vec2::new(100.0, 100.0), false);
        assert_eq!(camera.yaw(), yaw);

        camera.handle_cursor_moved(Vec2::new(110.0, 100.0), true);
        assert!((camera.yaw() - (yaw + 10.0 * 0.005)).abs() < 1.0e-6);
    }

    #[test]
    fn scrolling_up_zooms_in() {
        let mut camera = OrbitCamera3d::default();
        let dist = camera.dist();

        camera.handle_scroll(1.0);
        assert!(camera.dist() < dist);
        camera.handle_scroll(-3.0);
        assert!((camera.dist() - dist).abs() < 1.0e-5);
    }

    #[test]
    fn a_zero_scroll_zooms_out() {
        let mut camera = OrbitCamera3d::default();
        let dist = camera.dist();

        camera.handle_scroll(0.0);
        assert!((camera.dist() - dist * 1.1).abs() < 1.0e-4);
    }

    #[test]
    fn target_projects_to_the_viewport_center() {
        let mut camera = OrbitCamera3d::new(Vec3::new(1.0, 4.0, 5.0), Vec3::ZERO);
        camera.handle_framebuffer_size(1024, 768);

        let size = Vec2::new(1024.0, 768.0);
        let center = camera.project(Vec3::ZERO, size);
        assert!((center - size / 2.0).length() < 1.0e-2);

        let (origin, dir) = camera.unproject(size / 2.0, size);
        let to_target = (Vec3::ZERO - origin).normalize();
        assert_close(dir, to_target);
    }
}
