use crate::event::WindowEvent;
use crate::window::Canvas;
use glamx::{Mat4, Vec2, Vec3, Vec4, Vec4Swizzles};

/// Trait that all camera implementations must implement.
///
/// Cameras control the viewpoint from which the cube is rendered. The
/// renderer reads [`transformation()`](Self::transformation) and
/// [`eye()`](Self::eye) once per frame.
pub trait Camera3d {
    /// Handles window events to update camera state.
    ///
    /// # Arguments
    /// * `canvas` - Reference to the rendering canvas, to query button states
    /// * `event` - The window event to handle
    fn handle_event(&mut self, canvas: &Canvas, event: &WindowEvent);

    /// Returns the camera's position in world space.
    fn eye(&self) -> Vec3;

    /// The view matrix (world space → camera space).
    fn view_matrix(&self) -> Mat4;

    /// The projection matrix (camera space → normalized device coordinates).
    fn projection_matrix(&self) -> Mat4;

    /// The combined projection and view matrix, i.e. the model-view-projection
    /// matrix of an object placed at the world origin.
    fn transformation(&self) -> Mat4;

    /// The inverse of [`transformation()`](Self::transformation).
    fn inverse_transformation(&self) -> Mat4;

    /// Returns the near and far clipping plane distances.
    fn clip_planes(&self) -> (f32, f32);

    /// Updates the camera state for the current frame.
    ///
    /// Called once at the beginning of each frame, after the events were handled.
    #[inline]
    fn update(&mut self, _canvas: &Canvas) {}

    /// Projects a 3D point in world coordinates to 2D screen coordinates.
    ///
    /// The result is in pixels with the origin at the top-left corner.
    fn project(&self, world_coord: Vec3, size: Vec2) -> Vec2 {
        let h_normalized_coord = self.transformation() * world_coord.extend(1.0);
        let normalized_coord = h_normalized_coord.xyz() / h_normalized_coord.w;

        Vec2::new(
            (1.0 + normalized_coord.x) * size.x / 2.0,
            (1.0 - normalized_coord.y) * size.y / 2.0,
        )
    }

    /// Unprojects a 2D screen point to a 3D ray in world space.
    ///
    /// # Arguments
    /// * `window_coord` - The 2D point in pixels (origin at top-left)
    /// * `size` - The size of the viewport in pixels
    ///
    /// # Returns
    /// A tuple `(origin, direction)` where `origin` lies on the near plane and
    /// `direction` is normalized.
    fn unproject(&self, window_coord: Vec2, size: Vec2) -> (Vec3, Vec3) {
        let normalized_coord = Vec2::new(
            2.0 * window_coord.x / size.x - 1.0,
            1.0 - 2.0 * window_coord.y / size.y,
        );

        // wgpu depth range is [0, 1].
        let normalized_begin = Vec4::new(normalized_coord.x, normalized_coord.y, 0.0, 1.0);
        let normalized_end = Vec4::new(normalized_coord.x, normalized_coord.y, 1.0, 1.0);

        let cam = self.inverse_transformation();

        let h_unprojected_begin = cam * normalized_begin;
        let h_unprojected_end = cam * normalized_end;

        let unprojected_begin = h_unprojected_begin.xyz() / h_unprojected_begin.w;
        let unprojected_end = h_unprojected_end.xyz() / h_unprojected_end.w;

        (
            unprojected_begin,
            (unprojected_end - unprojected_begin).normalize(),
        )
    }
}
