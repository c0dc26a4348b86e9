//! GPU-free behaviour of the viewer: mesh data, camera control and key commands.

use cubeview::camera::{Camera3d, OrbitCamera3d};
use cubeview::clock::FrameClock;
use cubeview::event::{Action, Key};
use cubeview::glamx::{Vec2, Vec3};
use cubeview::procedural;
use cubeview::render_mode::{command_for_key, KeyCommand, RenderMode};
use cubeview::window::{CanvasSetup, NumSamples, DEFAULT_SCREENSHOT_PATH};

#[test]
fn cube_mesh_is_closed_and_consistent() {
    let mesh = procedural::cube();

    assert_eq!(mesh.num_vertices(), 24);
    assert_eq!(mesh.faces.len(), 12);
    assert_eq!(mesh.flat_indices().len(), 36);
    assert_eq!(mesh.edges().len(), 30);

    for (coord, normal) in mesh.coords.iter().zip(mesh.normals.iter()) {
        // Every vertex lies on the face its normal points out of.
        assert!((coord.dot(*normal) - 1.0).abs() < 1.0e-6);
        assert!(coord.abs().max_element() <= 1.0);
    }
}

#[test]
fn holding_w_then_releasing_it_is_a_momentary_wireframe() {
    let mut mode = RenderMode::default();
    let mut screenshots = 0;

    let keys = [
        (Key::W, Action::Press),
        (Key::W, Action::Release),
        (Key::P, Action::Press),
        (Key::S, Action::Release),
        (Key::P, Action::Release),
    ];
    let mut seen = Vec::new();

    for (key, action) in keys {
        match command_for_key(key, action) {
            Some(KeyCommand::SetMode(m)) => mode = m,
            Some(KeyCommand::Screenshot) => screenshots += 1,
            None => {}
        }
        seen.push(mode);
    }

    assert_eq!(
        seen,
        vec![
            RenderMode::Wireframe,
            RenderMode::Fill,
            RenderMode::Points,
            RenderMode::Points,
            RenderMode::Fill,
        ]
    );
    assert_eq!(screenshots, 1);
    assert_eq!(DEFAULT_SCREENSHOT_PATH, "screenshot.png");
}

#[test]
fn dragging_and_scrolling_move_the_eye_around_the_cube() {
    let mut camera = OrbitCamera3d::default();
    let initial_eye = camera.eye();
    let initial_dist = camera.dist();

    camera.handle_cursor_moved(Vec2::new(100.0, 100.0), false);
    camera.handle_cursor_moved(Vec2::new(160.0, 100.0), true);
    let rotated_eye = camera.eye();

    assert!((rotated_eye - initial_eye).length() > 1.0e-3);
    assert!((rotated_eye.length() - initial_dist).abs() < 1.0e-4);

    camera.handle_scroll(1.0);
    assert!(camera.dist() < initial_dist);
    camera.handle_scroll(-1.0);
    assert!((camera.dist() - initial_dist).abs() < 1.0e-4);

    // The cube stays in view whatever the orientation.
    let center = camera.project(Vec3::ZERO, Vec2::new(800.0, 600.0));
    assert!((center - Vec2::new(400.0, 300.0)).length() < 1.0e-2);
}

#[test]
fn time_starts_at_zero_and_moves_forward() {
    let mut clock = FrameClock::new();
    let t0 = clock.elapsed_secs();
    let t1 = clock.elapsed_secs();

    assert_eq!(t0, 0.0);
    assert!(t1 >= t0);
}

#[test]
fn canvas_setup_accepts_valid_sample_counts() {
    let setup = CanvasSetup {
        samples: NumSamples::from_u32(4).unwrap(),
        ..CanvasSetup::default()
    };

    assert_eq!(setup.samples as u32, 4);
    assert!(NumSamples::from_u32(5).is_none());
}
