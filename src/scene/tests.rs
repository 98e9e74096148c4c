use super::*;
use approx::assert_relative_eq;
use glam::{Vec3, Vec4Swizzles};

fn test_scene() -> Scene {
    Scene::new(
        Camera::new(Vec3::new(0.0, 0.0, 3.0), 800.0 / 600.0),
        PointLight::fixed(Vec3::new(0.5, 1.0, 0.3)),
        1000.0,
    )
}

#[test]
fn test_transform_new() {
    let transform = Transform::new();
    assert_eq!(transform.position, Vec3::ZERO);
    assert_eq!(transform.scale, Vec3::ONE);
}

#[test]
fn test_transform_matrix() {
    let transform = Transform::at(Vec3::new(1.0, 2.0, 3.0), 2.0);
    let matrix = transform.to_matrix();
    assert_eq!(matrix.col(3).xyz(), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(matrix.col(0).x, 2.0);
    assert_eq!(matrix.col(1).y, 2.0);
    assert_eq!(matrix.col(2).z, 2.0);

    // Scale happens before translation
    assert_eq!(matrix.transform_point3(Vec3::X), Vec3::new(3.0, 2.0, 3.0));
}

#[test]
fn test_ground_and_marker_transforms() {
    let scene = test_scene();

    let ground = scene.ground_transform().to_matrix();
    assert_eq!(ground.transform_point3(Vec3::new(1.0, 1.0, 0.0)), Vec3::new(1000.0, 1000.0, 0.0));

    let marker = scene.light_marker_transform();
    assert_eq!(marker.position, Vec3::new(0.5, 1.0, 0.3));
    assert_eq!(marker.scale, Vec3::splat(LIGHT_MARKER_SCALE));
}

#[test]
fn test_no_input_is_idempotent() {
    let mut scene = test_scene();
    let before = scene.camera.clone();

    for _ in 0..120 {
        assert_eq!(scene.update(1.0 / 60.0), FrameSignal::Continue);
    }

    assert_eq!(scene.camera, before);
}

#[test]
fn test_forward_hold_moves_speed_times_time() {
    let mut scene = test_scene();
    scene.camera.yaw = -60.0;
    scene.camera.pitch = 20.0;
    let front = scene.camera.front();
    let start = scene.camera.position;

    scene.input.process_key(Movement::Forward.key(), true);
    scene.update(0.5);

    let expected = start + front * camera::SPEED * 0.5;
    assert_relative_eq!(scene.camera.position.x, expected.x, epsilon = 1e-4);
    assert_relative_eq!(scene.camera.position.y, expected.y, epsilon = 1e-4);
    assert_relative_eq!(scene.camera.position.z, expected.z, epsilon = 1e-4);
}

#[test]
fn test_movement_is_frame_rate_independent() {
    let mut one_step = test_scene();
    let mut two_steps = test_scene();
    for scene in [&mut one_step, &mut two_steps] {
        scene.input.process_key(Movement::Forward.key(), true);
        scene.input.process_key(Movement::Right.key(), true);
    }

    one_step.update(0.2);
    two_steps.update(0.1);
    two_steps.update(0.1);

    let (a, b) = (one_step.camera.position, two_steps.camera.position);
    assert_relative_eq!(a.x, b.x, epsilon = 1e-4);
    assert_relative_eq!(a.y, b.y, epsilon = 1e-4);
    assert_relative_eq!(a.z, b.z, epsilon = 1e-4);
}

#[test]
fn test_first_mouse_sample_does_not_rotate() {
    let mut scene = test_scene();
    scene.input.process_mouse_motion(812.0, -455.0);

    scene.update(0.016);
    assert_eq!(scene.camera.yaw, -90.0);
    assert_eq!(scene.camera.pitch, 0.0);

    scene.input.process_mouse_motion(10.0, -5.0);
    scene.update(0.016);
    assert_relative_eq!(scene.camera.yaw, -88.0, epsilon = 1e-4);
    assert_relative_eq!(scene.camera.pitch, 1.0, epsilon = 1e-4);
}

#[test]
fn test_refocus_reprimes_mouse() {
    let mut scene = test_scene();
    scene.input.process_mouse_motion(1.0, 1.0);
    scene.update(0.016);

    scene.set_focused(false);
    scene.input.process_mouse_motion(300.0, 300.0);
    scene.set_focused(true);
    scene.update(0.016);

    assert_eq!(scene.camera.yaw, -90.0);
    assert_eq!(scene.camera.pitch, 0.0);
}

#[test]
fn test_unfocused_scene_ignores_input() {
    let mut scene = test_scene();
    scene.input.process_wheel(5.0);
    scene.set_focused(false);
    scene.input.process_key(Movement::Forward.key(), true);

    let before = scene.camera.clone();
    assert_eq!(scene.update(1.0), FrameSignal::Continue);
    assert_eq!(scene.camera, before);
}

#[test]
fn test_escape_requests_close() {
    let mut scene = test_scene();
    scene.input.process_key(KeyCode::Escape, true);
    assert_eq!(scene.update(0.016), FrameSignal::CloseRequested);
}

#[test]
fn test_escape_tap_between_frames_requests_close() {
    let mut scene = test_scene();
    scene.input.process_key(KeyCode::Escape, true);
    scene.input.process_key(KeyCode::Escape, false);
    assert_eq!(scene.update(0.016), FrameSignal::CloseRequested);

    // The tap is consumed by the frame that saw it.
    assert_eq!(scene.update(0.016), FrameSignal::Continue);
}

#[test]
fn test_scroll_while_unfocused_is_not_applied_after_refocus() {
    let mut scene = test_scene();
    scene.set_focused(false);
    scene.input.process_wheel(20.0);
    scene.update(0.016);

    scene.set_focused(true);
    scene.update(0.016);
    assert_relative_eq!(scene.camera.fov, 45.0);
}

#[test]
fn test_wheel_zooms_camera() {
    let mut scene = test_scene();
    scene.input.process_wheel(5.0);
    scene.update(0.016);
    assert_relative_eq!(scene.camera.fov, 40.0);

    // Consumed; the next frame leaves fov alone.
    scene.update(0.016);
    assert_relative_eq!(scene.camera.fov, 40.0);
}

#[test]
fn test_scene_resize() {
    let mut scene = test_scene();
    let original_aspect = scene.camera.aspect;

    scene.resize(1600, 900);
    assert!((scene.camera.aspect - 1600.0 / 900.0).abs() < f32::EPSILON);
    assert!((scene.camera.aspect - original_aspect).abs() > f32::EPSILON);
    assert_eq!(scene.camera.position, Vec3::new(0.0, 0.0, 3.0));
}

#[test_log::test]
fn test_orbiting_light_moves_marker() {
    let mut scene = Scene::new(
        Camera::new(Vec3::new(0.0, 0.0, 3.0), 1.0),
        PointLight::orbiting(Vec3::new(0.5, 1.0, 0.3)),
        1000.0,
    );
    let before = scene.light_marker_transform().position;
    scene.update(1.0);
    assert_ne!(scene.light_marker_transform().position, before);
}
