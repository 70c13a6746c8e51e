/*
 * Camera Module
 *
 * Orbit camera for the 3D scene. Dragging rotates around the scene center,
 * the wheel dollies in and out, and project() maps world points onto the
 * screen with a depth scale for sprite sizing.
 */

use nannou::prelude::*;

// Points closer than this to the eye plane are culled.
const NEAR_PLANE: f32 = 0.1;

pub struct Camera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub focal_length: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub is_dragging: bool,
    last_cursor_pos: Vec2,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            yaw: 0.6,
            pitch: -0.35,
            distance: 30.0,
            focal_length: 600.0,
            min_distance: 5.0,
            max_distance: 120.0,
            is_dragging: false,
            last_cursor_pos: Vec2::ZERO,
        }
    }

    // Transform a world point into view space; the eye sits on the positive
    // view z-axis looking toward the origin.
    pub fn view_transform(&self, world: Vec3) -> Vec3 {
        let rotation = Mat3::from_rotation_x(self.pitch) * Mat3::from_rotation_y(self.yaw);
        let mut view = rotation * world;
        view.z += self.distance;
        view
    }

    // Project a world point to screen coordinates plus a perspective scale
    // factor. Returns None for points at or behind the near plane.
    pub fn project(&self, world: Vec3, window_rect: Rect) -> Option<(Vec2, f32)> {
        let view = self.view_transform(world);
        if view.z <= NEAR_PLANE {
            return None;
        }
        let scale = self.focal_length / view.z;
        Some((vec2(view.x, view.y) * scale + window_rect.xy(), scale))
    }

    // Start rotating the view
    pub fn start_drag(&mut self, position: Vec2) {
        self.last_cursor_pos = position;
        self.is_dragging = true;
    }

    // Update orientation while dragging
    pub fn drag(&mut self, position: Vec2) {
        if self.is_dragging {
            let delta = position - self.last_cursor_pos;

            if delta.length_squared() > 0.0 {
                self.yaw += delta.x * 0.005;
                self.pitch = (self.pitch - delta.y * 0.005)
                    .clamp(-std::f32::consts::FRAC_PI_2 + 0.01, std::f32::consts::FRAC_PI_2 - 0.01);
                self.last_cursor_pos = position;
            }
        }
    }

    // End rotating
    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }

    // Handle mouse wheel events for dollying
    pub fn zoom(&mut self, scroll_delta: Vec2) {
        let factor = 1.0 - scroll_delta.y * 0.1;
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn window() -> Rect {
        Rect::from_x_y_w_h(0.0, 0.0, 1280.0, 720.0)
    }

    #[test]
    fn scene_center_projects_to_window_center() {
        let camera = Camera::new();
        let (screen, scale) = camera.project(Vec3::ZERO, window()).unwrap();
        assert_relative_eq!(screen.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(screen.y, 0.0, epsilon = 1e-4);
        assert_relative_eq!(scale, camera.focal_length / camera.distance, epsilon = 1e-4);
    }

    #[test]
    fn nearer_points_get_larger_scales() {
        let mut camera = Camera::new();
        camera.yaw = 0.0;
        camera.pitch = 0.0;
        // With no rotation the view axis is world z.
        let (_, near_scale) = camera.project(vec3(0.0, 0.0, -5.0), window()).unwrap();
        let (_, far_scale) = camera.project(vec3(0.0, 0.0, 5.0), window()).unwrap();
        assert!(near_scale > far_scale);
    }

    #[test]
    fn points_behind_the_eye_are_culled() {
        let mut camera = Camera::new();
        camera.yaw = 0.0;
        camera.pitch = 0.0;
        camera.distance = 10.0;
        assert!(camera.project(vec3(0.0, 0.0, -20.0), window()).is_none());
    }

    #[test]
    fn zoom_respects_the_distance_clamp() {
        let mut camera = Camera::new();
        for _ in 0..100 {
            camera.zoom(vec2(0.0, 5.0));
        }
        assert_relative_eq!(camera.distance, camera.min_distance);
        for _ in 0..200 {
            camera.zoom(vec2(0.0, -5.0));
        }
        assert_relative_eq!(camera.distance, camera.max_distance);
    }

    #[test]
    fn drag_updates_orientation_only_while_active() {
        let mut camera = Camera::new();
        let yaw_before = camera.yaw;
        camera.drag(vec2(50.0, 0.0));
        assert_eq!(camera.yaw, yaw_before);

        camera.start_drag(vec2(0.0, 0.0));
        camera.drag(vec2(50.0, 0.0));
        assert!(camera.yaw > yaw_before);
        camera.end_drag();
    }
}
