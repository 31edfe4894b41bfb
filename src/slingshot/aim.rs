//! Slingshot aiming
//!
//! Dragging from the anchor pulls the firing point back; releasing
//! launches along the opposite direction. The pull is capped at a fixed
//! length and the launch direction is confined to the up-right quadrant,
//! with out-of-range drags snapping to the nearest legal edge.

use macroquad::prelude::*;

/// Longest allowed pull in pixels
pub const MAX_PULL: f32 = 100.0;
/// Launch speed in meters per second at a reference half pull
pub const MAX_STRENGTH: f32 = 15.0;

const QUARTER: f32 = std::f32::consts::FRAC_PI_2;
const THREE_QUARTERS: f32 = 3.0 * std::f32::consts::FRAC_PI_2;
const TAU: f32 = std::f32::consts::TAU;

/// Pull distance and launch angle for a drag point.
///
/// The angle is measured from +x rising toward the sky and clamped into
/// `0..=PI/2`; drags that would fire downward or backward snap to the
/// nearest legal edge.
pub fn clamp_aim(anchor: Vec2, point: Vec2) -> (f32, f32) {
    let distance = anchor.distance(point).min(MAX_PULL);

    // Direction from the drag point back to the anchor, sky-positive
    let mut angle = f32::atan2(point.y - anchor.y, anchor.x - point.x);
    if angle < 0.0 {
        angle += TAU;
    }
    if angle > QUARTER {
        angle = if angle > THREE_QUARTERS { 0.0 } else { QUARTER };
    }

    (distance, angle)
}

/// Where the firing point sits for a clamped pull.
pub fn firing_point(anchor: Vec2, distance: f32, angle: f32) -> Vec2 {
    vec2(
        anchor.x - distance * angle.cos(),
        anchor.y + distance * angle.sin(),
    )
}

/// Launch velocity in meters per second. Speed scales linearly with the
/// pull; a full pull launches at twice [`MAX_STRENGTH`].
pub fn launch_velocity(distance: f32, angle: f32) -> Vec2 {
    let speed = MAX_STRENGTH * 2.0 * distance / MAX_PULL;
    vec2(speed * angle.cos(), -speed * angle.sin())
}

/// A launched shot: start position in pixels, velocity in meters/second
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub position: Vec2,
    pub velocity: Vec2,
}

pub struct Aim {
    pub anchor: Vec2,
    pub firing: Vec2,
    distance: f32,
    angle: f32,
    pub dragging: bool,
}

impl Aim {
    pub fn new(anchor: Vec2) -> Self {
        Self {
            anchor,
            firing: anchor,
            distance: 0.0,
            angle: 0.0,
            dragging: false,
        }
    }

    /// Track a drag to a point in virtual coordinates.
    pub fn drag_to(&mut self, point: Vec2) {
        self.dragging = true;
        let (distance, angle) = clamp_aim(self.anchor, point);
        self.distance = distance;
        self.angle = angle;
        self.firing = firing_point(self.anchor, distance, angle);
    }

    /// End the drag. A zero pull fires nothing.
    pub fn release(&mut self) -> Option<Launch> {
        self.dragging = false;
        let launch = if self.distance > 0.0 {
            Some(Launch {
                position: self.firing,
                velocity: launch_velocity(self.distance, self.angle),
            })
        } else {
            None
        };
        self.distance = 0.0;
        self.angle = 0.0;
        self.firing = self.anchor;
        launch
    }

    /// The aiming rule: anchor box, firing box, connecting line.
    pub fn draw(&self) {
        let color = Color::from_rgba(240, 240, 235, 200);
        draw_rectangle_lines(self.anchor.x - 5.0, self.anchor.y - 5.0, 10.0, 10.0, 1.0, color);
        draw_rectangle_lines(self.firing.x - 5.0, self.firing.y - 5.0, 10.0, 10.0, 1.0, color);
        draw_line(self.anchor.x, self.anchor.y, self.firing.x, self.firing.y, 1.0, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANCHOR: Vec2 = Vec2::new(160.0, 352.0);

    #[test]
    fn test_pull_distance_is_capped() {
        let (d, _) = clamp_aim(ANCHOR, ANCHOR + vec2(-500.0, 500.0));
        assert_eq!(d, MAX_PULL);
        let (d, _) = clamp_aim(ANCHOR, ANCHOR + vec2(-30.0, 40.0));
        assert_eq!(d, 50.0);
    }

    #[test]
    fn test_down_left_drag_is_legal() {
        // Pulling down-left launches up-right
        let (_, angle) = clamp_aim(ANCHOR, ANCHOR + vec2(-100.0, 100.0));
        assert!((angle - std::f32::consts::FRAC_PI_4).abs() < 1e-5);
    }

    #[test]
    fn test_down_right_drag_snaps_to_straight_up() {
        let (_, angle) = clamp_aim(ANCHOR, ANCHOR + vec2(100.0, 100.0));
        assert_eq!(angle, QUARTER);
    }

    #[test]
    fn test_up_left_drag_snaps_to_horizontal() {
        let (_, angle) = clamp_aim(ANCHOR, ANCHOR + vec2(-100.0, -100.0));
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_firing_point_sits_opposite_the_launch() {
        let p = firing_point(ANCHOR, 100.0, 0.0);
        assert!((p - (ANCHOR + vec2(-100.0, 0.0))).length() < 1e-4);

        let p = firing_point(ANCHOR, 100.0, QUARTER);
        assert!((p - (ANCHOR + vec2(0.0, 100.0))).length() < 1e-4);
    }

    #[test]
    fn test_launch_speed_scales_with_pull() {
        let full = launch_velocity(MAX_PULL, 0.0);
        assert!((full.x - 2.0 * MAX_STRENGTH).abs() < 1e-5);
        assert_eq!(full.y, 0.0);

        let half = launch_velocity(MAX_PULL / 2.0, 0.0);
        assert!((half.x - MAX_STRENGTH).abs() < 1e-5);

        // Straight up launches against +y
        let up = launch_velocity(MAX_PULL, QUARTER);
        assert!(up.y < 0.0);
        assert!(up.x.abs() < 1e-4);
    }

    #[test]
    fn test_release_fires_once_then_resets() {
        let mut aim = Aim::new(ANCHOR);
        aim.drag_to(ANCHOR + vec2(-80.0, 0.0));
        assert!(aim.dragging);

        let launch = aim.release().unwrap();
        assert!(launch.velocity.x > 0.0);
        assert_eq!(launch.position, ANCHOR + vec2(-80.0, 0.0));

        assert!(!aim.dragging);
        assert_eq!(aim.firing, ANCHOR);
        assert!(aim.release().is_none());
    }
}
