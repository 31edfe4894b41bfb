//! The player bee
//!
//! Gravity pulls every frame; a flap replaces the vertical speed with a
//! fixed upward impulse. The collision shape is a circle centered on the
//! sprite.

use crate::sprites::SpriteBank;
use macroquad::prelude::*;

pub const RADIUS: f32 = 24.0;

/// Pixels per second squared, pulling down
const GRAVITY: f32 = 1080.0;
/// Upward speed set by a flap, pixels per second
const FLAP_SPEED: f32 = 300.0;
/// Wing cycle frame time
const FRAME_DURATION: f32 = 0.25;
const FRAME_COUNT: usize = 4;

pub struct Bee {
    pub position: Vec2,
    y_speed: f32,
    animation_time: f32,
}

impl Bee {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            y_speed: 0.0,
            animation_time: 0.0,
        }
    }

    pub fn update(&mut self, delta: f32) {
        self.animation_time += delta;
        self.y_speed += GRAVITY * delta;
        self.position.y += self.y_speed * delta;
    }

    pub fn flap(&mut self) {
        self.y_speed = -FLAP_SPEED;
    }

    /// Keep the whole circle inside the world vertically.
    pub fn clamp_to_world(&mut self, world_height: f32) {
        self.position.y = self.position.y.clamp(RADIUS, world_height - RADIUS);
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.position.x, self.position.y, RADIUS)
    }

    pub fn y_speed(&self) -> f32 {
        self.y_speed
    }

    pub fn frame_index(&self) -> usize {
        (self.animation_time / FRAME_DURATION) as usize % FRAME_COUNT
    }

    pub fn draw(&self, sprites: &SpriteBank) {
        let texture = &sprites.bee_frames[self.frame_index()];
        draw_texture_ex(
            texture,
            self.position.x - RADIUS,
            self.position.y - RADIUS,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(RADIUS * 2.0, RADIUS * 2.0)),
                ..Default::default()
            },
        );
    }

    pub fn draw_debug(&self) {
        draw_circle_lines(self.position.x, self.position.y, RADIUS, 1.0, RED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_accelerates_downward() {
        let mut bee = Bee::new(vec2(120.0, 320.0));
        bee.update(0.1);
        let first_drop = bee.position.y - 320.0;
        let y = bee.position.y;
        bee.update(0.1);
        assert!(bee.position.y - y > first_drop);
    }

    #[test]
    fn test_flap_overrides_fall_speed() {
        let mut bee = Bee::new(vec2(120.0, 320.0));
        bee.update(0.5); // build up downward speed
        bee.flap();
        assert!(bee.y_speed() < 0.0);
        let y = bee.position.y;
        bee.update(0.016);
        assert!(bee.position.y < y);
    }

    #[test]
    fn test_clamp_keeps_circle_inside() {
        let mut bee = Bee::new(vec2(120.0, -50.0));
        bee.clamp_to_world(640.0);
        assert_eq!(bee.position.y, RADIUS);

        bee.position.y = 10_000.0;
        bee.clamp_to_world(640.0);
        assert_eq!(bee.position.y, 640.0 - RADIUS);
    }

    #[test]
    fn test_wing_cycle_loops() {
        let mut bee = Bee::new(Vec2::ZERO);
        assert_eq!(bee.frame_index(), 0);
        bee.animation_time = FRAME_DURATION * 1.5;
        assert_eq!(bee.frame_index(), 1);
        bee.animation_time = FRAME_DURATION * 4.5;
        assert_eq!(bee.frame_index(), 0);
    }
}
