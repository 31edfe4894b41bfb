//! The platformer hero
//!
//! Movement is budgeted rather than ballistic: holding jump rises at a
//! fixed speed until a fixed height has been spent, then the hero falls at
//! the same speed until something seats them. Releasing jump mid-air
//! forfeits the rest of the budget until the next landing.

use crate::sprites::SpriteBank;
use macroquad::prelude::*;

pub const WIDTH: f32 = 16.0;
pub const HEIGHT: f32 = 15.0;

/// Pixels per second, both axes
const MOVE_SPEED: f32 = 120.0;
/// Total rise per jump in pixels
const MAX_JUMP_HEIGHT: f32 = 45.0;
const FRAME_DURATION: f32 = 0.25;

pub struct Hero {
    pub hitbox: Rect,
    x_speed: f32,
    y_speed: f32,
    /// Rise spent on the current jump
    jump_risen: f32,
    /// No more rising until the next landing
    jump_spent: bool,
    grounded: bool,
    facing_left: bool,
    animation_timer: f32,
}

impl Hero {
    pub fn new(position: Vec2) -> Self {
        Self {
            hitbox: Rect::new(position.x, position.y, WIDTH, HEIGHT),
            x_speed: 0.0,
            y_speed: 0.0,
            jump_risen: 0.0,
            jump_spent: false,
            grounded: false,
            facing_left: false,
            animation_timer: 0.0,
        }
    }

    /// Apply one frame of input-driven movement.
    /// Returns true when a jump starts this frame (for the sound).
    pub fn update(&mut self, delta: f32, left: bool, right: bool, jump: bool) -> bool {
        self.animation_timer += delta;

        self.x_speed = if right {
            self.facing_left = false;
            MOVE_SPEED
        } else if left {
            self.facing_left = true;
            -MOVE_SPEED
        } else {
            0.0
        };

        let mut jump_started = false;
        if jump && !self.jump_spent {
            jump_started = self.y_speed != -MOVE_SPEED;
            self.y_speed = -MOVE_SPEED;
            self.jump_risen += MOVE_SPEED * delta;
            self.jump_spent = self.jump_risen > MAX_JUMP_HEIGHT;
        } else {
            self.y_speed = MOVE_SPEED;
            // Once airborne, no second wind until landed
            self.jump_spent = self.jump_risen > 0.0;
        }

        self.grounded = false;
        self.hitbox.x += self.x_speed * delta;
        self.hitbox.y += self.y_speed * delta;
        jump_started
    }

    /// Called when collision seats the hero on something.
    pub fn landed(&mut self) {
        self.jump_spent = false;
        self.jump_risen = 0.0;
        self.y_speed = 0.0;
        self.grounded = true;
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.hitbox.x = position.x;
        self.hitbox.y = position.y;
    }

    /// Keep the hero inside the level. The bottom edge counts as ground.
    pub fn clamp_to_level(&mut self, level_width: f32, level_height: f32) {
        if self.hitbox.x < 0.0 {
            self.hitbox.x = 0.0;
        } else if self.hitbox.x + self.hitbox.w > level_width {
            self.hitbox.x = level_width - self.hitbox.w;
        }

        if self.hitbox.y + self.hitbox.h > level_height {
            self.hitbox.y = level_height - self.hitbox.h;
            self.landed();
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn draw(&self, sprites: &SpriteBank) {
        let texture = if !self.grounded {
            &sprites.hero_jump
        } else if self.x_speed != 0.0 {
            let frame = (self.animation_timer / FRAME_DURATION) as usize % 2;
            &sprites.hero_walk[frame]
        } else {
            &sprites.hero_stand
        };

        draw_texture_ex(
            texture,
            self.hitbox.x,
            self.hitbox.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(WIDTH, HEIGHT)),
                flip_x: self.facing_left,
                ..Default::default()
            },
        );
    }

    pub fn draw_debug(&self) {
        draw_rectangle_lines(
            self.hitbox.x,
            self.hitbox.y,
            self.hitbox.w,
            self.hitbox.h,
            1.0,
            RED,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walks_right_and_left() {
        let mut hero = Hero::new(vec2(100.0, 100.0));
        hero.update(0.1, false, true, false);
        assert!(hero.hitbox.x > 100.0);
        let x = hero.hitbox.x;
        hero.update(0.1, true, false, false);
        assert!(hero.hitbox.x < x);
    }

    #[test]
    fn test_jump_rises_until_budget_spent() {
        let mut hero = Hero::new(vec2(100.0, 100.0));
        hero.landed();

        let mut peak = hero.hitbox.y;
        // Hold jump well past the budget
        for _ in 0..60 {
            hero.update(1.0 / 60.0, false, false, true);
            peak = peak.min(hero.hitbox.y);
        }
        let risen = 100.0 - peak;
        assert!(risen > 0.0);
        // One frame of rise past the cap is the most the budget allows
        assert!(risen <= MAX_JUMP_HEIGHT + MOVE_SPEED / 60.0 + 0.001);
        // After the budget, the hero is falling
        let y = hero.hitbox.y;
        hero.update(1.0 / 60.0, false, false, true);
        assert!(hero.hitbox.y > y);
    }

    #[test]
    fn test_release_forfeits_remaining_budget() {
        let mut hero = Hero::new(vec2(100.0, 100.0));
        hero.landed();
        hero.update(0.1, false, false, true);
        assert!(hero.hitbox.y < 100.0);

        // Let go, then press again while still airborne
        hero.update(0.1, false, false, false);
        let y = hero.hitbox.y;
        hero.update(0.1, false, false, true);
        assert!(hero.hitbox.y > y); // still falling
    }

    #[test]
    fn test_landing_restores_the_jump() {
        let mut hero = Hero::new(vec2(100.0, 100.0));
        hero.landed();
        for _ in 0..30 {
            hero.update(1.0 / 60.0, false, false, true);
        }
        hero.landed();
        let y = hero.hitbox.y;
        hero.update(1.0 / 60.0, false, false, true);
        assert!(hero.hitbox.y < y);
    }

    #[test]
    fn test_level_clamp_grounds_at_bottom() {
        let mut hero = Hero::new(vec2(-5.0, 500.0));
        hero.clamp_to_level(640.0, 480.0);
        assert_eq!(hero.hitbox.x, 0.0);
        assert_eq!(hero.hitbox.y, 480.0 - HEIGHT);
        assert!(hero.is_grounded());

        hero.hitbox.x = 700.0;
        hero.clamp_to_level(640.0, 480.0);
        assert_eq!(hero.hitbox.x, 640.0 - WIDTH);
    }
}
