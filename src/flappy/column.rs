//! Scrolling column obstacles
//!
//! A pair of columns grows from the ceiling and the floor with a fixed
//! gap between them. The gap center is randomized at spawn; the pair then
//! scrolls left until it leaves the screen.

use crate::flappy::bee::Bee;
use macroquad::prelude::*;

pub const WIDTH: f32 = 48.0;
/// Vertical opening between the two columns
pub const GAP: f32 = 225.0;
/// Scroll speed, pixels per second
const SCROLL_SPEED: f32 = 120.0;
/// The gap center never gets closer than this to either edge
const EDGE_MARGIN: f32 = 40.0;

pub struct ColumnPair {
    pub x: f32,
    pub gap_center: f32,
    claimed: bool,
}

impl ColumnPair {
    pub fn new(x: f32, gap_center: f32) -> Self {
        Self {
            x,
            gap_center,
            claimed: false,
        }
    }

    /// Spawn just past the right edge with a random gap position.
    pub fn spawn(world_width: f32, world_height: f32) -> Self {
        let min = GAP * 0.5 + EDGE_MARGIN;
        let max = world_height - GAP * 0.5 - EDGE_MARGIN;
        Self::new(world_width + WIDTH, macroquad::rand::gen_range(min, max))
    }

    pub fn update(&mut self, delta: f32) {
        self.x -= SCROLL_SPEED * delta;
    }

    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, WIDTH, self.gap_center - GAP * 0.5)
    }

    pub fn bottom_rect(&self, world_height: f32) -> Rect {
        let top = self.gap_center + GAP * 0.5;
        Rect::new(self.x, top, WIDTH, world_height - top)
    }

    pub fn collides(&self, bee: &Bee, world_height: f32) -> bool {
        let circle = bee.circle();
        circle.overlaps_rect(&self.top_rect()) || circle.overlaps_rect(&self.bottom_rect(world_height))
    }

    pub fn is_off_screen(&self) -> bool {
        self.x < -WIDTH
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed
    }

    /// Mark the pass point as spent so it scores only once.
    pub fn claim(&mut self) {
        self.claimed = true;
    }

    pub fn draw(&self, world_height: f32) {
        let body = Color::from_rgba(70, 160, 90, 255);
        let rim = Color::from_rgba(40, 110, 60, 255);
        for rect in [self.top_rect(), self.bottom_rect(world_height)] {
            draw_rectangle(rect.x, rect.y, rect.w, rect.h, body);
            draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 4.0, rim);
        }
        // Lips at the gap
        draw_rectangle(self.x - 4.0, self.gap_center - GAP * 0.5 - 12.0, WIDTH + 8.0, 12.0, rim);
        draw_rectangle(self.x - 4.0, self.gap_center + GAP * 0.5, WIDTH + 8.0, 12.0, rim);
    }

    pub fn draw_debug(&self, world_height: f32) {
        for rect in [self.top_rect(), self.bottom_rect(world_height)] {
            draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, RED);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rects_leave_the_gap_open() {
        let pair = ColumnPair::new(100.0, 300.0);
        let top = pair.top_rect();
        let bottom = pair.bottom_rect(640.0);
        assert_eq!(top.h, 300.0 - GAP * 0.5);
        assert_eq!(bottom.y, 300.0 + GAP * 0.5);
        assert_eq!(bottom.bottom(), 640.0);
        assert_eq!(bottom.y - top.bottom(), GAP);
    }

    #[test]
    fn test_bee_in_gap_does_not_collide() {
        let pair = ColumnPair::new(100.0, 300.0);
        let bee = Bee::new(vec2(124.0, 300.0));
        assert!(!pair.collides(&bee, 640.0));
    }

    #[test]
    fn test_bee_in_column_collides() {
        let pair = ColumnPair::new(100.0, 300.0);
        let high = Bee::new(vec2(124.0, 60.0));
        let low = Bee::new(vec2(124.0, 600.0));
        assert!(pair.collides(&high, 640.0));
        assert!(pair.collides(&low, 640.0));
    }

    #[test]
    fn test_scrolls_left_until_off_screen() {
        let mut pair = ColumnPair::new(0.0, 300.0);
        assert!(!pair.is_off_screen());
        pair.update(1.0);
        assert!(pair.x < 0.0);
        while !pair.is_off_screen() {
            pair.update(1.0);
        }
        assert!(pair.x < -WIDTH);
    }

    #[test]
    fn test_spawn_respects_margins() {
        for _ in 0..50 {
            let pair = ColumnPair::spawn(480.0, 640.0);
            assert_eq!(pair.x, 480.0 + WIDTH);
            assert!(pair.gap_center >= GAP * 0.5 + EDGE_MARGIN);
            assert!(pair.gap_center <= 640.0 - GAP * 0.5 - EDGE_MARGIN);
        }
    }
}
