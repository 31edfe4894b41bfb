//! Slingshot
//!
//! A 960x544 physics knockdown game. The layout file describes a floor,
//! planks, and round targets; the player drags back from the anchor and
//! releases to lob balls. Targets that take a hard enough hit disappear;
//! clearing all of them finishes the run.

pub mod aim;
pub mod scene;

use crate::audio::SoundBank;
use crate::input::{Action, InputState};
use crate::map::Layout;
use crate::particles::{BurstDef, ParticlePool};
use crate::sprites::SpriteBank;
use aim::Aim;
use macroquad::prelude::*;
use scene::{PhysicsScene, PieceKind, PieceShape};

pub const WORLD_WIDTH: f32 = 960.0;
pub const WORLD_HEIGHT: f32 = 544.0;

/// The slingshot anchor in virtual pixels
const ANCHOR: Vec2 = Vec2::new(160.0, 352.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Playing,
    Cleared,
}

pub struct SlingshotGame {
    layout: Layout,
    scene: PhysicsScene,
    aim: Aim,
    score: u32,
    shots: u32,
    state: State,
    result: Option<u32>,
    particles: ParticlePool,
}

impl SlingshotGame {
    pub fn new(layout: Layout) -> Self {
        let scene = PhysicsScene::from_layout(&layout);
        Self {
            layout,
            scene,
            aim: Aim::new(ANCHOR),
            score: 0,
            shots: 0,
            state: State::Playing,
            result: None,
            particles: ParticlePool::new(),
        }
    }

    /// Rebuild the scene from the layout file data.
    pub fn reset(&mut self) {
        self.scene = PhysicsScene::from_layout(&self.layout);
        self.aim = Aim::new(ANCHOR);
        self.score = 0;
        self.shots = 0;
        self.state = State::Playing;
        self.particles.clear();
    }

    pub fn take_result(&mut self) -> Option<u32> {
        self.result.take()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// `mouse` is the pointer position in virtual coordinates.
    pub fn update(&mut self, delta: f32, input: &InputState, mouse: Vec2, audio: &SoundBank) {
        self.particles.update(delta, 400.0);

        match self.state {
            State::Playing => {
                if is_mouse_button_down(MouseButton::Left) {
                    self.aim.drag_to(mouse);
                } else if self.aim.dragging {
                    if let Some(launch) = self.aim.release() {
                        self.scene.spawn_ball(launch.position, launch.velocity);
                        self.shots += 1;
                        audio.play(&audio.launch);
                    }
                }

                for knockout in self.scene.step(delta) {
                    self.score += 1;
                    self.particles
                        .spawn_burst(&BurstDef::pop(), knockout.position, 16);
                    audio.play(&audio.pop);
                }
                self.scene.cull_balls(WORLD_WIDTH, WORLD_HEIGHT);

                if self.scene.target_count() == 0 {
                    self.state = State::Cleared;
                    self.result = Some(self.score);
                }
            }
            State::Cleared => {
                // Let the debris keep simulating behind the banner
                self.scene.step(delta);
                if input.action_pressed(Action::Restart) || input.action_pressed(Action::Confirm) {
                    self.reset();
                }
            }
        }
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    pub fn draw(&self, sprites: &SpriteBank, debug: bool) {
        clear_background(Color::from_rgba(40, 52, 78, 255));

        for (piece, position, rotation) in self.scene.poses() {
            match (piece.kind, piece.shape) {
                (PieceKind::Floor, PieceShape::Box { half }) => {
                    draw_box(position, half, rotation, Color::from_rgba(60, 70, 64, 255));
                }
                (PieceKind::Plank, PieceShape::Box { half }) => {
                    // Lintels read lighter than uprights
                    let color = if half.x > half.y {
                        Color::from_rgba(170, 126, 76, 255)
                    } else {
                        Color::from_rgba(150, 108, 62, 255)
                    };
                    draw_box(position, half, rotation, color);
                }
                (PieceKind::Target, PieceShape::Disc { radius }) => {
                    draw_disc_texture(&sprites.target, position, radius, rotation);
                }
                (PieceKind::Ball, PieceShape::Disc { radius }) => {
                    draw_disc_texture(&sprites.ball, position, radius, rotation);
                }
                // A mismatched shape never comes out of the builder
                _ => {}
            }

            if debug {
                match piece.shape {
                    PieceShape::Box { half } => draw_box_outline(position, half, rotation, RED),
                    PieceShape::Disc { radius } => {
                        draw_circle_lines(position.x, position.y, radius, 1.0, RED)
                    }
                }
            }
        }

        self.aim.draw();
        self.particles.draw();

        let hud = format!(
            "Targets left: {}   Shots: {}",
            self.scene.target_count(),
            self.shots
        );
        draw_text(&hud, 8.0, 22.0, 22.0, WHITE);

        if self.state == State::Cleared {
            let line1 = format!("All targets down in {} shots!", self.shots);
            let line2 = "Press R to stack them back up";
            let d1 = measure_text(&line1, None, 32, 1.0);
            let d2 = measure_text(line2, None, 20, 1.0);
            draw_text(&line1, (WORLD_WIDTH - d1.width) / 2.0, WORLD_HEIGHT / 2.0 - 12.0, 32.0, WHITE);
            draw_text(line2, (WORLD_WIDTH - d2.width) / 2.0, WORLD_HEIGHT / 2.0 + 20.0, 20.0, WHITE);
        }
    }
}

fn draw_box(center: Vec2, half: Vec2, rotation: f32, color: Color) {
    draw_rectangle_ex(
        center.x,
        center.y,
        half.x * 2.0,
        half.y * 2.0,
        DrawRectangleParams {
            offset: vec2(0.5, 0.5),
            rotation,
            color,
        },
    );
}

fn draw_box_outline(center: Vec2, half: Vec2, rotation: f32, color: Color) {
    let (sin, cos) = rotation.sin_cos();
    let rotate = |p: Vec2| center + vec2(p.x * cos - p.y * sin, p.x * sin + p.y * cos);
    let corners = [
        rotate(vec2(-half.x, -half.y)),
        rotate(vec2(half.x, -half.y)),
        rotate(vec2(half.x, half.y)),
        rotate(vec2(-half.x, half.y)),
    ];
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        draw_line(a.x, a.y, b.x, b.y, 1.0, color);
    }
}

fn draw_disc_texture(texture: &Texture2D, center: Vec2, radius: f32, rotation: f32) {
    draw_texture_ex(
        texture,
        center.x - radius,
        center.y - radius,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(radius * 2.0, radius * 2.0)),
            rotation,
            ..Default::default()
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Disc, Slab};

    fn layout() -> Layout {
        Layout {
            floors: vec![Slab { x: 0.0, y: 512.0, w: 960.0, h: 32.0 }],
            planks: vec![],
            targets: vec![Disc { x: 500.0, y: 496.0, radius: 16.0 }],
        }
    }

    #[test]
    fn test_run_finishes_when_targets_are_gone() {
        let mut game = SlingshotGame::new(layout());
        game.scene.spawn_ball(vec2(350.0, 496.0), vec2(20.0, 0.0));

        for _ in 0..180 {
            for knockout in game.scene.step(1.0 / 60.0) {
                game.score += 1;
                let _ = knockout;
            }
            if game.scene.target_count() == 0 {
                break;
            }
        }
        assert_eq!(game.scene.target_count(), 0);
        assert_eq!(game.score, 1);

        game.state = State::Cleared;
        game.result = Some(game.score);
        assert_eq!(game.take_result(), Some(1));
        assert_eq!(game.take_result(), None);
    }

    #[test]
    fn test_reset_rebuilds_the_scene() {
        let mut game = SlingshotGame::new(layout());
        game.scene.spawn_ball(vec2(350.0, 496.0), vec2(20.0, 0.0));
        game.shots = 5;
        game.score = 1;

        game.reset();
        assert_eq!(game.scene.target_count(), 1);
        assert_eq!(game.scene.ball_count(), 0);
        assert_eq!(game.shots, 0);
        assert_eq!(game.score, 0);
        assert_eq!(game.state, State::Playing);
    }
}
