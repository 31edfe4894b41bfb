//! Flappy
//!
//! One-button dodging in a 480x640 portrait world. A run starts from the
//! title overlay, ends on the first touch of a column, and hands its score
//! to the shell before returning to the overlay.

pub mod bee;
pub mod column;

use crate::audio::SoundBank;
use crate::input::{Action, InputState};
use crate::particles::{BurstDef, ParticlePool};
use crate::sprites::SpriteBank;
use bee::Bee;
use column::ColumnPair;
use macroquad::prelude::*;

pub const WORLD_WIDTH: f32 = 480.0;
pub const WORLD_HEIGHT: f32 = 640.0;

/// A new pair spawns once the newest is this far inside the right edge
const SPAWN_DISTANCE: f32 = 200.0;
const STAR_COUNT: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Playing,
}

pub struct FlappyGame {
    state: State,
    bee: Bee,
    columns: Vec<ColumnPair>,
    score: u32,
    /// Score of the last finished run, shown on the overlay
    last_score: Option<u32>,
    result: Option<u32>,
    particles: ParticlePool,
    stars: Vec<Vec2>,
}

impl FlappyGame {
    pub fn new() -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| {
                vec2(
                    macroquad::rand::gen_range(0.0, WORLD_WIDTH),
                    macroquad::rand::gen_range(0.0, WORLD_HEIGHT),
                )
            })
            .collect();

        Self {
            state: State::Start,
            bee: Bee::new(Self::start_position()),
            columns: Vec::new(),
            score: 0,
            last_score: None,
            result: None,
            particles: ParticlePool::new(),
            stars,
        }
    }

    fn start_position() -> Vec2 {
        vec2(WORLD_WIDTH / 4.0, WORLD_HEIGHT / 2.0)
    }

    pub fn reset(&mut self) {
        self.state = State::Start;
        self.bee = Bee::new(Self::start_position());
        self.columns.clear();
        self.score = 0;
        self.particles.clear();
    }

    pub fn take_result(&mut self) -> Option<u32> {
        self.result.take()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn update(&mut self, delta: f32, input: &InputState, audio: &SoundBank) {
        self.particles.update(delta, 400.0);

        let tapped =
            input.action_pressed(Action::Jump) || is_mouse_button_pressed(MouseButton::Left);

        match self.state {
            State::Start => {
                if tapped {
                    self.begin_run();
                    audio.play(&audio.flap);
                }
            }
            State::Playing => {
                if tapped {
                    self.bee.flap();
                    audio.play(&audio.flap);
                }

                self.bee.update(delta);
                self.bee.clamp_to_world(WORLD_HEIGHT);

                self.maintain_columns();
                for column in &mut self.columns {
                    column.update(delta);
                }

                if self.claim_passed_column() {
                    audio.play(&audio.score);
                }

                if self.check_collision() {
                    audio.play(&audio.crash);
                    self.particles
                        .spawn_burst(&BurstDef::feathers(), self.bee.position, 24);
                    self.finish_run();
                }
            }
        }
    }

    fn begin_run(&mut self) {
        self.bee = Bee::new(Self::start_position());
        self.bee.flap();
        self.columns.clear();
        self.score = 0;
        self.state = State::Playing;
    }

    fn finish_run(&mut self) {
        self.last_score = Some(self.score);
        self.result = Some(self.score);
        self.state = State::Start;
        self.columns.clear();
        self.bee = Bee::new(Self::start_position());
    }

    /// Spawn a pair when none exist or the newest has scrolled far enough
    /// in; drop the oldest once it has fully left the screen.
    fn maintain_columns(&mut self) {
        match self.columns.last() {
            None => self
                .columns
                .push(ColumnPair::spawn(WORLD_WIDTH, WORLD_HEIGHT)),
            Some(newest) if newest.x < WORLD_WIDTH - SPAWN_DISTANCE => self
                .columns
                .push(ColumnPair::spawn(WORLD_WIDTH, WORLD_HEIGHT)),
            _ => {}
        }

        if let Some(oldest) = self.columns.first() {
            if oldest.is_off_screen() {
                self.columns.remove(0);
            }
        }
    }

    /// Score the oldest unclaimed pair once its columns fall behind the bee.
    fn claim_passed_column(&mut self) -> bool {
        let bee_x = self.bee.position.x;
        if let Some(column) = self.columns.iter_mut().find(|c| !c.is_claimed()) {
            if column.x < bee_x {
                column.claim();
                self.score += 1;
                return true;
            }
        }
        false
    }

    fn check_collision(&self) -> bool {
        self.columns
            .iter()
            .any(|c| c.collides(&self.bee, WORLD_HEIGHT))
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    pub fn draw(&self, sprites: &SpriteBank, best: u32, debug: bool) {
        clear_background(Color::from_rgba(10, 12, 28, 255));
        for star in &self.stars {
            draw_circle(star.x, star.y, 1.0, Color::from_rgba(200, 200, 220, 160));
        }

        for column in &self.columns {
            column.draw(WORLD_HEIGHT);
        }
        self.bee.draw(sprites);
        self.particles.draw();

        if debug {
            self.bee.draw_debug();
            for column in &self.columns {
                column.draw_debug(WORLD_HEIGHT);
            }
        }

        match self.state {
            State::Playing => {
                let text = self.score.to_string();
                let dims = measure_text(&text, None, 40, 1.0);
                draw_text(
                    &text,
                    (WORLD_WIDTH - dims.width) / 2.0,
                    WORLD_HEIGHT / 5.0,
                    40.0,
                    WHITE,
                );
            }
            State::Start => self.draw_overlay(best),
        }
    }

    fn draw_overlay(&self, best: u32) {
        let title = "FLAPPY";
        let dims = measure_text(title, None, 64, 1.0);
        draw_text(
            title,
            (WORLD_WIDTH - dims.width) / 2.0,
            WORLD_HEIGHT / 4.0,
            64.0,
            Color::from_rgba(246, 214, 86, 255),
        );

        let prompt = "Tap or press Space to fly";
        let dims = measure_text(prompt, None, 24, 1.0);
        draw_text(
            prompt,
            (WORLD_WIDTH - dims.width) / 2.0,
            WORLD_HEIGHT * 0.7,
            24.0,
            WHITE,
        );

        let mut y = WORLD_HEIGHT * 0.7 + 32.0;
        if let Some(last) = self.last_score {
            let text = format!("Last run: {}", last);
            let dims = measure_text(&text, None, 24, 1.0);
            draw_text(
                &text,
                (WORLD_WIDTH - dims.width) / 2.0,
                y,
                24.0,
                Color::from_rgba(180, 180, 190, 255),
            );
            y += 28.0;
        }
        if best > 0 {
            let text = format!("Best: {}", best);
            let dims = measure_text(&text, None, 24, 1.0);
            draw_text(
                &text,
                (WORLD_WIDTH - dims.width) / 2.0,
                y,
                24.0,
                Color::from_rgba(180, 180, 190, 255),
            );
        }
    }
}

impl Default for FlappyGame {
    fn default() -> Self {
        Self::new()
    }
}
