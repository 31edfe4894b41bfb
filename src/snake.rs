//! Snake
//!
//! Grid snake on a 20x15 board of 32 px cells. The head advances once per
//! movement tick, the body trails it by relocating the tail, and crossing
//! an edge wraps to the far side. Running into yourself ends the run.

use crate::audio::SoundBank;
use crate::input::{Action, InputState};
use crate::sprites::SpriteBank;
use macroquad::prelude::*;

pub const WORLD_WIDTH: f32 = 640.0;
pub const WORLD_HEIGHT: f32 = 480.0;

const CELL: f32 = 32.0;
const COLS: i32 = (WORLD_WIDTH / CELL) as i32;
const ROWS: i32 = (WORLD_HEIGHT / CELL) as i32;

/// Seconds between movement ticks
const MOVE_TIME: f32 = 0.3;
const POINTS_PER_APPLE: u32 = 20;

const GAME_OVER_TEXT: &str = "Game over! Press Space to restart";

/// A board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Playing,
    GameOver,
}

pub struct SnakeGame {
    state: State,
    head: Cell,
    prev_head: Cell,
    direction: Direction,
    /// One steering decision per movement tick
    direction_set: bool,
    body: Vec<Cell>,
    apple: Option<Cell>,
    timer: f32,
    score: u32,
    /// Final score of a just-finished run, picked up by the shell
    result: Option<u32>,
}

impl SnakeGame {
    pub fn new() -> Self {
        Self {
            state: State::Playing,
            head: Cell::new(0, 0),
            prev_head: Cell::new(0, 0),
            direction: Direction::Right,
            direction_set: false,
            body: Vec::new(),
            apple: None,
            timer: MOVE_TIME,
            score: 0,
            result: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The shell polls this once per frame; a finished run reports its
    /// score exactly once.
    pub fn take_result(&mut self) -> Option<u32> {
        self.result.take()
    }

    pub fn update(&mut self, delta: f32, input: &InputState, audio: &SoundBank) {
        match self.state {
            State::Playing => {
                if input.action_down(Action::MoveLeft) {
                    self.steer(Direction::Left);
                }
                if input.action_down(Action::MoveRight) {
                    self.steer(Direction::Right);
                }
                if input.action_down(Action::MoveUp) {
                    self.steer(Direction::Up);
                }
                if input.action_down(Action::MoveDown) {
                    self.steer(Direction::Down);
                }

                self.timer -= delta;
                if self.timer <= 0.0 {
                    self.timer = MOVE_TIME;
                    self.advance();
                    if self.state == State::GameOver {
                        audio.play(&audio.crash);
                    }
                }

                if self.try_eat() {
                    audio.play(&audio.eat);
                }
                if self.state == State::Playing && self.apple.is_none() {
                    self.place_apple();
                }
            }
            State::GameOver => {
                if input.action_pressed(Action::Confirm) {
                    self.reset();
                }
            }
        }
    }

    /// Accept a steering decision. Only the first change per tick counts,
    /// and a snake with a body cannot reverse into itself.
    pub fn steer(&mut self, new_direction: Direction) {
        if self.direction_set || self.direction == new_direction {
            return;
        }
        self.direction_set = true;
        if self.body.is_empty() || new_direction != self.direction.opposite() {
            self.direction = new_direction;
        }
    }

    /// One movement tick: move the head with wrap-around, trail the body,
    /// then check for self-collision.
    pub fn advance(&mut self) {
        self.prev_head = self.head;
        let (dc, dr) = self.direction.delta();
        self.head = Cell::new(
            (self.head.col + dc).rem_euclid(COLS),
            (self.head.row + dr).rem_euclid(ROWS),
        );

        // The tail cell becomes the new first segment behind the head
        if !self.body.is_empty() {
            self.body.remove(0);
            self.body.push(self.prev_head);
        }

        if self.body.contains(&self.head) {
            self.finish();
        }
        self.direction_set = false;
    }

    /// Grow and score when the head sits on the apple.
    pub fn try_eat(&mut self) -> bool {
        if self.apple == Some(self.head) {
            self.body.insert(0, self.head);
            self.score += POINTS_PER_APPLE;
            self.apple = None;
            true
        } else {
            false
        }
    }

    /// Drop the apple on a random free cell. A board with no free cell
    /// left is a finished run.
    pub fn place_apple(&mut self) {
        let free = self.free_cells();
        if free.is_empty() {
            self.finish();
            return;
        }
        let idx = macroquad::rand::gen_range(0, free.len());
        self.apple = Some(free[idx]);
    }

    fn free_cells(&self) -> Vec<Cell> {
        let mut cells = Vec::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                let cell = Cell::new(col, row);
                if cell != self.head && !self.body.contains(&cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    fn finish(&mut self) {
        self.state = State::GameOver;
        self.result = Some(self.score);
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.state == State::GameOver
    }

    pub fn head(&self) -> Cell {
        self.head
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn apple(&self) -> Option<Cell> {
        self.apple
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    pub fn draw(&self, sprites: &SpriteBank, debug: bool) {
        clear_background(Color::from_rgba(12, 16, 12, 255));
        self.draw_grid();

        if let Some(apple) = self.apple {
            draw_cell_texture(&sprites.apple, apple);
        }
        for part in &self.body {
            // The head covers a freshly grown segment for one tick
            if *part != self.head {
                draw_cell_texture(&sprites.snake_body, *part);
            }
        }
        draw_cell_texture(&sprites.snake_head, self.head);

        if debug {
            for part in &self.body {
                draw_rectangle_lines(part.col as f32 * CELL, part.row as f32 * CELL, CELL, CELL, 1.0, RED);
            }
        }

        match self.state {
            State::Playing => {
                draw_text(&self.score.to_string(), 8.0, 24.0, 24.0, WHITE);
            }
            State::GameOver => {
                let line1 = GAME_OVER_TEXT;
                let line2 = format!("Final score: {}", self.score);
                let d1 = measure_text(line1, None, 24, 1.0);
                let d2 = measure_text(&line2, None, 24, 1.0);
                draw_text(line1, (WORLD_WIDTH - d1.width) / 2.0, WORLD_HEIGHT / 2.0 - 16.0, 24.0, WHITE);
                draw_text(&line2, (WORLD_WIDTH - d2.width) / 2.0, WORLD_HEIGHT / 2.0 + 16.0, 24.0, WHITE);
            }
        }
    }

    fn draw_grid(&self) {
        let color = Color::from_rgba(30, 40, 30, 255);
        let mut x = 0.0;
        while x <= WORLD_WIDTH {
            draw_line(x, 0.0, x, WORLD_HEIGHT, 1.0, color);
            x += CELL;
        }
        let mut y = 0.0;
        while y <= WORLD_HEIGHT {
            draw_line(0.0, y, WORLD_WIDTH, y, 1.0, color);
            y += CELL;
        }
    }
}

fn draw_cell_texture(texture: &Texture2D, cell: Cell) {
    draw_texture_ex(
        texture,
        cell.col as f32 * CELL,
        cell.row as f32 * CELL,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(CELL, CELL)),
            ..Default::default()
        },
    );
}

impl Default for SnakeGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_moves_right_and_wraps() {
        let mut game = SnakeGame::new();
        for _ in 0..COLS {
            game.advance();
        }
        // One full lap lands back on the start column
        assert_eq!(game.head(), Cell::new(0, 0));
        assert!(!game.is_over());
    }

    #[test]
    fn test_wrap_left_from_origin() {
        let mut game = SnakeGame::new();
        game.steer(Direction::Up);
        game.advance();
        assert_eq!(game.head(), Cell::new(0, ROWS - 1));
    }

    #[test]
    fn test_steer_locks_until_next_tick() {
        let mut game = SnakeGame::new();
        game.steer(Direction::Up);
        game.steer(Direction::Down);
        assert_eq!(game.direction, Direction::Up);

        game.advance();
        game.steer(Direction::Left);
        assert_eq!(game.direction, Direction::Left);
    }

    #[test]
    fn test_no_reversal_with_body() {
        let mut game = SnakeGame::new();
        game.apple = Some(Cell::new(0, 0));
        assert!(game.try_eat());
        assert_eq!(game.score(), POINTS_PER_APPLE);

        game.steer(Direction::Left);
        // Reversal refused, still heading right
        assert_eq!(game.direction, Direction::Right);
    }

    #[test]
    fn test_reversal_allowed_without_body() {
        let mut game = SnakeGame::new();
        game.steer(Direction::Left);
        assert_eq!(game.direction, Direction::Left);
    }

    #[test]
    fn test_body_trails_previous_head_cells() {
        let mut game = SnakeGame::new();
        game.apple = Some(Cell::new(0, 0));
        game.try_eat();

        game.advance();
        assert_eq!(game.head(), Cell::new(1, 0));
        assert_eq!(game.body(), &[Cell::new(0, 0)]);

        game.advance();
        assert_eq!(game.head(), Cell::new(2, 0));
        assert_eq!(game.body(), &[Cell::new(1, 0)]);
    }

    #[test]
    fn test_eating_grows_by_one() {
        let mut game = SnakeGame::new();
        for i in 0..3 {
            game.apple = Some(game.head());
            assert!(game.try_eat());
            assert_eq!(game.body().len(), i + 1);
            game.advance();
        }
        assert_eq!(game.score(), 3 * POINTS_PER_APPLE);
    }

    #[test]
    fn test_apple_never_lands_on_snake() {
        let mut game = SnakeGame::new();
        // Grow a few segments around the head
        for _ in 0..4 {
            game.apple = Some(game.head());
            game.try_eat();
            game.advance();
        }
        for _ in 0..50 {
            game.apple = None;
            game.place_apple();
            let apple = game.apple().unwrap();
            assert_ne!(apple, game.head());
            assert!(!game.body().contains(&apple));
        }
    }

    #[test]
    fn test_self_collision_ends_the_run() {
        let mut game = SnakeGame::new();
        // Grow long enough to turn into
        for _ in 0..5 {
            game.apple = Some(game.head());
            game.try_eat();
            game.advance();
        }
        // Tight clockwise turn back into the trail
        game.steer(Direction::Down);
        game.advance();
        game.steer(Direction::Left);
        game.advance();
        game.steer(Direction::Up);
        game.advance();
        assert!(game.is_over());
        assert_eq!(game.take_result(), Some(game.score()));
        assert_eq!(game.take_result(), None);
    }
}
