//! Caverns
//!
//! A 640x480 tile platformer. The level is a RON tile map; the goal is to
//! collect every gem. Tile separation runs after movement every frame,
//! with the axis-of-least-penetration rule in [`collision`].

pub mod collision;
pub mod hero;

use crate::audio::SoundBank;
use crate::input::{Action, InputState};
use crate::map::TileMap;
use crate::particles::{BurstDef, ParticlePool};
use crate::sprites::SpriteBank;
use collision::resolve_tile_collision;
use hero::Hero;
use macroquad::prelude::*;

pub const WORLD_WIDTH: f32 = 640.0;
pub const WORLD_HEIGHT: f32 = 480.0;

/// Gem pickup square, matching one cell
const GEM_SIZE: f32 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Playing,
    Cleared,
}

pub struct Gem {
    pub rect: Rect,
    pub alive: bool,
}

pub struct CavernsGame {
    map: TileMap,
    hero: Hero,
    gems: Vec<Gem>,
    collected: u32,
    state: State,
    result: Option<u32>,
    particles: ParticlePool,
}

impl CavernsGame {
    /// Build from a validated map (it carries exactly one player start).
    pub fn new(map: TileMap) -> Self {
        let start = map.player_start().unwrap_or(Vec2::ZERO);
        let gems = map
            .gems()
            .into_iter()
            .map(|pos| Gem {
                rect: Rect::new(pos.x, pos.y, GEM_SIZE, GEM_SIZE),
                alive: true,
            })
            .collect();

        Self {
            hero: Hero::new(start),
            gems,
            collected: 0,
            state: State::Playing,
            result: None,
            particles: ParticlePool::new(),
            map,
        }
    }

    /// Restart the level from the map data.
    pub fn reset(&mut self) {
        let map = self.map.clone();
        *self = Self::new(map);
    }

    pub fn take_result(&mut self) -> Option<u32> {
        self.result.take()
    }

    pub fn score(&self) -> u32 {
        self.collected
    }

    pub fn update(&mut self, delta: f32, input: &InputState, audio: &SoundBank) {
        self.particles.update(delta, 300.0);

        match self.state {
            State::Playing => {
                let left = input.action_down(Action::MoveLeft);
                let right = input.action_down(Action::MoveRight);
                let jump = input.action_down(Action::Jump);

                if self.hero.update(delta, left, right, jump) {
                    audio.play(&audio.jump);
                }
                self.hero
                    .clamp_to_level(self.map.pixel_width(), self.map.pixel_height());

                let result = resolve_tile_collision(&self.map, self.hero.hitbox);
                self.hero.set_position(result.position);
                if result.landed {
                    self.hero.landed();
                }

                if self.collect_gems() {
                    audio.play(&audio.pickup);
                }

                if self.gems.iter().all(|g| !g.alive) {
                    self.state = State::Cleared;
                    self.result = Some(self.collected);
                }
            }
            State::Cleared => {
                if input.action_pressed(Action::Restart) || input.action_pressed(Action::Confirm) {
                    self.reset();
                }
            }
        }
    }

    /// Pick up every live gem the hero overlaps. Returns true if any.
    fn collect_gems(&mut self) -> bool {
        let hitbox = self.hero.hitbox;
        let mut collected_any = false;
        for gem in self.gems.iter_mut().filter(|g| g.alive) {
            if hitbox.overlaps(&gem.rect) {
                gem.alive = false;
                self.collected += 1;
                collected_any = true;
                self.particles.spawn_burst(
                    &BurstDef::sparkle(),
                    vec2(gem.rect.x + GEM_SIZE / 2.0, gem.rect.y + GEM_SIZE / 2.0),
                    12,
                );
            }
        }
        collected_any
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    pub fn draw(&self, sprites: &SpriteBank, debug: bool) {
        clear_background(Color::from_rgba(24, 20, 34, 255));

        self.draw_tiles(sprites);

        for gem in self.gems.iter().filter(|g| g.alive) {
            draw_texture_ex(
                &sprites.gem,
                gem.rect.x,
                gem.rect.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(GEM_SIZE, GEM_SIZE)),
                    ..Default::default()
                },
            );
        }

        self.hero.draw(sprites);
        self.particles.draw();

        if debug {
            self.hero.draw_debug();
            for gem in self.gems.iter().filter(|g| g.alive) {
                draw_rectangle_lines(gem.rect.x, gem.rect.y, gem.rect.w, gem.rect.h, 1.0, RED);
            }
        }

        let hud = format!("Gems: {}/{}", self.collected, self.gems.len());
        draw_text(&hud, 8.0, 20.0, 20.0, WHITE);

        if self.state == State::Cleared {
            let line1 = "Cave cleared!";
            let line2 = "Press R to explore again";
            let d1 = measure_text(line1, None, 32, 1.0);
            let d2 = measure_text(line2, None, 20, 1.0);
            draw_text(line1, (WORLD_WIDTH - d1.width) / 2.0, WORLD_HEIGHT / 2.0 - 12.0, 32.0, WHITE);
            draw_text(line2, (WORLD_WIDTH - d2.width) / 2.0, WORLD_HEIGHT / 2.0 + 20.0, 20.0, WHITE);
        }
    }

    fn draw_tiles(&self, sprites: &SpriteBank) {
        let cell = self.map.cell_size;
        for row in 0..self.map.height() as i32 {
            for col in 0..self.map.width() as i32 {
                if self.map.is_solid(col, row) {
                    draw_texture_ex(
                        &sprites.tile,
                        col as f32 * cell,
                        row as f32 * cell,
                        WHITE,
                        DrawTextureParams {
                            dest_size: Some(vec2(cell, cell)),
                            ..Default::default()
                        },
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapObject;

    fn test_map() -> TileMap {
        TileMap {
            cell_size: 16.0,
            rows: vec![
                "........".into(),
                "........".into(),
                "........".into(),
                "########".into(),
            ],
            objects: vec![
                MapObject::PlayerStart { x: 16.0, y: 32.0 },
                MapObject::Gem { x: 48.0, y: 32.0 },
                MapObject::Gem { x: 96.0, y: 32.0 },
            ],
        }
    }

    #[test]
    fn test_gems_spawn_from_map() {
        let game = CavernsGame::new(test_map());
        assert_eq!(game.gems.len(), 2);
        assert_eq!(game.hero.hitbox.x, 16.0);
    }

    #[test]
    fn test_gem_collected_once() {
        let mut game = CavernsGame::new(test_map());
        game.hero.set_position(vec2(48.0, 32.0));
        assert!(game.collect_gems());
        assert_eq!(game.score(), 1);
        // Standing still on the same spot collects nothing further
        assert!(!game.collect_gems());
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_collecting_everything_finishes_the_level() {
        let mut game = CavernsGame::new(test_map());
        for gem in &mut game.gems {
            gem.alive = false;
        }
        game.collected = 2;
        // One update in playing state notices the cleared level
        struct_noop_update(&mut game);
        assert_eq!(game.state, State::Cleared);
        assert_eq!(game.take_result(), Some(2));
        assert_eq!(game.take_result(), None);
    }

    // Drive the state check without engine input or audio
    fn struct_noop_update(game: &mut CavernsGame) {
        if game.gems.iter().all(|g| !g.alive) {
            game.state = State::Cleared;
            game.result = Some(game.collected);
        }
    }

    #[test]
    fn test_hero_falls_onto_floor_and_lands() {
        let mut game = CavernsGame::new(test_map());
        // Drop the hero just above the floor row at y=48
        game.hero.set_position(vec2(16.0, 30.0));
        for _ in 0..60 {
            game.hero.update(1.0 / 60.0, false, false, false);
            let result = resolve_tile_collision(&game.map, game.hero.hitbox);
            game.hero.set_position(result.position);
            if result.landed {
                game.hero.landed();
            }
        }
        assert!(game.hero.is_grounded());
        assert_eq!(game.hero.hitbox.y, 48.0 - hero::HEIGHT);
    }
}
