//! Application state
//!
//! A fixed set of games, each with its own persistent state. The menu
//! launches one at a time; leaving a game keeps its state alive until the
//! next launch resets it.

use crate::audio::SoundBank;
use crate::caverns::CavernsGame;
use crate::flappy::FlappyGame;
use crate::input::InputState;
use crate::map::{Layout, TileMap};
use crate::scores::ScoreTable;
use crate::slingshot::SlingshotGame;
use crate::snake::SnakeGame;

/// The games on the shelf (fixed set, one menu row each)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameId {
    Snake = 0,
    Flappy = 1,
    Caverns = 2,
    Slingshot = 3,
}

impl GameId {
    pub const ALL: [GameId; 4] = [
        GameId::Snake,
        GameId::Flappy,
        GameId::Caverns,
        GameId::Slingshot,
    ];

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            GameId::Snake => "Snake",
            GameId::Flappy => "Flappy",
            GameId::Caverns => "Caverns",
            GameId::Slingshot => "Slingshot",
        }
    }

    /// One-line pitch under the menu label
    pub fn tagline(&self) -> &'static str {
        match self {
            GameId::Snake => "Eat apples, avoid your own tail",
            GameId::Flappy => "One button, endless columns",
            GameId::Caverns => "Collect every gem in the cave",
            GameId::Slingshot => "Knock the targets off their perch",
        }
    }

    /// Virtual resolution the game renders at
    pub fn world_size(&self) -> (u32, u32) {
        match self {
            GameId::Snake => (
                crate::snake::WORLD_WIDTH as u32,
                crate::snake::WORLD_HEIGHT as u32,
            ),
            GameId::Flappy => (
                crate::flappy::WORLD_WIDTH as u32,
                crate::flappy::WORLD_HEIGHT as u32,
            ),
            GameId::Caverns => (
                crate::caverns::WORLD_WIDTH as u32,
                crate::caverns::WORLD_HEIGHT as u32,
            ),
            GameId::Slingshot => (
                crate::slingshot::WORLD_WIDTH as u32,
                crate::slingshot::WORLD_HEIGHT as u32,
            ),
        }
    }

    pub fn from_index(i: usize) -> Option<GameId> {
        GameId::ALL.get(i).copied()
    }
}

/// Frame-rate limit setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FpsLimit {
    Fps30,
    #[default]
    Fps60,
    Unlocked,
}

impl FpsLimit {
    /// Target frame time in seconds (None = unlocked)
    pub fn frame_time(&self) -> Option<f64> {
        match self {
            FpsLimit::Fps30 => Some(1.0 / 30.0),
            FpsLimit::Fps60 => Some(1.0 / 60.0),
            FpsLimit::Unlocked => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            FpsLimit::Fps30 => FpsLimit::Fps60,
            FpsLimit::Fps60 => FpsLimit::Unlocked,
            FpsLimit::Unlocked => FpsLimit::Fps30,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FpsLimit::Fps30 => "30",
            FpsLimit::Fps60 => "60",
            FpsLimit::Unlocked => "Unlocked",
        }
    }
}

/// What the shell is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing(GameId),
}

/// Everything the shell owns
pub struct AppState {
    pub screen: Screen,
    pub scores: ScoreTable,
    pub input: InputState,
    pub sounds: SoundBank,
    pub fps_limit: FpsLimit,
    pub show_debug: bool,

    pub snake: SnakeGame,
    pub flappy: FlappyGame,
    pub caverns: CavernsGame,
    pub slingshot: SlingshotGame,
}

impl AppState {
    /// Build with the level data and sound bank loaded at startup.
    pub fn new(caverns_map: TileMap, slingshot_layout: Layout, sounds: SoundBank) -> Self {
        Self {
            screen: Screen::Menu,
            scores: ScoreTable::load_or_default(),
            input: InputState::new(),
            sounds,
            fps_limit: FpsLimit::default(),
            show_debug: false,
            snake: SnakeGame::new(),
            flappy: FlappyGame::new(),
            caverns: CavernsGame::new(caverns_map),
            slingshot: SlingshotGame::new(slingshot_layout),
        }
    }

    /// Launch a game from the menu, starting it fresh.
    pub fn enter(&mut self, game: GameId) {
        match game {
            GameId::Snake => self.snake.reset(),
            GameId::Flappy => self.flappy.reset(),
            GameId::Caverns => self.caverns.reset(),
            GameId::Slingshot => self.slingshot.reset(),
        }
        self.screen = Screen::Playing(game);
    }

    /// Return to the menu, banking whatever the abandoned run scored.
    pub fn leave_to_menu(&mut self) {
        if let Screen::Playing(game) = self.screen {
            let score = match game {
                GameId::Snake => self.snake.score(),
                GameId::Flappy => self.flappy.score(),
                GameId::Caverns => self.caverns.score(),
                GameId::Slingshot => self.slingshot.score(),
            };
            self.record_result(game, score);
        }
        self.screen = Screen::Menu;
    }

    /// Fold a finished run into the best-score table, persisting records.
    pub fn record_result(&mut self, game: GameId, score: u32) {
        if self.scores.record(game, score) {
            self.scores.save();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_id_round_trip() {
        for (i, game) in GameId::ALL.iter().enumerate() {
            assert_eq!(GameId::from_index(i), Some(*game));
        }
        assert_eq!(GameId::from_index(GameId::ALL.len()), None);
    }

    #[test]
    fn test_fps_limit_cycles() {
        let mut limit = FpsLimit::default();
        let start = limit;
        limit = limit.next();
        limit = limit.next();
        limit = limit.next();
        assert_eq!(limit, start);
        assert_eq!(FpsLimit::Unlocked.frame_time(), None);
        assert!(FpsLimit::Fps30.frame_time().unwrap() > FpsLimit::Fps60.frame_time().unwrap());
    }
}
