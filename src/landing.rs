//! Arcade menu
//!
//! The home screen: pick a game with the keyboard, see your best scores,
//! launch with confirm. Drawn directly to the window rather than through a
//! game viewport.

use crate::app::{FpsLimit, GameId};
use crate::input::{Action, InputState};
use crate::scores::ScoreTable;
use macroquad::prelude::*;

const BG_COLOR: Color = Color::new(0.07, 0.07, 0.10, 1.0);
const TEXT_COLOR: Color = Color::new(0.9, 0.9, 0.9, 1.0);
const MUTED_COLOR: Color = Color::new(0.55, 0.55, 0.62, 1.0);
const ACCENT_COLOR: Color = Color::new(0.96, 0.84, 0.34, 1.0);
const ROW_BG: Color = Color::new(0.11, 0.11, 0.15, 1.0);

const ROW_HEIGHT: f32 = 72.0;
const ROW_WIDTH: f32 = 520.0;

pub struct MenuState {
    pub selected: usize,
}

impl MenuState {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    /// Move the selection and return a game to launch, if confirmed.
    pub fn update(&mut self, input: &InputState) -> Option<GameId> {
        let count = GameId::ALL.len();
        if input.action_pressed(Action::MoveUp) {
            self.selected = (self.selected + count - 1) % count;
        }
        if input.action_pressed(Action::MoveDown) {
            self.selected = (self.selected + 1) % count;
        }
        if input.action_pressed(Action::Confirm) {
            return GameId::from_index(self.selected);
        }
        None
    }

    pub fn draw(&self, scores: &ScoreTable, fps_limit: FpsLimit) {
        clear_background(BG_COLOR);

        let center_x = screen_width() / 2.0;

        let title = "Q U A D C A D E";
        let dims = measure_text(title, None, 56, 1.0);
        draw_text(title, center_x - dims.width / 2.0, 90.0, 56.0, ACCENT_COLOR);

        let subtitle = "four small games, one cabinet";
        let dims = measure_text(subtitle, None, 22, 1.0);
        draw_text(subtitle, center_x - dims.width / 2.0, 120.0, 22.0, MUTED_COLOR);

        let rows_top = 170.0;
        for (i, game) in GameId::ALL.iter().enumerate() {
            let y = rows_top + i as f32 * (ROW_HEIGHT + 10.0);
            let x = center_x - ROW_WIDTH / 2.0;
            let selected = i == self.selected;

            draw_rectangle(x, y, ROW_WIDTH, ROW_HEIGHT, ROW_BG);
            if selected {
                draw_rectangle_lines(x, y, ROW_WIDTH, ROW_HEIGHT, 2.0, ACCENT_COLOR);
                draw_text(">", x - 28.0, y + 44.0, 32.0, ACCENT_COLOR);
            }

            let label_color = if selected { ACCENT_COLOR } else { TEXT_COLOR };
            draw_text(game.label(), x + 20.0, y + 30.0, 28.0, label_color);
            draw_text(game.tagline(), x + 20.0, y + 56.0, 18.0, MUTED_COLOR);

            let best = format!("best {}", scores.best(*game));
            let dims = measure_text(&best, None, 20, 1.0);
            draw_text(&best, x + ROW_WIDTH - dims.width - 20.0, y + 40.0, 20.0, MUTED_COLOR);
        }

        let footer = format!(
            "Up/Down select   Enter play   Esc back   1 wireframes   F2 fps cap: {}",
            fps_limit.label()
        );
        let dims = measure_text(&footer, None, 18, 1.0);
        draw_text(
            &footer,
            center_x - dims.width / 2.0,
            screen_height() - 30.0,
            18.0,
            MUTED_COLOR,
        );

        let version = concat!("v", env!("CARGO_PKG_VERSION"));
        draw_text(version, 10.0, screen_height() - 10.0, 16.0, MUTED_COLOR);
    }
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_wraps() {
        let mut menu = MenuState::new();
        let count = GameId::ALL.len();

        menu.selected = (menu.selected + count - 1) % count;
        assert_eq!(menu.selected, count - 1);

        menu.selected = (menu.selected + 1) % count;
        assert_eq!(menu.selected, 0);
    }
}
