//! QUADCADE: a pocket arcade of four small 2D games
//!
//! Snake, a flappy clone, a tile platformer, and a physics slingshot, all
//! wired straight onto macroquad. Each game renders at its own fixed
//! resolution and gets letterboxed into the window.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod audio;
mod caverns;
mod flappy;
mod input;
mod landing;
mod map;
mod particles;
mod scores;
mod slingshot;
mod snake;
mod sprites;
mod viewport;

use app::{AppState, GameId, Screen};
use input::Action;
use landing::MenuState;
use macroquad::prelude::*;
use viewport::Viewport;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("QUADCADE v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// One render target per game, sized to its virtual world
struct Viewports {
    snake: Viewport,
    flappy: Viewport,
    caverns: Viewport,
    slingshot: Viewport,
}

impl Viewports {
    fn new() -> Self {
        let make = |game: GameId| {
            let (w, h) = game.world_size();
            Viewport::new(w, h)
        };
        Self {
            snake: make(GameId::Snake),
            flappy: make(GameId::Flappy),
            caverns: make(GameId::Caverns),
            slingshot: make(GameId::Slingshot),
        }
    }

    fn get(&self, game: GameId) -> &Viewport {
        match game {
            GameId::Snake => &self.snake,
            GameId::Flappy => &self.flappy,
            GameId::Caverns => &self.caverns,
            GameId::Slingshot => &self.slingshot,
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let sprites = sprites::SpriteBank::generate();

    let sounds = match audio::SoundBank::load().await {
        Ok(bank) => bank,
        Err(e) => {
            eprintln!("Failed to prepare sound effects: {}", e);
            return error_screen(format!("Failed to prepare sound effects: {}", e)).await;
        }
    };

    let caverns_map = match map::load_tile_map("assets/maps/caverns.ron").await {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Failed to load caverns map: {}", e);
            return error_screen(format!("Failed to load caverns map: {}", e)).await;
        }
    };
    let slingshot_layout = match map::load_layout("assets/maps/slingshot.ron").await {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("Failed to load slingshot layout: {}", e);
            return error_screen(format!("Failed to load slingshot layout: {}", e)).await;
        }
    };

    let mut app = AppState::new(caverns_map, slingshot_layout, sounds);
    let mut menu = MenuState::new();
    let viewports = Viewports::new();

    println!("=== QUADCADE v{} ===", VERSION);

    loop {
        let frame_start = get_time();
        let delta = get_frame_time();

        // Global toggles work everywhere
        if app.input.action_pressed(Action::DebugToggle) {
            app.show_debug = !app.show_debug;
        }
        if app.input.action_pressed(Action::FpsCycle) {
            app.fps_limit = app.fps_limit.next();
        }

        match app.screen {
            Screen::Menu => {
                if let Some(game) = menu.update(&app.input) {
                    app.enter(game);
                }
                menu.draw(&app.scores, app.fps_limit);
            }
            Screen::Playing(game) => {
                if app.input.action_pressed(Action::Back) {
                    app.leave_to_menu();
                    menu.draw(&app.scores, app.fps_limit);
                } else {
                    let viewport = viewports.get(game);
                    update_game(&mut app, game, delta, viewport);

                    viewport.begin();
                    draw_game(&app, game, &sprites);
                    viewport.finish();
                }
            }
        }

        // Frame pacing: sleep for the bulk, spin for precision
        if let Some(target_frame_time) = app.fps_limit.frame_time() {
            let elapsed = get_time() - frame_start;
            if target_frame_time - elapsed > 0.0 {
                #[cfg(not(target_arch = "wasm32"))]
                {
                    let spin_margin = 0.002;
                    while get_time() - frame_start + spin_margin < target_frame_time {
                        std::thread::sleep(std::time::Duration::from_millis(1));
                    }
                    while get_time() - frame_start < target_frame_time {
                        std::hint::spin_loop();
                    }
                }
                #[cfg(target_arch = "wasm32")]
                {
                    // The browser paces frames; just burn the remainder
                    while get_time() - frame_start < target_frame_time {}
                }
            }
        }

        next_frame().await;
    }
}

/// Park on a readable error instead of dying with a closed window.
async fn error_screen(message: String) {
    loop {
        clear_background(BLACK);
        let dims = measure_text(&message, None, 24, 1.0);
        draw_text(
            &message,
            (screen_width() - dims.width) / 2.0,
            screen_height() / 2.0,
            24.0,
            RED,
        );
        next_frame().await;
    }
}

fn update_game(app: &mut AppState, game: GameId, delta: f32, viewport: &Viewport) {
    let sounds = &app.sounds;
    match game {
        GameId::Snake => app.snake.update(delta, &app.input, sounds),
        GameId::Flappy => app.flappy.update(delta, &app.input, sounds),
        GameId::Caverns => app.caverns.update(delta, &app.input, sounds),
        GameId::Slingshot => {
            let mouse = viewport.mouse_virtual();
            app.slingshot.update(delta, &app.input, mouse, sounds)
        }
    }

    let result = match game {
        GameId::Snake => app.snake.take_result(),
        GameId::Flappy => app.flappy.take_result(),
        GameId::Caverns => app.caverns.take_result(),
        GameId::Slingshot => app.slingshot.take_result(),
    };
    if let Some(score) = result {
        app.record_result(game, score);
    }
}

fn draw_game(app: &AppState, game: GameId, sprites: &sprites::SpriteBank) {
    match game {
        GameId::Snake => app.snake.draw(sprites, app.show_debug),
        GameId::Flappy => {
            let best = app.scores.best(GameId::Flappy);
            app.flappy.draw(sprites, best, app.show_debug)
        }
        GameId::Caverns => app.caverns.draw(sprites, app.show_debug),
        GameId::Slingshot => app.slingshot.draw(sprites, app.show_debug),
    }
}
