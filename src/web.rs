//! Browser bindings
//!
//! The page owns the canvas, DOM menus and `requestAnimationFrame` loop; it
//! forwards key events and frame times here and draws from [`WebGame::snapshot_json`].

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::audio::WebAudio;
use crate::game::{Game, GameMode};
use crate::platform::LocalStorage;
use crate::sim::{Arena, Ball, Difficulty, GamePhase, Paddle};

/// Everything the renderer needs for one frame
#[derive(Serialize)]
struct Snapshot<'a> {
    phase: GamePhase,
    width: f32,
    height: f32,
    left: &'a Paddle,
    right: &'a Paddle,
    ball: &'a Ball,
    countdown: Option<String>,
    result: Option<String>,
    music_label: String,
    sfx_label: String,
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Classic Pong (web) starting...");
}

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    game: Game,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64, width: f32, height: f32) -> WebGame {
        // Game::new loads settings and applies the saved volumes to the sink
        let game = Game::new(
            seed,
            Arena::new(width, height),
            Box::new(LocalStorage),
            Box::new(WebAudio::new()),
        );
        WebGame { game }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.game.resize(width, height);
    }

    pub fn key_down(&mut self, key: &str) {
        self.game.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.game.key_up(key);
    }

    pub fn blur(&mut self) {
        self.game.release_keys();
    }

    /// Advance one animation frame; returns the number of events fired
    pub fn frame(&mut self, elapsed_ms: f64) -> usize {
        self.game.update(elapsed_ms).len()
    }

    /// Unknown difficulty names fall back to the last one used
    pub fn start_single_player(&mut self, difficulty: &str) {
        let difficulty = Difficulty::from_name(difficulty).unwrap_or(self.game.settings().difficulty);
        self.game.start(GameMode::SinglePlayer, difficulty);
    }

    pub fn start_two_player(&mut self) {
        self.game.start(GameMode::TwoPlayer, Difficulty::default());
    }

    pub fn pause(&mut self) {
        self.game.pause();
    }

    pub fn resume(&mut self) {
        self.game.resume();
    }

    pub fn exit_to_menu(&mut self) {
        self.game.exit_to_menu();
    }

    pub fn toggle_music(&mut self) -> bool {
        self.game.toggle_music()
    }

    pub fn toggle_sfx(&mut self) -> bool {
        self.game.toggle_sfx()
    }

    pub fn snapshot_json(&self) -> String {
        let state = self.game.state();
        let settings = self.game.settings();
        let snapshot = Snapshot {
            phase: state.phase,
            width: state.arena.width,
            height: state.arena.height,
            left: &state.left,
            right: &state.right,
            ball: &state.ball,
            countdown: self.game.countdown_text(),
            result: self.game.result().map(|r| r.message()),
            music_label: settings.music_label(),
            sfx_label: settings.sfx_label(),
        };
        serde_json::to_string(&snapshot).unwrap_or_else(|e| {
            log::warn!("Snapshot failed: {}", e);
            String::from("{}")
        })
    }

    /// Lines for the high score screen
    pub fn high_scores_json(&self) -> String {
        serde_json::to_string(&self.game.high_scores().display_lines())
            .unwrap_or_else(|_| String::from("[]"))
    }
}
