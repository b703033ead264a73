//! Classic Pong - two paddles, one ball, first to five
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (paddles, ball, collisions, scoring, AI)
//! - `game`: Menu/pause/game-over flow around the simulation
//! - `platform`: Input and storage backends (browser/native)
//! - `persistence`: Fail-soft JSON load/save
//! - `audio`: Event-driven sound effects and music tempo

pub mod audio;
pub mod countdown;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game::{Game, GameMode};
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// First player to reach this score wins
    pub const WINNING_SCORE: u32 = 5;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 15.0;
    /// Horizontal gap between a paddle and its side wall
    pub const PADDLE_MARGIN: f32 = 30.0;
    /// Pixels per tick for human-driven paddles
    pub const PADDLE_SPEED: f32 = 6.0;
    /// Paddle height is this fraction of the arena height
    pub const PADDLE_HEIGHT_DIVISOR: f32 = 6.0;

    /// Ball radius relative to min(arena width, arena height)
    pub const BALL_RADIUS_FACTOR: f32 = 0.015;
    /// Scalar speed after every serve
    pub const BALL_RESTART_SPEED: f32 = 10.0;
    /// Horizontal serve velocity magnitude
    pub const BALL_SERVE_DX: f32 = 10.0;
    /// Added to the ball speed on every paddle hit (uncapped)
    pub const BALL_SPEED_INCREMENT: f32 = 0.2;
    /// Maximum bounce angle off a paddle (45 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_4;

    /// Rally milestone fires every N paddle hits
    pub const RALLY_MILESTONE: u32 = 5;

    /// AI tracking: fraction of the remaining distance covered per tick
    pub const AI_TRACKING_FACTOR: f32 = 0.08;
    /// AI jitter step in pixels
    pub const AI_JITTER: f32 = 5.0;

    /// High score list length
    pub const MAX_HIGH_SCORES: usize = 5;

    /// Countdown step length before play resumes
    pub const COUNTDOWN_STEP_MS: f64 = 700.0;
    /// Countdown starts at this number
    pub const COUNTDOWN_FROM: u32 = 3;

    /// Game music speeds up by this much per rally milestone
    pub const MUSIC_RATE_STEP: f64 = 0.005;
    /// Default music volume for both tracks
    pub const MUSIC_VOLUME: f32 = 0.5;

    /// Arena size used before the host reports its bounds
    pub const DEFAULT_ARENA_WIDTH: f32 = 1280.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 720.0;
}
