//! Simulation module
//!
//! All gameplay logic lives here:
//! - One tick per rendered frame, no internal timers
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod collision;
pub mod state;
pub mod tick;

pub use ai::{AiMove, ai_move};
pub use collision::{bounce_off_paddle, bounce_off_walls, paddle_overlaps_ball};
pub use state::{
    Arena, Ball, Difficulty, GameEvent, GamePhase, GameState, HitKind, Opponent, Paddle, Side,
};
pub use tick::{PaddleInput, TickInput, tick};
