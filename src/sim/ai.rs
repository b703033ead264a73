//! AI opponent
//!
//! The AI chases the ball with a damped lerp (8% of the remaining gap per
//! tick) and, at a rate set by the difficulty, wastes a tick on a random 5px
//! twitch instead.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Arena, Ball, Difficulty, Paddle};
use crate::consts::{AI_JITTER, AI_TRACKING_FACTOR};

/// What the AI did on a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AiMove {
    /// Random twitch of ±`AI_JITTER` pixels
    Jitter(f32),
    /// Moved toward the ball by the given amount
    Track(f32),
}

/// Move the AI paddle for one tick and clamp it to the arena.
pub fn ai_move(
    paddle: &mut Paddle,
    ball: &Ball,
    arena: &Arena,
    difficulty: Difficulty,
    rng: &mut Pcg32,
) -> AiMove {
    let mv = if rng.random_bool(difficulty.mistake_rate()) {
        let step = if rng.random_bool(0.5) {
            AI_JITTER
        } else {
            -AI_JITTER
        };
        AiMove::Jitter(step)
    } else {
        let target_y = ball.pos.y - paddle.height / 2.0;
        AiMove::Track((target_y - paddle.y) * AI_TRACKING_FACTOR)
    };

    match mv {
        AiMove::Jitter(dy) | AiMove::Track(dy) => paddle.y += dy,
    }
    paddle.clamp(arena);
    mv
}
