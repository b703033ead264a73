//! Per-frame simulation tick
//!
//! Core game loop step. The host calls [`tick`] once per animation frame.

use super::ai::ai_move;
use super::collision::{bounce_off_paddle, bounce_off_walls, paddle_overlaps_ball};
use super::state::{Arena, GameEvent, GamePhase, GameState, HitKind, Opponent, Paddle, Side};
use crate::consts::RALLY_MILESTONE;

/// Movement intents for one paddle, sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleInput {
    pub up: bool,
    pub down: bool,
}

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: PaddleInput,
    /// Ignored when the right paddle is AI-driven
    pub right: PaddleInput,
}

/// Advance the game by one frame and return what happened.
///
/// Does nothing unless the phase is `Playing`.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }

    // Paddles
    let arena = state.arena;
    move_human(&mut state.left, &input.left, &arena);
    match state.opponent {
        Opponent::Human => move_human(&mut state.right, &input.right, &arena),
        Opponent::Ai(difficulty) => {
            ai_move(&mut state.right, &state.ball, &arena, difficulty, &mut state.rng);
        }
    }

    // Ball
    state.ball.pos += state.ball.vel;

    if bounce_off_walls(&mut state.ball, &arena) {
        events.push(GameEvent::Hit(HitKind::Wall));
    }

    let side = arena.half_of(state.ball.pos.x);
    let paddle = state.paddle(side);
    if paddle_overlaps_ball(paddle, &state.ball) {
        let paddle = paddle.clone();
        bounce_off_paddle(&mut state.ball, &paddle, side);
        state.rally += 1;
        events.push(GameEvent::Hit(HitKind::Paddle));
        if state.rally % RALLY_MILESTONE == 0 {
            events.push(GameEvent::RallyMilestone(state.rally));
        }
    }

    // Scoring: at most one side per tick
    let scorer = if state.ball.left() < 0.0 {
        Some(Side::Right)
    } else if state.ball.right() > arena.width {
        Some(Side::Left)
    } else {
        None
    };
    if let Some(scorer) = scorer {
        state.paddle_mut(scorer).score += 1;
        state.reset_ball();
        events.push(GameEvent::Score(scorer));
        log::debug!(
            "Point to {:?}: {}-{}",
            scorer,
            state.left.score,
            state.right.score
        );
    }

    if let Some(winner) = state.winner() {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver(winner));
        log::info!(
            "Game over, {} wins {}-{}",
            state.display_name(winner),
            state.left.score,
            state.right.score
        );
    }

    events
}

/// Step a keyboard-driven paddle and clamp it to the arena
fn move_human(paddle: &mut Paddle, input: &PaddleInput, arena: &Arena) {
    if input.up && paddle.y > 0.0 {
        paddle.y -= paddle.speed;
    }
    if input.down && paddle.y < paddle.max_y(arena) {
        paddle.y += paddle.speed;
    }
    paddle.clamp(arena);
}
