//! Collision detection and response
//!
//! Walls reflect the vertical velocity. Paddles rebuild the velocity from the
//! ball's scalar speed and where on the paddle it landed: center hits go
//! straight back, edge hits leave at up to 45 degrees.

use glam::Vec2;

use super::state::{Arena, Ball, Paddle, Side};
use crate::consts::{BALL_SPEED_INCREMENT, MAX_BOUNCE_ANGLE};

/// Overlap test between a paddle rectangle and the ball's bounding box.
///
/// This is the usual AABB-vs-circle approximation: corners count as hits even
/// when the true circle would miss them.
pub fn paddle_overlaps_ball(paddle: &Paddle, ball: &Ball) -> bool {
    ball.left() < paddle.x + paddle.width
        && ball.right() > paddle.x
        && ball.top() < paddle.y + paddle.height
        && ball.bottom() > paddle.y
}

/// Reflect the ball off the top/bottom walls. Returns true on a bounce.
///
/// The position is not corrected, so a fast ball can sit past the wall for a
/// tick before the flipped velocity brings it back.
pub fn bounce_off_walls(ball: &mut Ball, arena: &Arena) -> bool {
    if ball.bottom() > arena.height || ball.top() < 0.0 {
        ball.vel.y = -ball.vel.y;
        true
    } else {
        false
    }
}

/// Normalized contact point: 0 at the paddle center, ±1 at its edges.
///
/// Not clamped. A ball whose center is past the paddle end (a corner hit)
/// gives a magnitude above 1.
#[inline]
pub fn impact_offset(paddle: &Paddle, ball: &Ball) -> f32 {
    (ball.pos.y - paddle.center_y()) / (paddle.height / 2.0)
}

/// Rebuild the ball velocity after a paddle hit.
///
/// `side` is the paddle that was hit; the ball always leaves heading away
/// from it. The speed is bumped first so `|vel| == speed` afterwards.
pub fn bounce_off_paddle(ball: &mut Ball, paddle: &Paddle, side: Side) {
    let angle = impact_offset(paddle, ball) * MAX_BOUNCE_ANGLE;
    let direction = match side {
        Side::Left => 1.0,
        Side::Right => -1.0,
    };
    ball.speed += BALL_SPEED_INCREMENT;
    ball.vel = Vec2::new(direction * angle.cos(), angle.sin()) * ball.speed;
}
