//! Game state and core simulation types
//!
//! Everything the tick reads or writes lives in [`GameState`]; there is no
//! other mutable simulation state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu screens are showing, nothing moves
    Menu,
    /// Active gameplay, the only phase in which `tick` does anything
    Playing,
    /// Paused by the player (also held while the resume countdown runs)
    Paused,
    /// A player reached the winning score
    GameOver,
}

/// Which paddle / which player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// What the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitKind {
    Wall,
    Paddle,
}

/// Events emitted by a tick, consumed by presentation and audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off a wall or a paddle
    Hit(HitKind),
    /// The given side won the point
    Score(Side),
    /// Rally reached a multiple of `RALLY_MILESTONE` paddle hits
    RallyMilestone(u32),
    /// The given side reached the winning score
    GameOver(Side),
}

/// AI difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Per-tick probability that the AI jitters instead of tracking.
    ///
    /// Harder settings make fewer mistakes.
    pub fn mistake_rate(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.30,
            Difficulty::Medium => 0.15,
            Difficulty::Hard => 0.01,
        }
    }
}

/// Who drives the right paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Opponent {
    Human,
    Ai(Difficulty),
}

/// Play-field bounds reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT)
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both dimensions positive and finite
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn paddle_height(&self) -> f32 {
        self.height / PADDLE_HEIGHT_DIVISOR
    }

    #[inline]
    pub fn ball_radius(&self) -> f32 {
        self.width.min(self.height) * BALL_RADIUS_FACTOR
    }

    /// Side of the arena the point `x` lies on
    #[inline]
    pub fn half_of(&self, x: f32) -> Side {
        if x < self.width / 2.0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// A player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge (fixed per side)
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels per tick when driven by a human
    pub speed: f32,
    pub score: u32,
}

impl Paddle {
    pub fn new(side: Side, arena: &Arena) -> Self {
        let mut paddle = Self {
            x: 0.0,
            y: 0.0,
            width: PADDLE_WIDTH,
            height: 0.0,
            speed: PADDLE_SPEED,
            score: 0,
        };
        paddle.fit_to(side, arena);
        paddle
    }

    /// Recompute size and position for new arena bounds (paddle is re-centered)
    pub fn fit_to(&mut self, side: Side, arena: &Arena) {
        self.height = arena.paddle_height();
        self.x = match side {
            Side::Left => PADDLE_MARGIN,
            Side::Right => arena.width - PADDLE_WIDTH - PADDLE_MARGIN,
        };
        self.y = arena.height / 2.0 - self.height / 2.0;
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Lowest valid top edge
    #[inline]
    pub fn max_y(&self, arena: &Arena) -> f32 {
        (arena.height - self.height).max(0.0)
    }

    /// Keep the paddle inside [0, arena height - paddle height]
    pub fn clamp(&mut self, arena: &Arena) {
        self.y = self.y.clamp(0.0, self.max_y(arena));
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Scalar speed, kept apart from `vel` and used to rebuild it on paddle hits
    pub speed: f32,
}

impl Ball {
    pub fn new(arena: &Arena) -> Self {
        Self {
            pos: arena.center(),
            vel: Vec2::ZERO,
            radius: arena.ball_radius(),
            speed: BALL_RESTART_SPEED,
        }
    }

    /// Serve from the center: dx = ±10, dy uniform in [-10, -5)
    pub fn reset(&mut self, arena: &Arena, rng: &mut Pcg32) {
        self.pos = arena.center();
        self.speed = BALL_RESTART_SPEED;
        let dx = if rng.random_bool(0.5) {
            BALL_SERVE_DX
        } else {
            -BALL_SERVE_DX
        };
        let dy = rng.random::<f32>() * 5.0 - 10.0;
        self.vel = Vec2::new(dx, dy);
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub arena: Arena,
    pub phase: GamePhase,
    pub opponent: Opponent,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    /// Consecutive paddle hits since the last point
    pub rally: u32,
}

impl GameState {
    /// Create a new state sitting in the menu
    pub fn new(seed: u64, arena: Arena) -> Self {
        let arena = if arena.is_valid() {
            arena
        } else {
            Arena::default()
        };
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            arena,
            phase: GamePhase::Menu,
            opponent: Opponent::Ai(Difficulty::default()),
            left: Paddle::new(Side::Left, &arena),
            right: Paddle::new(Side::Right, &arena),
            ball: Ball::new(&arena),
            rally: 0,
        };
        state.reset_ball();
        state
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Apply new arena bounds: paddles and ball are re-centered and resized.
    ///
    /// Invalid bounds are ignored so a bad resize never corrupts the state.
    pub fn resize(&mut self, width: f32, height: f32) {
        let arena = Arena::new(width, height);
        if !arena.is_valid() {
            log::warn!("Ignoring invalid arena size {}x{}", width, height);
            return;
        }
        self.arena = arena;
        self.left.fit_to(Side::Left, &arena);
        self.right.fit_to(Side::Right, &arena);
        self.ball.pos = arena.center();
        self.ball.radius = arena.ball_radius();
    }

    /// Serve a fresh ball from the center and clear the rally
    pub fn reset_ball(&mut self) {
        self.ball.reset(&self.arena, &mut self.rng);
        self.rally = 0;
    }

    /// Zero both scores and serve, ready for a new match
    pub fn reset_match(&mut self, opponent: Opponent) {
        self.opponent = opponent;
        self.left.score = 0;
        self.right.score = 0;
        let Arena { width, height } = self.arena;
        self.resize(width, height);
        self.reset_ball();
    }

    /// Winner once a side has reached the winning score.
    ///
    /// Ties at or above the threshold go to the right player.
    pub fn winner(&self) -> Option<Side> {
        if self.left.score < WINNING_SCORE && self.right.score < WINNING_SCORE {
            return None;
        }
        if self.left.score > self.right.score {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// Name shown for a player on the game-over screen
    pub fn display_name(&self, side: Side) -> &'static str {
        match (side, self.opponent) {
            (Side::Left, _) => "Player 1",
            (Side::Right, Opponent::Human) => "Player 2",
            (Side::Right, Opponent::Ai(_)) => "CPU",
        }
    }
}
