//! Ball and session state types

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SessionPhase {
    /// Waiting for the roll trigger
    #[default]
    AwaitingRoll,
    /// Dice animation running
    Rolling,
    /// Ball falling through the obstacle rows
    Dropping,
    /// Ball inside a slot, sinking to the floor
    Settling,
    /// Outcome reported, waiting for "play again"
    Resolved,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::AwaitingRoll => "awaiting_roll",
            SessionPhase::Rolling => "rolling",
            SessionPhase::Dropping => "dropping",
            SessionPhase::Settling => "settling",
            SessionPhase::Resolved => "resolved",
        }
    }

    /// Whether the host should show the full board rather than the dice view
    pub fn shows_board(&self) -> bool {
        matches!(
            self,
            SessionPhase::Dropping | SessionPhase::Settling | SessionPhase::Resolved
        )
    }

    /// Whether the roll trigger is live
    pub fn accepts_roll(&self) -> bool {
        *self == SessionPhase::AwaitingRoll
    }
}

/// What the ball is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BallMode {
    /// Under gravity, bouncing off walls and obstacles
    FreeFalling,
    /// Rolling over the top of a peg
    Attached {
        /// Index into the layout's obstacles
        peg: usize,
        /// Contact angle around the peg (screen space, -π/2 is straight up)
        angle: f32,
        /// Ticks spent attached
        ticks: u32,
    },
    /// Inside a slot, guided down to its floor
    Settling { slot: usize, target_y: f32 },
    /// Resting on a slot floor
    Landed { slot: usize },
    /// Fell below the board without entering a slot
    OutOfBounds,
}

impl BallMode {
    pub fn is_at_rest(&self) -> bool {
        matches!(self, BallMode::Landed { .. } | BallMode::OutOfBounds)
    }

    /// Slot the ball has entered, if any
    pub fn slot(&self) -> Option<usize> {
        match *self {
            BallMode::Settling { slot, .. } | BallMode::Landed { slot } => Some(slot),
            _ => None,
        }
    }
}

/// The single ball of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mode: BallMode,
}

impl Ball {
    /// Free-falling ball at `pos` with velocity `vel`
    pub fn spawn(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            mode: BallMode::FreeFalling,
        }
    }

    /// Scale position proportionally from one board size to another
    pub fn rescale(&mut self, from: Vec2, to: Vec2, radius: f32) {
        if from.x > 0.0 && from.y > 0.0 {
            self.pos = self.pos / from * to;
        }
        self.radius = radius;
    }
}

/// Final result of a play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub payout: i32,
    pub label: String,
    /// Slot index, `None` when the ball left the board
    pub slot: Option<usize>,
}

impl Outcome {
    /// Zero payout for a ball that missed every slot
    pub fn missed() -> Self {
        Self {
            payout: 0,
            label: crate::payout_label(0),
            slot: None,
        }
    }
}
