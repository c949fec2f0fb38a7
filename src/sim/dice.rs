//! Two-dice roll and the sum-to-lane table

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Lane for each dice sum, as `(sum, lane)` pairs
pub const SUM_TO_LANE: [(u8, u8); 11] = [
    (2, 1),
    (3, 1),
    (4, 2),
    (5, 2),
    (6, 3),
    (7, 3),
    (8, 3),
    (9, 4),
    (10, 4),
    (11, 5),
    (12, 5),
];

/// Lane (1-based) for a two-dice sum, `None` outside 2..=12
pub fn sum_to_lane(sum: u8) -> Option<u8> {
    SUM_TO_LANE
        .iter()
        .find(|&&(s, _)| s == sum)
        .map(|&(_, lane)| lane)
}

/// Faces of the two dice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub die1: u8,
    pub die2: u8,
}

impl Default for DiceRoll {
    /// Both dice showing one, the idle display
    fn default() -> Self {
        Self { die1: 1, die2: 1 }
    }
}

impl DiceRoll {
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        Self {
            die1: rng.random_range(1..=6),
            die2: rng.random_range(1..=6),
        }
    }

    pub fn sum(&self) -> u8 {
        self.die1 + self.die2
    }

    /// Lane this roll sends the ball into
    pub fn lane(&self) -> u8 {
        // Faces are always 1..=6, so the sum is always in the table
        sum_to_lane(self.sum()).unwrap_or(3)
    }
}
