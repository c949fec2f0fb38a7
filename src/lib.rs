//! Dice Plinko - roll two dice, drop a ball, land in a prize slot
//!
//! Core modules:
//! - `sim`: Simulation (board layout, collisions, physics stepper, session state machine)
//! - `renderer`: Host-agnostic frame tessellation for the render callback
//! - `config`: Physics/layout/timing presets
//! - `ledger`: In-memory tally of plays and payouts

pub mod config;
pub mod ledger;
pub mod renderer;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{GameConfig, LayoutConfig, ObstacleStyle, PhysicsConfig, TimingConfig};
pub use ledger::Ledger;

/// Game configuration constants
pub mod consts {
    /// Display frames per second the session timers are expressed in
    pub const TICK_RATE_HZ: u32 = 60;

    /// Entry lanes ("funnels") across the top of the board
    pub const NUM_LANES: usize = 5;
    /// Obstacle counts per row, top to bottom. Row 0 sits under the lanes.
    pub const ROW_COUNTS: [usize; 3] = [5, 10, 11];
    /// Payout per slot, left to right
    pub const PRIZE_VALUES: [i32; 11] = [6, 4, 3, 2, 0, 1, 0, 2, 3, 4, 6];
    pub const NUM_SLOTS: usize = PRIZE_VALUES.len();

    /// Vertical bands as fractions of board height
    pub const TOP_AREA_FACTOR: f32 = 0.1;
    pub const OBSTACLE_AREA_FACTOR: f32 = 0.55;
    pub const SLOT_AREA_FACTOR: f32 = 0.15;

    /// Ball radius tracks the viewport width, within these bounds
    pub const BALL_RADIUS_MIN: f32 = 7.0;
    pub const BALL_RADIUS_MAX: f32 = 12.0;
    pub const BALL_RADIUS_WIDTH_FACTOR: f32 = 0.012;

    /// Gravity per tick as a fraction of board height
    pub const GRAVITY_HEIGHT_FACTOR: f32 = 0.00012;

    /// Price of one play
    pub const COST_TO_PLAY: i32 = 3;
}

/// Ball radius for a board of the given width
#[inline]
pub fn ball_radius_for_width(width: f32) -> f32 {
    use consts::*;
    (width * BALL_RADIUS_WIDTH_FACTOR).clamp(BALL_RADIUS_MIN, BALL_RADIUS_MAX)
}

/// Per-tick gravity for a board of the given height
#[inline]
pub fn gravity_for_height(height: f32) -> f32 {
    height * consts::GRAVITY_HEIGHT_FACTOR
}

/// Horizontal center of a 1-based lane index
#[inline]
pub fn lane_x(width: f32, lane: u8) -> f32 {
    width / (consts::NUM_LANES as f32 + 1.0) * lane as f32
}

/// Display label for a payout ("+6", "+0", "-2")
pub fn payout_label(value: i32) -> String {
    if value >= 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}
