//! Tuning presets for physics, board layout and session timing
//!
//! Every magic number the stepper or generator needs lives here so board
//! variants are just presets. Partial JSON documents override only the
//! fields they name.

use serde::{Deserialize, Serialize};

/// Obstacle shape used by a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ObstacleStyle {
    /// Triangular deflectors, apex up
    #[default]
    Wedge,
    /// Round pegs
    Peg,
}

impl ObstacleStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleStyle::Wedge => "Wedge",
            ObstacleStyle::Peg => "Peg",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "wedge" | "triangle" => Some(ObstacleStyle::Wedge),
            "peg" | "circle" => Some(ObstacleStyle::Peg),
            _ => None,
        }
    }
}

/// Ball physics tuning. Speeds are in pixels per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Horizontal speed cap (both directions)
    pub max_vx: f32,
    /// Downward speed cap
    pub max_vy: f32,
    /// Upward speed cap as a fraction of `max_vy`
    pub upward_vy_factor: f32,
    /// Fraction of vx kept (and inverted) on a side-wall hit
    pub wall_damping: f32,
    /// Fraction of reflected vx kept after an obstacle hit
    pub collision_vx_damping: f32,
    /// Fraction of reflected vy kept after an obstacle hit
    pub collision_vy_damping: f32,
    /// Push-out distance along the contact normal, in ball radii
    pub nudge_factor: f32,
    /// Broad-phase slack around obstacle bounds, in ball radii
    pub broad_phase_margin: f32,

    // === Settling ===
    /// vx multiplier per tick while settling
    pub settle_vx_damping: f32,
    /// |vx| below this snaps to zero
    pub settle_vx_snap: f32,
    /// Gravity multiplier inside a slot
    pub settle_gravity_factor: f32,
    /// Fall speed cap inside a slot, as a fraction of `max_vy`
    pub settle_max_vy_factor: f32,

    /// Distance below the board after which the ball counts as lost
    pub out_of_bounds_margin: f32,

    // === Peg attachment ===
    /// Contacts slower than this on the top of a peg attach the ball
    pub attach_max_speed: f32,
    /// Longest a ball may roll on a peg before release
    pub attach_max_ticks: u32,
    /// Radians per tick the ball rolls around a peg
    pub attach_angular_speed: f32,
    /// Outward speed given on release
    pub release_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            max_vx: 1.8,
            max_vy: 2.5,
            upward_vy_factor: 0.5,
            wall_damping: 0.3,
            collision_vx_damping: 0.8,
            collision_vy_damping: 0.75,
            nudge_factor: 0.25,
            broad_phase_margin: 1.5,

            settle_vx_damping: 0.75,
            settle_vx_snap: 0.05,
            settle_gravity_factor: 1.2,
            settle_max_vy_factor: 0.6,

            out_of_bounds_margin: 50.0,

            attach_max_speed: 0.6,
            attach_max_ticks: 24,
            attach_angular_speed: 0.08,
            release_speed: 0.9,
        }
    }
}

impl PhysicsConfig {
    /// Upward speed cap (as a positive number)
    #[inline]
    pub fn max_upward_vy(&self) -> f32 {
        self.max_vy * self.upward_vy_factor
    }

    /// Peg boards bounce softer and keep less sideways energy
    pub fn peg() -> Self {
        Self {
            collision_vx_damping: 0.7,
            collision_vy_damping: 0.6,
            nudge_factor: 0.15,
            ..Self::default()
        }
    }
}

/// Board generation tuning. Lengths suffixed `_factor` are in ball radii
/// unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub style: ObstacleStyle,
    /// Share of board width the densest row is fitted into
    pub fit_width_factor: f32,
    /// Minimum channel between obstacles when sizing them
    pub min_channel_factor: f32,
    /// Floor for per-row channel gaps
    pub min_gap_factor: f32,
    /// Smallest obstacle base width
    pub min_base_factor: f32,
    /// Largest base width is `width / max_base_divisor`
    pub max_base_divisor: f32,
    /// Wedge height / base width
    pub wedge_aspect: f32,
    /// Share of the row spacing an obstacle may take up vertically
    pub max_row_fill: f32,
    /// Per-row obstacle size multipliers
    pub row_scale: [f32; 3],
    /// Divider height as a fraction of the main obstacle height
    pub divider_height_factor: f32,
    /// Divider base as a fraction of the main base width
    pub divider_base_factor: f32,
    /// Smallest divider base
    pub divider_min_factor: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            style: ObstacleStyle::Wedge,
            fit_width_factor: 0.98,
            min_channel_factor: 2.2,
            min_gap_factor: 0.6,
            min_base_factor: 1.5,
            max_base_divisor: 11.0 * 0.8,
            wedge_aspect: 0.866,
            max_row_fill: 0.6,
            row_scale: [1.0, 1.0, 1.0],
            divider_height_factor: 0.5,
            divider_base_factor: 0.1,
            divider_min_factor: 0.25,
        }
    }
}

impl LayoutConfig {
    /// Peg board: shrinking pegs toward the bottom, wider clearance
    pub fn peg() -> Self {
        Self {
            style: ObstacleStyle::Peg,
            fit_width_factor: 0.95,
            min_channel_factor: 2.4,
            row_scale: [1.0, 0.9, 0.8],
            ..Self::default()
        }
    }
}

/// Phase timers, in ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Random dice faces shown before the final roll
    pub roll_flashes: u32,
    /// Ticks between face changes (~80 ms)
    pub roll_flash_ticks: u32,
    /// Pause on the final faces before the board appears (~1.5 s)
    pub reveal_ticks: u32,
    /// Hard cap on the drop; a ball still among the obstacles then falls
    /// straight into the slot below it
    pub max_drop_ticks: u32,
    /// Hard cap on settling before the ball is snapped to the floor
    pub max_settle_ticks: u32,
    /// Landed ball stays on screen this long before the outcome is reported
    pub resolve_hold_ticks: u32,
    /// Spawn vx is uniform in `±initial_vx_jitter / 2`
    pub initial_vx_jitter: f32,
    pub initial_vy: f32,
    /// Spawn height as a fraction of the top band
    pub spawn_height_factor: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            roll_flashes: 15,
            roll_flash_ticks: 5,
            reveal_ticks: 90,
            max_drop_ticks: 1800,
            max_settle_ticks: 180,
            resolve_hold_ticks: 90,
            initial_vx_jitter: 0.15,
            initial_vy: 0.05,
            spawn_height_factor: 0.15,
        }
    }
}

impl TimingConfig {
    /// Total ticks spent in the Rolling phase
    pub fn roll_ticks(&self) -> u32 {
        self.roll_flashes * self.roll_flash_ticks + self.reveal_ticks
    }
}

/// Complete game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    pub physics: PhysicsConfig,
    pub layout: LayoutConfig,
    pub timing: TimingConfig,
}

impl GameConfig {
    /// Triangle board (the default)
    pub fn wedge() -> Self {
        Self::default()
    }

    /// Round peg board
    pub fn peg() -> Self {
        Self {
            physics: PhysicsConfig::peg(),
            layout: LayoutConfig::peg(),
            timing: TimingConfig::default(),
        }
    }

    pub fn from_preset(style: ObstacleStyle) -> Self {
        match style {
            ObstacleStyle::Wedge => Self::wedge(),
            ObstacleStyle::Peg => Self::peg(),
        }
    }

    /// Parse a (possibly partial) JSON config
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
