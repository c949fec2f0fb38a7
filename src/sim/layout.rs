//! Board layout generation
//!
//! Builds the obstacle rows and prize slots for one viewport size. The
//! result is immutable; a resize throws it away and generates a new one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{LayoutConfig, ObstacleStyle};
use crate::consts::*;
use crate::{ball_radius_for_width, gravity_for_height, lane_x, payout_label};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Bounds grown by `margin` on every side
    pub fn expand(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }

    /// True if the circle's own bounding box touches these bounds
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        center.x + radius >= self.min.x
            && center.x - radius <= self.max.x
            && center.y + radius >= self.min.y
            && center.y - radius <= self.max.y
    }
}

/// Triangular deflector, apex up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wedge {
    pub apex: Vec2,
    /// Base corner on the right
    pub right: Vec2,
    /// Base corner on the left
    pub left: Vec2,
    pub centroid: Vec2,
    pub is_divider: bool,
}

impl Wedge {
    /// Wedge centered at `center` with the given base width and height
    pub fn new(center: Vec2, base: f32, height: f32, is_divider: bool) -> Self {
        let apex = Vec2::new(center.x, center.y - height / 2.0);
        let right = Vec2::new(center.x + base / 2.0, center.y + height / 2.0);
        let left = Vec2::new(center.x - base / 2.0, center.y + height / 2.0);
        Self {
            apex,
            right,
            left,
            centroid: (apex + right + left) / 3.0,
            is_divider,
        }
    }

    /// Edges in test order: right slant, base, left slant
    pub fn edges(&self) -> [(Vec2, Vec2); 3] {
        [
            (self.apex, self.right),
            (self.right, self.left),
            (self.left, self.apex),
        ]
    }

    pub fn base_width(&self) -> f32 {
        self.right.x - self.left.x
    }
}

/// Round peg
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Peg {
    pub center: Vec2,
    pub radius: f32,
    pub is_divider: bool,
}

/// A fixed obstacle on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Obstacle {
    Wedge(Wedge),
    Peg(Peg),
}

impl Obstacle {
    pub fn is_divider(&self) -> bool {
        match self {
            Obstacle::Wedge(w) => w.is_divider,
            Obstacle::Peg(p) => p.is_divider,
        }
    }

    pub fn centroid(&self) -> Vec2 {
        match self {
            Obstacle::Wedge(w) => w.centroid,
            Obstacle::Peg(p) => p.center,
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            Obstacle::Wedge(w) => Bounds {
                min: Vec2::new(w.left.x, w.apex.y),
                max: Vec2::new(w.right.x, w.left.y),
            },
            Obstacle::Peg(p) => Bounds {
                min: p.center - Vec2::splat(p.radius),
                max: p.center + Vec2::splat(p.radius),
            },
        }
    }
}

/// A prize slot along the bottom of the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrizeSlot {
    pub x: f32,
    pub width: f32,
    pub y: f32,
    pub height: f32,
    pub value: i32,
    pub label: String,
    /// Ball center height when resting on the slot floor
    pub floor_y: f32,
}

impl PrizeSlot {
    /// Half-open horizontal containment `[x, x + width)`
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.x && x < self.x + self.width
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Clamp a ball center so the ball stays between the slot walls.
    /// Returns the clamped x and whether a wall was touched.
    pub fn clamp_ball_x(&self, x: f32, radius: f32) -> (f32, bool) {
        let lo = self.x + radius;
        let hi = self.x + self.width - radius;
        if lo > hi {
            return (self.center_x(), true);
        }
        if x < lo {
            (lo, true)
        } else if x > hi {
            (hi, true)
        } else {
            (x, false)
        }
    }
}

/// Obstacles, slots and derived scalars for one viewport size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub ball_radius: f32,
    /// Gravity per tick
    pub gravity: f32,
    pub style: ObstacleStyle,
    /// Main rows first (top to bottom, left to right), then dividers
    pub obstacles: Vec<Obstacle>,
    /// Left to right
    pub slots: Vec<PrizeSlot>,
    /// Top edge of the slot band
    pub slot_top: f32,
}

impl Layout {
    /// Slot under `x`. Resolved by index so every x in `[0, width]` lands in
    /// exactly one slot; the right board edge belongs to the last slot.
    pub fn slot_at(&self, x: f32) -> Option<usize> {
        if self.slots.is_empty() || !(0.0..=self.width).contains(&x) {
            return None;
        }
        let n = self.slots.len();
        let idx = (x / self.width * n as f32).floor() as usize;
        Some(idx.min(n - 1))
    }

    /// Horizontal center of a 1-based lane
    pub fn lane_x(&self, lane: u8) -> f32 {
        lane_x(self.width, lane)
    }

    /// Height of the top entry band
    pub fn top_band(&self) -> f32 {
        self.height * TOP_AREA_FACTOR
    }

    /// Same board with every obstacle removed
    pub fn without_obstacles(mut self) -> Self {
        self.obstacles.clear();
        self
    }

    pub fn main_obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(|o| !o.is_divider())
    }

    pub fn dividers(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(|o| o.is_divider())
    }
}

/// Generate the board for a `width` x `height` viewport
pub fn generate_layout(width: f32, height: f32, config: &LayoutConfig) -> Layout {
    let r = ball_radius_for_width(width);
    let gravity = gravity_for_height(height);

    let top = height * TOP_AREA_FACTOR;
    let band = height * OBSTACLE_AREA_FACTOR;
    let row_spacing = band / ROW_COUNTS.len() as f32;

    // Size everything off the densest row so the ball always fits a channel
    let densest = ROW_COUNTS.iter().copied().max().unwrap_or(1) as f32;
    let min_channel = r * config.min_channel_factor;
    // Rows must not reach into each other or the ball can get wedged between them
    let rise = match config.style {
        ObstacleStyle::Wedge => config.wedge_aspect,
        ObstacleStyle::Peg => 1.0,
    };
    let max_row_base = row_spacing * config.max_row_fill / rise;
    let base = ((width * config.fit_width_factor - (densest + 1.0) * min_channel) / densest)
        .max(r * config.min_base_factor)
        .min(width / config.max_base_divisor)
        .min(max_row_base);
    let obstacle_height = base * config.wedge_aspect;

    log::debug!(
        "Layout {}x{}: ball r={:.2}, g={:.4}, base={:.2}, style={}",
        width,
        height,
        r,
        gravity,
        base,
        config.style.as_str()
    );

    let mut obstacles = Vec::new();
    for (row, &count) in ROW_COUNTS.iter().enumerate() {
        let scale = config.row_scale[row];
        let b = base * scale;
        let h = obstacle_height * scale;
        let y = top + row as f32 * row_spacing + row_spacing / 2.0;

        if row == 0 {
            // First row sits directly under the lanes
            for i in 0..count {
                let cx = lane_x(width, (i + 1) as u8);
                obstacles.push(make_obstacle(config.style, Vec2::new(cx, y), b, h, false));
            }
            continue;
        }

        let gap = ((width - count as f32 * b) / (count as f32 + 1.0)).max(r * config.min_gap_factor);
        let mut x = gap;
        for _ in 0..count {
            let cx = x + b / 2.0;
            x += b + gap;
            if cx < -b / 2.0 || cx > width + b / 2.0 {
                continue;
            }
            obstacles.push(make_obstacle(config.style, Vec2::new(cx, y), b, h, false));
        }
    }

    // Prize slots
    let slot_width = width / NUM_SLOTS as f32;
    let slot_height = height * SLOT_AREA_FACTOR;
    let slot_top = height - slot_height;
    let slots: Vec<PrizeSlot> = PRIZE_VALUES
        .iter()
        .enumerate()
        .map(|(i, &value)| PrizeSlot {
            x: i as f32 * slot_width,
            width: slot_width,
            y: slot_top,
            height: slot_height,
            value,
            label: payout_label(value),
            floor_y: slot_top + slot_height - r,
        })
        .collect();

    // Thin dividers on the slot boundaries, resting on the slot band
    let divider_h = obstacle_height * config.divider_height_factor;
    let divider_b = (r * config.divider_min_factor).max(base * config.divider_base_factor);
    for i in 1..NUM_SLOTS {
        let cx = i as f32 * slot_width;
        let divider = match config.style {
            ObstacleStyle::Wedge => Obstacle::Wedge(Wedge::new(
                Vec2::new(cx, slot_top - divider_h / 2.0),
                divider_b,
                divider_h,
                true,
            )),
            ObstacleStyle::Peg => Obstacle::Peg(Peg {
                center: Vec2::new(cx, slot_top - divider_b / 2.0),
                radius: divider_b / 2.0,
                is_divider: true,
            }),
        };
        obstacles.push(divider);
    }

    Layout {
        width,
        height,
        ball_radius: r,
        gravity,
        style: config.style,
        obstacles,
        slots,
        slot_top,
    }
}

fn make_obstacle(style: ObstacleStyle, center: Vec2, base: f32, height: f32, is_divider: bool) -> Obstacle {
    match style {
        ObstacleStyle::Wedge => Obstacle::Wedge(Wedge::new(center, base, height, is_divider)),
        ObstacleStyle::Peg => Obstacle::Peg(Peg {
            center,
            radius: base / 2.0,
            is_divider,
        }),
    }
}
