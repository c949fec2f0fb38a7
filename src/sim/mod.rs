//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (obstacles in generation order)
//! - No platform dependencies; frames leave through the `Renderer` seam

pub mod dice;
pub mod geometry;
pub mod layout;
pub mod session;
pub mod state;
pub mod step;

pub use dice::{DiceRoll, SUM_TO_LANE, sum_to_lane};
pub use geometry::{
    Contact, circle_circle_intersect, circle_contact, closest_point_on_segment,
    outward_edge_normal, reflect, segment_circle_intersect,
};
pub use layout::{Bounds, Layout, Obstacle, Peg, PrizeSlot, Wedge, generate_layout};
pub use session::{Session, SessionEvent};
pub use state::{Ball, BallMode, Outcome, SessionPhase};
pub use step::{TickResult, snap_to_floor, step};
