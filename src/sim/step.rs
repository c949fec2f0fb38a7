//! Fixed-step ball physics
//!
//! One call to [`step`] advances the ball by one tick. The update order is
//! fixed: velocity before position, walls before obstacles, and at most one
//! obstacle contact resolved per tick.

use glam::Vec2;

use super::geometry::{circle_contact, outward_edge_normal, reflect, segment_circle_intersect};
use super::layout::{Layout, Obstacle};
use super::state::{Ball, BallMode};
use crate::config::PhysicsConfig;

/// Angle of the top of a peg (screen space, y down)
const PEG_TOP: f32 = -std::f32::consts::FRAC_PI_2;
/// A rolling ball lets go this far from the top of its peg
const RELEASE_ARC: f32 = std::f32::consts::FRAC_PI_3;
/// Contacts steeper than this (normal.y) count as landing on top of a peg
const ATTACH_NORMAL_Y: f32 = -0.7;

/// What happened to the ball during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickResult {
    /// Nothing but gravity
    Falling,
    /// Bounced off a side wall
    Wall,
    /// Bounced off an obstacle
    Bounced { obstacle: usize },
    /// Came to rest on top of a peg and started rolling
    Attached { peg: usize },
    /// Still rolling over a peg
    Rolling { peg: usize },
    /// Rolled off a peg
    Released { peg: usize },
    /// Crossed into the slot band above a slot
    EnteredSlot { slot: usize },
    /// Sinking toward the slot floor
    Settling,
    /// Reached the slot floor this tick
    Landed { slot: usize },
    /// Dropped below the board without entering a slot
    FellOut,
    /// Ball was already at rest
    AtRest,
}

impl TickResult {
    /// True when the play has a final answer
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickResult::Landed { .. } | TickResult::FellOut)
    }
}

/// Advance the ball by one tick
pub fn step(ball: &mut Ball, layout: &Layout, physics: &PhysicsConfig) -> TickResult {
    match ball.mode {
        BallMode::FreeFalling => free_fall(ball, layout, physics),
        BallMode::Attached { peg, angle, ticks } => roll_on_peg(ball, layout, physics, peg, angle, ticks),
        BallMode::Settling { slot, target_y } => settle(ball, layout, physics, slot, target_y),
        BallMode::Landed { .. } | BallMode::OutOfBounds => TickResult::AtRest,
    }
}

fn free_fall(ball: &mut Ball, layout: &Layout, physics: &PhysicsConfig) -> TickResult {
    let r = ball.radius;

    ball.vel.y = (ball.vel.y + layout.gravity).clamp(-physics.max_upward_vy(), physics.max_vy);
    ball.vel.x = ball.vel.x.clamp(-physics.max_vx, physics.max_vx);
    ball.pos += ball.vel;

    let mut result = TickResult::Falling;

    if ball.pos.x - r < 0.0 {
        ball.pos.x = r;
        ball.vel.x *= -physics.wall_damping;
        result = TickResult::Wall;
    } else if ball.pos.x + r > layout.width {
        ball.pos.x = layout.width - r;
        ball.vel.x *= -physics.wall_damping;
        result = TickResult::Wall;
    }

    if let Some(hit) = resolve_collision(ball, layout, physics) {
        result = hit;
        // The push-out must not shove the ball through a wall
        keep_inside_walls(ball, layout.width);
        if matches!(ball.mode, BallMode::Attached { .. }) {
            return result;
        }
    }

    if ball.pos.y + r >= layout.slot_top && ball.pos.y - r < layout.height {
        if let Some(slot) = layout.slot_at(ball.pos.x) {
            let target_y = layout.slots[slot].floor_y;
            // Never climb back out once inside
            ball.vel.y = ball.vel.y.max(0.0);
            ball.mode = BallMode::Settling { slot, target_y };
            return TickResult::EnteredSlot { slot };
        }
    }

    if ball.pos.y - r > layout.height + physics.out_of_bounds_margin {
        ball.mode = BallMode::OutOfBounds;
        return TickResult::FellOut;
    }

    result
}

/// Resolve the first obstacle contact in layout order, if any.
///
/// Later obstacles are not tested once a contact has been handled.
pub fn resolve_collision(ball: &mut Ball, layout: &Layout, physics: &PhysicsConfig) -> Option<TickResult> {
    let r = ball.radius;
    let margin = r * physics.broad_phase_margin;

    for (i, obstacle) in layout.obstacles.iter().enumerate() {
        if !obstacle.bounds().expand(margin).overlaps_circle(ball.pos, r) {
            continue;
        }

        match obstacle {
            Obstacle::Wedge(wedge) => {
                let hit_edge = wedge
                    .edges()
                    .into_iter()
                    .find(|&(p1, p2)| segment_circle_intersect(p1, p2, ball.pos, r));
                if let Some((p1, p2)) = hit_edge {
                    let normal = outward_edge_normal(p1, p2, wedge.centroid);
                    bounce(ball, normal, r * physics.nudge_factor, physics);
                    return Some(TickResult::Bounced { obstacle: i });
                }
            }
            Obstacle::Peg(peg) => {
                let Some(contact) = circle_contact(ball.pos, r, peg.center, peg.radius) else {
                    continue;
                };
                let approaching = ball.vel.dot(contact.normal) < 0.0;
                if !peg.is_divider
                    && approaching
                    && contact.normal.y < ATTACH_NORMAL_Y
                    && ball.vel.length() < physics.attach_max_speed
                {
                    let angle = contact.normal.y.atan2(contact.normal.x);
                    ball.pos = peg.center + contact.normal * (peg.radius + r);
                    ball.vel = Vec2::ZERO;
                    keep_inside_walls(ball, layout.width);
                    ball.mode = BallMode::Attached { peg: i, angle, ticks: 0 };
                    log::debug!("Ball attached to peg {} at {:.2} rad", i, angle);
                    return Some(TickResult::Attached { peg: i });
                }
                let push = contact.penetration + r * physics.nudge_factor;
                bounce(ball, contact.normal, push, physics);
                return Some(TickResult::Bounced { obstacle: i });
            }
        }
    }

    None
}

fn keep_inside_walls(ball: &mut Ball, width: f32) {
    let r = ball.radius;
    if width >= 2.0 * r {
        ball.pos.x = ball.pos.x.clamp(r, width - r);
    }
}

/// Reflect off a surface, damp each axis, push the ball out along the normal
fn bounce(ball: &mut Ball, normal: Vec2, push: f32, physics: &PhysicsConfig) {
    // A ball already moving away keeps its velocity
    if ball.vel.dot(normal) < 0.0 {
        let reflected = reflect(ball.vel, normal);
        ball.vel = Vec2::new(
            reflected.x * physics.collision_vx_damping,
            reflected.y * physics.collision_vy_damping,
        );
    }
    ball.pos += normal * push;
}

fn roll_on_peg(
    ball: &mut Ball,
    layout: &Layout,
    physics: &PhysicsConfig,
    peg_index: usize,
    angle: f32,
    ticks: u32,
) -> TickResult {
    let Some(Obstacle::Peg(peg)) = layout.obstacles.get(peg_index) else {
        ball.mode = BallMode::FreeFalling;
        return TickResult::Released { peg: peg_index };
    };

    // Roll toward whichever side the ball already leans; dead center goes right
    let direction = if angle >= PEG_TOP { 1.0 } else { -1.0 };
    let angle = angle + direction * physics.attach_angular_speed;
    let ticks = ticks + 1;

    let normal = Vec2::new(angle.cos(), angle.sin());
    ball.pos = peg.center + normal * (peg.radius + ball.radius);
    ball.vel = Vec2::ZERO;
    // Pegs next to a wall would otherwise carry the ball through it
    keep_inside_walls(ball, layout.width);

    if ticks >= physics.attach_max_ticks || (angle - PEG_TOP).abs() >= RELEASE_ARC {
        ball.vel = normal * physics.release_speed;
        ball.mode = BallMode::FreeFalling;
        return TickResult::Released { peg: peg_index };
    }

    ball.mode = BallMode::Attached {
        peg: peg_index,
        angle,
        ticks,
    };
    TickResult::Rolling { peg: peg_index }
}

fn settle(ball: &mut Ball, layout: &Layout, physics: &PhysicsConfig, slot: usize, target_y: f32) -> TickResult {
    let Some(prize) = layout.slots.get(slot) else {
        ball.mode = BallMode::FreeFalling;
        return TickResult::Falling;
    };

    ball.vel.x *= physics.settle_vx_damping;
    if ball.vel.x.abs() < physics.settle_vx_snap {
        ball.vel.x = 0.0;
    }
    ball.pos.x += ball.vel.x;
    let (x, touched_wall) = prize.clamp_ball_x(ball.pos.x, ball.radius);
    ball.pos.x = x;
    if touched_wall {
        ball.vel.x = 0.0;
    }

    if ball.pos.y < target_y {
        let cap = physics.max_vy * physics.settle_max_vy_factor;
        ball.vel.y = (ball.vel.y + layout.gravity * physics.settle_gravity_factor).min(cap);
        ball.pos.y += ball.vel.y;
    }

    if ball.pos.y >= target_y {
        land(ball, slot, target_y);
        return TickResult::Landed { slot };
    }

    TickResult::Settling
}

fn land(ball: &mut Ball, slot: usize, target_y: f32) {
    ball.pos.y = target_y;
    ball.vel = Vec2::ZERO;
    ball.mode = BallMode::Landed { slot };
}

/// Put a settling ball straight onto its slot floor.
///
/// Returns the slot, or `None` if the ball was not settling.
pub fn snap_to_floor(ball: &mut Ball) -> Option<usize> {
    match ball.mode {
        BallMode::Settling { slot, target_y } => {
            land(ball, slot, target_y);
            Some(slot)
        }
        _ => None,
    }
}

/// Send a ball still among the obstacles straight down into the slot under
/// it. The ball then sinks through the rows like any settling ball.
///
/// Returns the slot, or `None` if the layout has no slot under the ball.
pub fn drop_into_slot(ball: &mut Ball, layout: &Layout) -> Option<usize> {
    let slot = layout.slot_at(ball.pos.x.clamp(0.0, layout.width))?;
    let prize = &layout.slots[slot];
    let (x, _) = prize.clamp_ball_x(ball.pos.x, ball.radius);
    ball.pos.x = x;
    ball.vel = Vec2::new(0.0, ball.vel.y.max(0.0));
    ball.mode = BallMode::Settling {
        slot,
        target_y: prize.floor_y,
    };
    Some(slot)
}

/// Re-aim a settling or landed ball at the slot under it in a regenerated
/// layout. With no slot under it the ball goes back to free fall.
pub fn retarget_slot(ball: &mut Ball, layout: &Layout) -> Option<usize> {
    let Some(slot) = layout.slot_at(ball.pos.x) else {
        ball.mode = BallMode::FreeFalling;
        return None;
    };
    let target_y = layout.slots[slot].floor_y;
    if matches!(ball.mode, BallMode::Landed { .. }) {
        land(ball, slot, target_y);
    } else {
        ball.mode = BallMode::Settling { slot, target_y };
    }
    Some(slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, LayoutConfig};
    use crate::sim::layout::{Peg, generate_layout};
    use proptest::prelude::*;

    fn board() -> Layout {
        generate_layout(800.0, 600.0, &LayoutConfig::default())
    }

    fn ball_at(layout: &Layout, x: f32, y: f32) -> Ball {
        Ball::spawn(Vec2::new(x, y), Vec2::ZERO, layout.ball_radius)
    }

    #[test]
    fn test_velocity_updates_before_position() {
        let layout = board().without_obstacles();
        let physics = PhysicsConfig::default();
        let mut ball = ball_at(&layout, 400.0, 10.0);
        step(&mut ball, &layout, &physics);
        assert!((ball.vel.y - layout.gravity).abs() < 1e-6);
        assert!((ball.pos.y - (10.0 + layout.gravity)).abs() < 1e-5);
    }

    #[test]
    fn test_velocity_caps() {
        let layout = board().without_obstacles();
        let physics = PhysicsConfig::default();

        let mut ball = ball_at(&layout, 400.0, 100.0);
        ball.vel = Vec2::new(50.0, 50.0);
        step(&mut ball, &layout, &physics);
        assert_eq!(ball.vel, Vec2::new(physics.max_vx, physics.max_vy));

        let mut ball = ball_at(&layout, 400.0, 100.0);
        ball.vel = Vec2::new(-50.0, -50.0);
        step(&mut ball, &layout, &physics);
        assert_eq!(ball.vel, Vec2::new(-physics.max_vx, -physics.max_upward_vy()));
    }

    #[test]
    fn test_wall_reflection_damps_and_clamps() {
        let layout = board().without_obstacles();
        let physics = PhysicsConfig::default();
        let mut ball = ball_at(&layout, layout.ball_radius + 0.5, 100.0);
        ball.vel.x = -1.5;
        let result = step(&mut ball, &layout, &physics);
        assert_eq!(result, TickResult::Wall);
        assert_eq!(ball.pos.x, layout.ball_radius);
        assert!((ball.vel.x - 1.5 * physics.wall_damping).abs() < 1e-6);
    }

    #[test]
    fn test_wedge_slant_deflects_sideways() {
        let layout = board();
        let physics = PhysicsConfig::default();
        let Obstacle::Wedge(wedge) = &layout.obstacles[2] else {
            panic!("expected wedge");
        };
        // Just above the apex, slightly right of it, falling
        let mut ball = ball_at(&layout, wedge.apex.x + 2.0, wedge.apex.y - layout.ball_radius + 1.0);
        ball.vel = Vec2::new(0.0, 2.0);
        let result = step(&mut ball, &layout, &physics);
        assert_eq!(result, TickResult::Bounced { obstacle: 2 });
        assert!(ball.vel.x > 0.0, "right slant pushes right, vel={:?}", ball.vel);
        assert!(ball.vel.y < 2.0, "fall should be checked, vel={:?}", ball.vel);
    }

    fn two_peg_layout() -> Layout {
        let mut layout = board().without_obstacles();
        for x in [395.0, 405.0] {
            layout.obstacles.push(Obstacle::Peg(Peg {
                center: Vec2::new(x, 200.0),
                radius: 8.0,
                is_divider: true,
            }));
        }
        layout
    }

    #[test]
    fn test_only_first_obstacle_resolves() {
        let layout = two_peg_layout();
        let physics = PhysicsConfig::default();
        let mut ball = ball_at(&layout, 400.0, 200.0 - 12.0);
        ball.vel = Vec2::new(0.0, 2.0);
        let result = step(&mut ball, &layout, &physics);
        assert_eq!(result, TickResult::Bounced { obstacle: 0 });

        // Reflection applied exactly once: downward motion turned upward
        assert!(ball.vel.y < 0.0);
    }

    #[test]
    fn test_slow_ball_on_peg_top_attaches_then_releases() {
        let mut layout = board().without_obstacles();
        layout.obstacles.push(Obstacle::Peg(Peg {
            center: Vec2::new(400.0, 200.0),
            radius: 10.0,
            is_divider: false,
        }));
        let physics = PhysicsConfig::peg();
        let r = layout.ball_radius;
        let mut ball = ball_at(&layout, 401.0, 200.0 - 10.0 - r + 0.5);
        ball.vel = Vec2::new(0.0, 0.1);

        let result = step(&mut ball, &layout, &physics);
        assert_eq!(result, TickResult::Attached { peg: 0 });

        let mut released = false;
        for _ in 0..=physics.attach_max_ticks {
            match step(&mut ball, &layout, &physics) {
                TickResult::Rolling { peg } => assert_eq!(peg, 0),
                TickResult::Released { peg } => {
                    assert_eq!(peg, 0);
                    released = true;
                    break;
                }
                other => panic!("unexpected {:?}", other),
            }
        }
        assert!(released);
        assert_eq!(ball.mode, BallMode::FreeFalling);
        // Leaned right, so it rolls off to the right
        assert!(ball.pos.x > 400.0);
        assert!(ball.vel.x > 0.0);
    }

    #[test]
    fn test_peg_by_the_wall_releases_inside_it() {
        let mut layout = board().without_obstacles();
        layout.obstacles.push(Obstacle::Peg(Peg {
            center: Vec2::new(788.0, 200.0),
            radius: 10.0,
            is_divider: false,
        }));
        let physics = PhysicsConfig::peg();
        let r = layout.ball_radius;
        let mut ball = ball_at(&layout, 789.0, 200.0 - 10.0 - r + 0.5);
        ball.vel = Vec2::new(0.0, 0.1);

        assert_eq!(step(&mut ball, &layout, &physics), TickResult::Attached { peg: 0 });
        assert!(ball.pos.x + r <= layout.width + 1e-3);

        let mut released = false;
        for _ in 0..=physics.attach_max_ticks {
            let result = step(&mut ball, &layout, &physics);
            assert!(ball.pos.x + r <= layout.width + 1e-3, "{:?} at x={}", result, ball.pos.x);
            if let TickResult::Released { .. } = result {
                released = true;
                break;
            }
        }
        assert!(released);
        assert_eq!(ball.mode, BallMode::FreeFalling);
        // Rolled toward the wall and was held against it
        assert!((ball.pos.x - (layout.width - r)).abs() < 1e-3);
    }

    #[test]
    fn test_fast_ball_bounces_off_peg() {
        let mut layout = board().without_obstacles();
        layout.obstacles.push(Obstacle::Peg(Peg {
            center: Vec2::new(400.0, 200.0),
            radius: 10.0,
            is_divider: false,
        }));
        let physics = PhysicsConfig::peg();
        let r = layout.ball_radius;
        let mut ball = ball_at(&layout, 403.0, 200.0 - 10.0 - r - 1.0);
        ball.vel = Vec2::new(0.0, 2.4);
        let result = step(&mut ball, &layout, &physics);
        assert_eq!(result, TickResult::Bounced { obstacle: 0 });
        assert!(ball.vel.y < 0.0);
    }

    #[test]
    fn test_slot_entry_records_floor() {
        let layout = board().without_obstacles();
        let physics = PhysicsConfig::default();
        let x = layout.slots[5].center_x();
        let mut ball = ball_at(&layout, x, layout.slot_top - layout.ball_radius - 0.01);
        ball.vel.y = 1.0;
        let result = step(&mut ball, &layout, &physics);
        assert_eq!(result, TickResult::EnteredSlot { slot: 5 });
        assert_eq!(
            ball.mode,
            BallMode::Settling {
                slot: 5,
                target_y: layout.slots[5].floor_y
            }
        );
    }

    #[test]
    fn test_settling_converges_and_stops() {
        let layout = board().without_obstacles();
        let physics = PhysicsConfig::default();
        let slot = &layout.slots[3];
        let mut ball = ball_at(&layout, slot.center_x(), slot.y + 1.0);
        ball.vel = Vec2::new(1.2, 0.0);
        ball.mode = BallMode::Settling {
            slot: 3,
            target_y: slot.floor_y,
        };

        let mut last_y = ball.pos.y;
        let mut landed = false;
        for _ in 0..500 {
            let result = step(&mut ball, &layout, &physics);
            assert!(ball.pos.y >= last_y);
            assert!(ball.pos.x >= slot.x && ball.pos.x <= slot.x + slot.width);
            last_y = ball.pos.y;
            if result == (TickResult::Landed { slot: 3 }) {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(ball.pos.y, slot.floor_y);
        assert_eq!(ball.vel, Vec2::ZERO);
        assert_eq!(step(&mut ball, &layout, &physics), TickResult::AtRest);
    }

    #[test]
    fn test_settling_clamps_to_slot_walls() {
        let layout = board().without_obstacles();
        let physics = PhysicsConfig::default();
        let slot = &layout.slots[0];
        let mut ball = ball_at(&layout, slot.x + slot.width - layout.ball_radius, slot.y + 1.0);
        ball.vel = Vec2::new(5.0, 0.0);
        ball.mode = BallMode::Settling {
            slot: 0,
            target_y: slot.floor_y,
        };
        step(&mut ball, &layout, &physics);
        assert_eq!(ball.vel.x, 0.0);
        assert!(ball.pos.x + ball.radius <= slot.x + slot.width + 1e-4);
    }

    #[test]
    fn test_fell_out_without_slots() {
        let mut layout = board().without_obstacles();
        layout.slots.clear();
        let physics = PhysicsConfig::default();
        let mut ball = ball_at(&layout, 400.0, layout.height + 60.0);
        ball.vel.y = 2.0;
        assert_eq!(step(&mut ball, &layout, &physics), TickResult::FellOut);
        assert_eq!(ball.mode, BallMode::OutOfBounds);
        assert!(TickResult::FellOut.is_terminal());
    }

    #[test]
    fn test_snap_to_floor() {
        let layout = board();
        let mut ball = ball_at(&layout, 100.0, layout.slot_top);
        assert_eq!(snap_to_floor(&mut ball), None);
        ball.mode = BallMode::Settling {
            slot: 1,
            target_y: layout.slots[1].floor_y,
        };
        assert_eq!(snap_to_floor(&mut ball), Some(1));
        assert_eq!(ball.pos.y, layout.slots[1].floor_y);
        assert_eq!(ball.mode, BallMode::Landed { slot: 1 });
    }

    #[test]
    fn test_stuck_ball_drops_into_slot_below() {
        let layout = board();
        let physics = PhysicsConfig::default();
        let mut ball = ball_at(&layout, 10.0, 150.0);
        ball.vel = Vec2::new(-1.0, -0.5);

        assert_eq!(drop_into_slot(&mut ball, &layout), Some(0));
        assert_eq!(ball.vel, Vec2::ZERO);
        assert!(ball.pos.x - ball.radius >= layout.slots[0].x - 1e-4);

        let mut landed = None;
        for _ in 0..2000 {
            if let TickResult::Landed { slot } = step(&mut ball, &layout, &physics) {
                landed = Some(slot);
                break;
            }
        }
        assert_eq!(landed, Some(0));
        assert_eq!(ball.pos.y, layout.slots[0].floor_y);
    }

    #[test]
    fn test_retarget_follows_regenerated_slots() {
        let small = board();
        let large = generate_layout(1200.0, 900.0, &LayoutConfig::default());
        let s = &small.slots[3];
        let mut ball = ball_at(&small, s.center_x(), s.floor_y);
        ball.mode = BallMode::Landed { slot: 3 };

        ball.rescale(Vec2::new(800.0, 600.0), Vec2::new(1200.0, 900.0), large.ball_radius);
        assert_eq!(retarget_slot(&mut ball, &large), Some(3));
        assert_eq!(ball.mode, BallMode::Landed { slot: 3 });
        assert_eq!(ball.pos.y, large.slots[3].floor_y);
    }

    #[test]
    fn test_retarget_without_slot_falls_free() {
        let mut layout = board();
        layout.slots.clear();
        let mut ball = ball_at(&layout, 400.0, 550.0);
        ball.mode = BallMode::Settling { slot: 5, target_y: 590.0 };

        assert_eq!(retarget_slot(&mut ball, &layout), None);
        assert_eq!(ball.mode, BallMode::FreeFalling);
        assert_eq!(drop_into_slot(&mut ball, &layout), None);
    }

    proptest! {
        #[test]
        fn prop_free_fall_stays_inside_walls(
            width in 150.0f32..2600.0,
            height in 150.0f32..1400.0,
            peg_board in any::<bool>(),
            x_frac in 0.0f32..1.0,
            y_frac in 0.05f32..0.7,
            vx in -10.0f32..10.0,
            vy in -3.0f32..3.0,
            ticks in 1usize..400,
        ) {
            let config = if peg_board { GameConfig::peg() } else { GameConfig::wedge() };
            let layout = generate_layout(width, height, &config.layout);
            let physics = &config.physics;
            let r = layout.ball_radius;
            let mut ball = ball_at(&layout, (x_frac * width).clamp(r, width - r), y_frac * height);
            ball.vel = Vec2::new(vx, vy);
            for _ in 0..ticks {
                let result = step(&mut ball, &layout, physics);
                if matches!(ball.mode, BallMode::FreeFalling | BallMode::Attached { .. }) {
                    prop_assert!(ball.pos.x - r >= -1e-3, "{:?} x={}", result, ball.pos.x);
                    prop_assert!(ball.pos.x + r <= layout.width + 1e-3, "{:?} x={}", result, ball.pos.x);
                }
            }
        }

        #[test]
        fn prop_peg_rolls_stay_inside_walls(
            width in 150.0f32..1200.0,
            x_frac in 0.0f32..1.0,
            lean in -3.0f32..3.0,
        ) {
            // Pegs hugging either wall, ball landing gently on top
            let mut layout = generate_layout(width, 600.0, &LayoutConfig::peg()).without_obstacles();
            let r = layout.ball_radius;
            let peg_x = if x_frac < 0.5 { 2.0 } else { width - 2.0 };
            layout.obstacles.push(Obstacle::Peg(Peg {
                center: Vec2::new(peg_x, 200.0),
                radius: 8.0,
                is_divider: false,
            }));
            let physics = PhysicsConfig::peg();
            let mut ball = ball_at(&layout, (peg_x + lean).clamp(r, width - r), 200.0 - 8.0 - r + 0.5);
            ball.vel = Vec2::new(0.0, 0.05);
            for _ in 0..120 {
                step(&mut ball, &layout, &physics);
                if matches!(ball.mode, BallMode::FreeFalling | BallMode::Attached { .. }) {
                    prop_assert!(ball.pos.x - r >= -1e-3);
                    prop_assert!(ball.pos.x + r <= width + 1e-3);
                }
            }
        }

        #[test]
        fn prop_settling_is_monotonic(slot in 0usize..11, vx in -3.0f32..3.0, vy in 0.0f32..2.5) {
            let layout = board();
            let physics = PhysicsConfig::default();
            let s = &layout.slots[slot];
            let mut ball = ball_at(&layout, s.center_x(), s.y);
            ball.vel = Vec2::new(vx, vy);
            ball.mode = BallMode::Settling { slot, target_y: s.floor_y };
            let mut last_y = ball.pos.y;
            for _ in 0..400 {
                step(&mut ball, &layout, &physics);
                prop_assert!(ball.pos.y >= last_y);
                last_y = ball.pos.y;
            }
            prop_assert_eq!(ball.mode, BallMode::Landed { slot });
            prop_assert_eq!(ball.vel, Vec2::ZERO);
        }
    }
}
