//! Session controller
//!
//! Owns the one ball/layout pair of a play and walks it through
//! `AwaitingRoll → Rolling → Dropping → Settling → Resolved`. The host calls
//! [`Session::tick`] once per display frame; all timers are tick counters
//! owned by the session, so dropping or resetting the session leaves
//! nothing scheduled behind.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::dice::DiceRoll;
use super::layout::{Layout, generate_layout};
use super::state::{Ball, BallMode, Outcome, SessionPhase};
use super::step::{TickResult, drop_into_slot, retarget_slot, snap_to_floor, step};
use crate::config::GameConfig;
use crate::renderer::Renderer;

/// Notifications for the host UI
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    PhaseChanged { from: SessionPhase, to: SessionPhase },
    /// Dice faces to show (every flash, then the final roll)
    DiceFaces(DiceRoll),
    /// Final roll and the lane it selects
    LaneChosen { roll: DiceRoll, lane: u8 },
    Bounced { obstacle: usize },
    EnteredSlot { slot: usize },
    /// Delivered once per completed play
    Resolved(Outcome),
}

/// Fire-once delay measured in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Countdown {
    remaining: u32,
}

impl Countdown {
    fn new(ticks: u32) -> Self {
        Self { remaining: ticks }
    }

    /// Advance one tick; true when the delay has run out
    fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }
}

/// One game session (single ball, single layout)
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    viewport: Vec2,
    rng: Pcg32,
    phase: SessionPhase,
    layout: Option<Layout>,
    ball: Option<Ball>,
    dice: DiceRoll,
    lane: Option<u8>,
    /// Ticks spent in the current phase
    phase_ticks: u32,
    /// Rolling: reveal deadline. Dropping: drop cap. Settling: settle cap.
    timer: Option<Countdown>,
    /// Landed/lost ball is shown this long before resolving
    hold: Option<Countdown>,
    pending: Option<Outcome>,
    outcome: Option<Outcome>,
    events: Vec<SessionEvent>,
    time_ticks: u64,
}

impl Session {
    /// New session for a `width` x `height` viewport
    pub fn new(config: GameConfig, width: f32, height: f32, seed: u64) -> Self {
        Self {
            config,
            viewport: Vec2::new(width, height),
            rng: Pcg32::seed_from_u64(seed),
            phase: SessionPhase::AwaitingRoll,
            layout: None,
            ball: None,
            dice: DiceRoll::default(),
            lane: None,
            phase_ticks: 0,
            timer: None,
            hold: None,
            pending: None,
            outcome: None,
            events: Vec::new(),
            time_ticks: 0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn ball(&self) -> Option<&Ball> {
        self.ball.as_ref()
    }

    /// Currently displayed dice faces
    pub fn dice(&self) -> DiceRoll {
        self.dice
    }

    /// Lane chosen by the final roll of this play
    pub fn lane(&self) -> Option<u8> {
        self.lane
    }

    /// Outcome of the resolved play
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Roll trigger. Ignored unless awaiting a roll; returns whether it took.
    pub fn roll(&mut self) -> bool {
        if !self.phase.accepts_roll() {
            log::debug!("Roll ignored in phase {}", self.phase.as_str());
            return false;
        }
        self.timer = Some(Countdown::new(self.config.timing.roll_ticks()));
        self.set_phase(SessionPhase::Rolling);
        true
    }

    /// "Play again" trigger. Ignored unless resolved; returns whether it took.
    pub fn play_again(&mut self) -> bool {
        if self.phase != SessionPhase::Resolved {
            return false;
        }
        self.reset();
        true
    }

    /// Abandon the current play from any phase: discards ball and layout,
    /// clears every timer and shows the idle dice.
    pub fn reset(&mut self) {
        self.layout = None;
        self.ball = None;
        self.lane = None;
        self.timer = None;
        self.hold = None;
        self.pending = None;
        self.outcome = None;
        self.dice = DiceRoll::default();
        if self.phase != SessionPhase::AwaitingRoll {
            self.set_phase(SessionPhase::AwaitingRoll);
        }
    }

    /// Take queued events without ticking
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance one frame: run the phase logic, then render if the board is up
    pub fn tick<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Vec<SessionEvent> {
        self.time_ticks += 1;
        self.phase_ticks += 1;

        match self.phase {
            SessionPhase::AwaitingRoll | SessionPhase::Resolved => {}
            SessionPhase::Rolling => self.tick_rolling(),
            SessionPhase::Dropping => self.tick_dropping(),
            SessionPhase::Settling => self.tick_settling(),
        }

        if let Some(layout) = &self.layout {
            renderer.render(layout, self.ball.as_ref());
        }

        self.drain_events()
    }

    /// New viewport size. An active board is regenerated and the ball
    /// rescaled proportionally; the phase is left alone.
    pub fn resize(&mut self, width: f32, height: f32) {
        let old = self.viewport;
        self.viewport = Vec2::new(width, height);
        if self.layout.is_none() {
            return;
        }

        let layout = generate_layout(width, height, &self.config.layout);
        log::info!("Resized board {}x{} -> {}x{}", old.x, old.y, width, height);

        let mut slot_lost = false;
        if let Some(ball) = &mut self.ball {
            ball.rescale(old, self.viewport, layout.ball_radius);
            let landed = matches!(ball.mode, BallMode::Landed { .. });
            if ball.mode.slot().is_some() {
                match retarget_slot(ball, &layout) {
                    Some(slot) if landed && self.pending.is_some() => {
                        self.pending = Some(slot_outcome(&layout, slot));
                    }
                    Some(_) => {}
                    // Slots always span the board, so this only guards
                    // layouts without slots
                    None => slot_lost = true,
                }
            }
        }

        self.layout = Some(layout);

        // The slot match no longer holds: the ball drops on from where it is
        if slot_lost && self.phase == SessionPhase::Settling {
            self.timer = Some(Countdown::new(self.config.timing.max_drop_ticks));
            self.hold = None;
            self.pending = None;
            self.set_phase(SessionPhase::Dropping);
        }
    }

    fn set_phase(&mut self, to: SessionPhase) {
        let from = self.phase;
        self.phase = to;
        self.phase_ticks = 0;
        log::info!("Phase {} -> {}", from.as_str(), to.as_str());
        self.events.push(SessionEvent::PhaseChanged { from, to });
    }

    fn tick_rolling(&mut self) {
        let timing = &self.config.timing;
        let flash_ticks = timing.roll_flash_ticks.max(1);
        let flashing = timing.roll_flashes * flash_ticks;

        if self.phase_ticks <= flashing && self.phase_ticks % flash_ticks == 0 {
            self.dice = DiceRoll::roll(&mut self.rng);
            self.events.push(SessionEvent::DiceFaces(self.dice));
            if self.phase_ticks == flashing {
                self.choose_lane();
            }
        }

        let due = self.timer.as_mut().is_none_or(|t| t.tick());
        if due {
            self.timer = None;
            if self.lane.is_none() {
                // No flashes configured: roll once now
                self.dice = DiceRoll::roll(&mut self.rng);
                self.events.push(SessionEvent::DiceFaces(self.dice));
                self.choose_lane();
            }
            self.start_drop();
        }
    }

    fn choose_lane(&mut self) {
        let lane = self.dice.lane();
        self.lane = Some(lane);
        log::info!(
            "Rolled {} + {} = {}, ball enters lane {}",
            self.dice.die1,
            self.dice.die2,
            self.dice.sum(),
            lane
        );
        self.events.push(SessionEvent::LaneChosen { roll: self.dice, lane });
    }

    fn start_drop(&mut self) {
        let lane = self.lane.unwrap_or(3);
        let layout = generate_layout(self.viewport.x, self.viewport.y, &self.config.layout);
        let timing = &self.config.timing;

        let pos = Vec2::new(layout.lane_x(lane), layout.top_band() * timing.spawn_height_factor);
        let jitter = (self.rng.random::<f32>() - 0.5) * timing.initial_vx_jitter;
        let vel = Vec2::new(jitter, timing.initial_vy);

        self.ball = Some(Ball::spawn(pos, vel, layout.ball_radius));
        self.layout = Some(layout);
        self.timer = Some(Countdown::new(timing.max_drop_ticks));
        self.set_phase(SessionPhase::Dropping);
    }

    fn tick_dropping(&mut self) {
        let (Some(ball), Some(layout)) = (&mut self.ball, &self.layout) else {
            return;
        };

        let mut result = step(ball, layout, &self.config.physics);

        let overdue = !matches!(result, TickResult::EnteredSlot { .. } | TickResult::FellOut)
            && self.timer.as_mut().is_some_and(|t| t.tick());
        if overdue {
            log::warn!(
                "Drop cap reached at ({:.1}, {:.1}), dropping ball into the slot below",
                ball.pos.x,
                ball.pos.y
            );
            result = match drop_into_slot(ball, layout) {
                Some(slot) => TickResult::EnteredSlot { slot },
                None => {
                    ball.mode = BallMode::OutOfBounds;
                    TickResult::FellOut
                }
            };
        }

        match result {
            TickResult::Bounced { obstacle } => {
                self.events.push(SessionEvent::Bounced { obstacle });
            }
            TickResult::EnteredSlot { slot } => {
                self.events.push(SessionEvent::EnteredSlot { slot });
                self.timer = Some(Countdown::new(self.config.timing.max_settle_ticks));
                self.set_phase(SessionPhase::Settling);
            }
            TickResult::FellOut => {
                log::warn!("Ball left the board without entering a slot");
                self.timer = None;
                self.begin_hold(Outcome::missed());
                self.set_phase(SessionPhase::Settling);
            }
            _ => {}
        }
    }

    fn tick_settling(&mut self) {
        if let Some(hold) = &mut self.hold {
            if hold.tick() {
                self.hold = None;
                self.resolve();
            }
            return;
        }

        let (Some(ball), Some(layout)) = (&mut self.ball, &self.layout) else {
            return;
        };

        let mut landed = match step(ball, layout, &self.config.physics) {
            TickResult::Landed { slot } => Some(slot),
            _ => None,
        };

        if landed.is_none() && self.timer.as_mut().is_some_and(|t| t.tick()) {
            log::debug!("Settle cap reached, snapping ball to the floor");
            landed = snap_to_floor(ball);
        }

        if let Some(slot) = landed {
            let outcome = slot_outcome(layout, slot);
            self.timer = None;
            self.begin_hold(outcome);
        }
    }

    fn begin_hold(&mut self, outcome: Outcome) {
        self.pending = Some(outcome);
        self.hold = Some(Countdown::new(self.config.timing.resolve_hold_ticks));
    }

    fn resolve(&mut self) {
        let outcome = self.pending.take().unwrap_or_else(Outcome::missed);
        log::info!("Play resolved: {} (slot {:?})", outcome.label, outcome.slot);
        self.outcome = Some(outcome.clone());
        self.set_phase(SessionPhase::Resolved);
        self.events.push(SessionEvent::Resolved(outcome));
    }
}

fn slot_outcome(layout: &Layout, slot: usize) -> Outcome {
    let prize = &layout.slots[slot];
    Outcome {
        payout: prize.value,
        label: prize.label.clone(),
        slot: Some(slot),
    }
}
