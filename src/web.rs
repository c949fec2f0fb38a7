//! Browser bindings
//!
//! The page owns the canvas, the dice widgets and the buttons. It drives a
//! [`PlinkoGame`] from `requestAnimationFrame`, uploads [`PlinkoGame::vertices`]
//! and reads phase/dice/outcome back for its overlays.

use wasm_bindgen::prelude::*;

use crate::config::{GameConfig, ObstacleStyle};
use crate::ledger::Ledger;
use crate::renderer::FrameMesh;
use crate::sim::dice::SUM_TO_LANE;
use crate::sim::session::{Session, SessionEvent};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Already initialized by an earlier module instance
        return;
    }
    log::info!("Dice Plinko starting...");
}

/// One game bound to one canvas
#[wasm_bindgen]
pub struct PlinkoGame {
    session: Session,
    mesh: FrameMesh,
    ledger: Ledger,
}

#[wasm_bindgen]
impl PlinkoGame {
    /// `preset` is "wedge" or "peg"; anything else falls back to wedge
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, preset: &str) -> PlinkoGame {
        let style = ObstacleStyle::from_str(preset).unwrap_or_default();
        Self::build(GameConfig::from_preset(style), width, height)
    }

    /// Build from a (possibly partial) JSON config
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(width: f32, height: f32, json: &str) -> Result<PlinkoGame, JsValue> {
        let config =
            GameConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::build(config, width, height))
    }

    fn build(config: GameConfig, width: f32, height: f32) -> PlinkoGame {
        let seed = js_sys::Date::now() as u64 ^ (js_sys::Math::random() * u32::MAX as f64) as u64;
        log::info!(
            "Game initialized ({}) with seed: {}",
            config.layout.style.as_str(),
            seed
        );
        PlinkoGame {
            session: Session::new(config, width, height, seed),
            mesh: FrameMesh::new(),
            ledger: Ledger::new(),
        }
    }

    pub fn roll(&mut self) -> bool {
        self.session.roll()
    }

    #[wasm_bindgen(js_name = playAgain)]
    pub fn play_again(&mut self) -> bool {
        self.session.play_again()
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Advance one frame. Returns the phase name after the tick.
    pub fn tick(&mut self) -> String {
        for event in self.session.tick(&mut self.mesh) {
            if let SessionEvent::Resolved(outcome) = event {
                self.ledger.record(&outcome);
            }
        }
        self.mesh.sync_overlay(&self.session);
        self.session.phase().as_str().to_string()
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.resize(width, height);
    }

    pub fn phase(&self) -> String {
        self.session.phase().as_str().to_string()
    }

    /// Last frame as `[x, y, r, g, b, a, ...]` triangles in pixels
    pub fn vertices(&self) -> Vec<f32> {
        self.mesh.as_floats().to_vec()
    }

    /// Displayed faces as `[die1, die2]`
    pub fn dice(&self) -> Vec<u8> {
        let dice = self.session.dice();
        vec![dice.die1, dice.die2]
    }

    /// Chosen lane (1-5), 0 before the roll settles
    pub fn lane(&self) -> u8 {
        self.session.lane().unwrap_or(0)
    }

    #[wasm_bindgen(js_name = outcomeLabel)]
    pub fn outcome_label(&self) -> Option<String> {
        self.session.outcome().map(|o| o.label.clone())
    }

    #[wasm_bindgen(js_name = outcomeValue)]
    pub fn outcome_value(&self) -> Option<i32> {
        self.session.outcome().map(|o| o.payout)
    }

    /// Payouts minus cost over every play so far
    pub fn net(&self) -> f64 {
        self.ledger.net() as f64
    }

    pub fn plays(&self) -> u32 {
        self.ledger.plays()
    }

    #[wasm_bindgen(js_name = ledgerJson)]
    pub fn ledger_json(&self) -> Result<String, JsValue> {
        self.ledger
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Flattened `[sum, lane, sum, lane, ...]` for the help table
    #[wasm_bindgen(js_name = sumToLaneTable)]
    pub fn sum_to_lane_table() -> Vec<u8> {
        SUM_TO_LANE.iter().flat_map(|&(sum, lane)| [sum, lane]).collect()
    }
}
