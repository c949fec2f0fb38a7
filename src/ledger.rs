//! Play ledger
//!
//! In-memory tally of completed plays. Serializable so a host can persist
//! it however it likes.

use serde::{Deserialize, Serialize};

use crate::consts::COST_TO_PLAY;
use crate::sim::state::Outcome;

/// Most recent plays kept for display
pub const MAX_LEDGER_ENTRIES: usize = 50;

/// A single completed play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub payout: i32,
    pub label: String,
    /// Slot index, `None` when the ball missed every slot
    pub slot: Option<usize>,
}

impl From<&Outcome> for LedgerEntry {
    fn from(outcome: &Outcome) -> Self {
        Self {
            payout: outcome.payout,
            label: outcome.label.clone(),
            slot: outcome.slot,
        }
    }
}

/// Running totals across plays
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Ledger {
    /// Newest first, capped at [`MAX_LEDGER_ENTRIES`]
    pub entries: Vec<LedgerEntry>,
    plays: u32,
    paid_out: i64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolved play
    pub fn record(&mut self, outcome: &Outcome) {
        self.plays += 1;
        self.paid_out += i64::from(outcome.payout);

        self.entries.insert(0, LedgerEntry::from(outcome));
        self.entries.truncate(MAX_LEDGER_ENTRIES);

        log::info!(
            "Play {} paid {} (net {})",
            self.plays,
            outcome.label,
            self.net()
        );
    }

    pub fn plays(&self) -> u32 {
        self.plays
    }

    pub fn total_paid_out(&self) -> i64 {
        self.paid_out
    }

    pub fn total_cost(&self) -> i64 {
        i64::from(self.plays) * i64::from(COST_TO_PLAY)
    }

    /// Payouts minus what the plays cost
    pub fn net(&self) -> i64 {
        self.paid_out - self.total_cost()
    }

    /// Largest payout among the kept entries
    pub fn best(&self) -> Option<i32> {
        self.entries.iter().map(|e| e.payout).max()
    }

    pub fn is_empty(&self) -> bool {
        self.plays == 0
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
