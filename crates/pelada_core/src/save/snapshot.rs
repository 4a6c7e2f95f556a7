use serde::{Deserialize, Serialize};

use crate::roster::slots::{GOALKEEPER_CAPACITY, MAIN_CAPACITY};
use crate::roster::PaymentRecord;

/// Wire shape of the persisted roster, matching the bot's JSON data file.
///
/// Missing fields deserialize as their defaults so data files written by
/// older deployments keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RosterSnapshot {
    pub goalkeeper_slots: Vec<Option<String>>,
    pub main_slots: Vec<Option<String>>,
    pub wait_queue: Vec<String>,
    pub payment_ledger: Vec<PaymentRecord>,
}

impl Default for RosterSnapshot {
    fn default() -> Self {
        Self {
            goalkeeper_slots: vec![None; GOALKEEPER_CAPACITY],
            main_slots: vec![None; MAIN_CAPACITY],
            wait_queue: Vec::new(),
            payment_ledger: Vec::new(),
        }
    }
}
