//! Roster containers and the operations over them.
//!
//! The `RosterState` struct holds the three ordered containers (goalkeeper
//! slots, main slots, wait queue) plus the payment ledger; `RosterEngine`
//! implements every state transition over it.

pub mod draw;
pub mod engine;
pub mod payment;
pub mod pending;
pub mod slots;
pub mod state;

pub use draw::TeamDraw;
pub use engine::RosterEngine;
pub use payment::{PaymentLedger, PaymentMethod, PaymentRecord};
pub use pending::{PendingPayment, PendingPayments};
pub use slots::{SlotList, GOALKEEPER_CAPACITY, MAIN_CAPACITY};
pub use state::RosterState;
