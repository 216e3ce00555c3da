// --- File: crates/services/shiftclaim_watcher/src/lib.rs ---
pub mod claim_loop;
pub mod context;
pub mod service_factory;

pub use claim_loop::{ClaimError, ClaimLoop, LoopExit, PollOutcome};
pub use context::{ClaimContext, LoopSettings};
