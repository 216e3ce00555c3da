// --- File: crates/shiftclaim_gcal/src/lib.rs ---
// Declare modules within this crate
pub mod auth;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod service;
#[cfg(test)]
mod service_test;

pub use auth::{create_calendar_hub, HubType};
pub use service::{GcalServiceError, GoogleCalendarService};
