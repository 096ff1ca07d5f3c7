//! In-process HEMS backend simulator.
//!
//! [`TelemetrySimulator`] owns the demo records, mutates them on a periodic
//! tick and serves snapshots through the [`HemsBackend`] trait.

pub mod backend;
pub mod seed;
pub mod service;
pub mod state;
pub mod tick;
mod ticker;

pub use backend::HemsBackend;
pub use service::TelemetrySimulator;
pub use state::SimulatorState;
pub use tick::{apply_tick, TickSummary};
