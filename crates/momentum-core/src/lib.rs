//! Momentum core engine.
//!
//! Progression evaluation for the sales-enablement dashboard: scoring
//! completed analyses, advancing competency and streak state, deciding when
//! gated tools unlock, and detecting milestone achievements. Everything here
//! is framed in professional business language for the customer; the
//! mechanics underneath are a points-and-gates progression system.
//!
//! # Architecture
//!
//! Five components, each a pure function over explicit snapshots:
//! - [`scoring`] — action → point award with bonuses and streak multiplier
//! - [`progress`] — competency totals, category scores, daily streak
//! - [`gates`] — locked/unlocked status per tool from the action history
//! - [`unlocks`] — diff of two access snapshots into announcements
//! - [`milestones`] — one-time achievements against a fixed registry
//!
//! [`engine::Engine`] wires them into one completion cycle. Persistence is
//! the caller's job (see the `momentum-store` crate); nothing in this crate
//! performs I/O, reads clocks, or holds per-customer state.
//!
//! # Example
//!
//! ```
//! use momentum_core::engine::{CycleInput, Engine};
//! use momentum_core::types::ActionMetrics;
//!
//! let engine = Engine::builtin();
//! let now = "2026-03-01T10:00:00Z".parse().unwrap();
//! let outcome = engine
//!     .complete_action(&CycleInput::default(), ActionMetrics::Icp { score: 85.0 }, now)
//!     .unwrap();
//! assert_eq!(outcome.award.points, 46);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod gates;
pub mod milestones;
pub mod progress;
pub mod scoring;
pub mod types;
pub mod unlocks;

pub use config::EngineConfig;
pub use engine::{CycleInput, CycleOutcome, Engine};
pub use error::{MomentumError, Result};
