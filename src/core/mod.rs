//! Core module - events, errors, ordering and shared resources.
//!
//! This module provides the foundation that all other game systems build upon.

mod data;
mod error;
mod events;
mod plugin;
mod rng;
mod time;

pub use data::{parse_ron, read_ron, DataDirectory};
pub use error::ConfigError;
pub(crate) use error::{require_distance, require_non_negative, require_positive};
pub use events::*;
pub use plugin::{CorePlugin, SimulationSet};
pub use rng::{CombatRng, DEFAULT_SEED};
pub use time::{duration_from_secs, scale_duration};
