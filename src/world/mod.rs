//! World module - scene-exit triggers.

mod plugin;
mod triggers;

pub use plugin::WorldPlugin;
pub use triggers::{update_area_exits, AreaExit, EXIT_ARM_DELAY};
