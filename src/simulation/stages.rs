//! Per-tick stage ordering for vehicle systems.
//!
//! ```text
//! Navigation  →  Unblock  →  Movement
//! ```
//!
//! * **Navigation** – route choice, look-ahead, setting blockers and target speeds.
//! * **Unblock** – [`clear_blockers`]; drops blockers vehicles may ignore.
//! * **Movement** – integrates speed and position from the target speeds.
//!
//! All three run in `FixedUpdate`. Host systems place themselves with
//! `.in_set(VehicleStage::X)`.

use bevy::prelude::*;
use log::info;

use super::unblock::{clear_blockers, UnblockReport, UnblockSettings};

/// Ordered phases of a vehicle tick, configured as a chain
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum VehicleStage {
    /// Pathing and look-ahead
    Navigation,
    /// Blocker clearing
    Unblock,
    /// Motion integration
    Movement,
}

/// Registers the unblock pass between navigation and movement
pub struct UnblockPlugin;

impl Plugin for UnblockPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UnblockSettings>()
            .init_resource::<UnblockReport>()
            .configure_sets(
                FixedUpdate,
                (
                    VehicleStage::Navigation,
                    VehicleStage::Unblock,
                    VehicleStage::Movement,
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, clear_blockers.in_set(VehicleStage::Unblock));

        info!("clear_blockers registered after navigation, before movement");
    }
}
