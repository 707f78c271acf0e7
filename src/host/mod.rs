//! Demonstration host for the unblock engine
//!
//! Owns everything the engine treats as external: lanes, signals, route choice,
//! look-ahead and motion. Runs its navigation systems in [`VehicleStage::Navigation`] and
//! its motion systems in [`VehicleStage::Movement`], so the unblock pass always sits
//! between them.

mod components;
mod lane_network;
mod movement;
mod navigation;
mod signal;
mod stats;
mod world;

use bevy::prelude::*;

use crate::simulation::{UnblockPlugin, VehicleStage};

pub use components::{Crossing, NextLane, ParkingLane, SimClock, SimRng, Speed};
pub use lane_network::LaneNetwork;
pub use movement::{approach_target, move_vehicles};
pub use navigation::{
    approach_speed, index_lane_occupants, plan_vehicles, stopping_distance, SAFE_GAP,
};
pub use signal::{cycle_signals, SignalPhase, TrafficSignal};
pub use stats::{accumulate_stats, log_summary, DemoStats};
pub use world::{bicycle, build_demo_world, sedan, truck, DemoConfig, DemoLayout};

/// System to advance the simulation clock by one tick
pub fn advance_clock(mut clock: ResMut<SimClock>) {
    clock.tick += 1;
    clock.elapsed += clock.delta;
}

/// Plugin to register the host's navigation and movement stages
pub struct DemoHostPlugin;

impl Plugin for DemoHostPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<UnblockPlugin>() {
            app.add_plugins(UnblockPlugin);
        }

        app.init_resource::<SimClock>()
            .init_resource::<SimRng>()
            .init_resource::<LaneNetwork>()
            .init_resource::<DemoStats>()
            .add_systems(
                FixedUpdate,
                (advance_clock, cycle_signals, index_lane_occupants, plan_vehicles)
                    .chain()
                    .in_set(VehicleStage::Navigation),
            )
            .add_systems(
                FixedUpdate,
                (move_vehicles, accumulate_stats)
                    .chain()
                    .in_set(VehicleStage::Movement),
            );
    }
}
