//! Movement stage: integrates speed and lane position from the target speeds

use bevy::prelude::*;

use super::components::{NextLane, ParkingLane, SimClock, Speed};
use super::lane_network::LaneNetwork;
use super::navigation::{DEFAULT_ACCELERATION, DEFAULT_BRAKING};
use crate::simulation::{
    CarCurrentLane, CarData, CarLaneFlags, CarNavigation, Deleted, PrefabRef, Temp,
};

/// Moves `speed` toward `target` by at most one tick of acceleration or braking
pub fn approach_target(speed: f32, target: f32, acceleration: f32, braking: f32, delta: f32) -> f32 {
    if speed < target {
        (speed + acceleration * delta).min(target)
    } else {
        (speed - braking * delta).max(target)
    }
}

/// System to move vehicles along their lanes
///
/// Only the magnitude of the target speed is used; the demo has no reversing vehicles.
#[allow(clippy::type_complexity)]
pub fn move_vehicles(
    clock: Res<SimClock>,
    network: Res<LaneNetwork>,
    parking_lanes: Query<(), With<ParkingLane>>,
    prefabs: Query<&CarData>,
    mut vehicles: Query<
        (
            &PrefabRef,
            &CarNavigation,
            &mut Speed,
            &mut CarCurrentLane,
            &mut NextLane,
        ),
        (Without<Deleted>, Without<Temp>),
    >,
) {
    for (prefab, navigation, mut speed, mut current_lane, mut next_lane) in &mut vehicles {
        let (acceleration, braking) = prefabs
            .get(prefab.0)
            .map_or((DEFAULT_ACCELERATION, DEFAULT_BRAKING), |car| {
                (car.acceleration, car.braking)
            });

        speed.0 = approach_target(
            speed.0,
            navigation.max_speed.abs(),
            acceleration,
            braking,
            clock.delta,
        );
        current_lane.curve_position += speed.0 * clock.delta;

        // Hand over to the following lane(s) once past the end
        while let Some(length) = network.lane_length(current_lane.lane) {
            if current_lane.curve_position < length {
                break;
            }

            match next_lane.0.take() {
                Some(next) => {
                    current_lane.curve_position -= length;
                    current_lane.lane = next;
                    if parking_lanes.contains(next) {
                        current_lane.flags.insert(CarLaneFlags::PARKING_SPACE);
                    } else {
                        current_lane.flags.remove(CarLaneFlags::PARKING_SPACE);
                    }
                }
                None => {
                    // Dead end
                    current_lane.curve_position = length;
                    speed.0 = 0.0;
                    break;
                }
            }
        }
    }
}
