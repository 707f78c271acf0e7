//! Navigation stage: route choice and look-ahead
//!
//! Each vehicle looks down its lane (and into the lane it will take next) for the closest
//! reason to slow down: someone in the way, a red signal at the lane end, or a slower lane
//! ahead. The closest one becomes the vehicle's [`Blocker`] and caps its target speed.

use bevy::prelude::*;
use rand::seq::IndexedRandom;

use super::components::{Crossing, NextLane, SimRng, Speed};
use super::lane_network::LaneNetwork;
use super::signal::TrafficSignal;
use crate::simulation::{
    speed, Blocker, BlockerType, CarCurrentLane, CarData, CarLane, CarNavigation, Deleted,
    PrefabRef, Temp,
};

/// Distance kept to whatever is ahead, in metres
pub const SAFE_GAP: f32 = 2.0;

/// Extra look-ahead beyond the stopping distance
const LOOKAHEAD_MARGIN: f32 = 10.0;

/// Used for vehicles whose prefab has no [`CarData`]
pub const DEFAULT_ACCELERATION: f32 = 3.0;
pub const DEFAULT_BRAKING: f32 = 6.0;

/// Distance needed to stop from `speed`
pub fn stopping_distance(speed: f32, braking: f32) -> f32 {
    speed * speed / (2.0 * braking)
}

/// Highest speed from which a vehicle can slow to `end_speed` within `distance`
pub fn approach_speed(distance: f32, braking: f32, end_speed: f32) -> f32 {
    (end_speed * end_speed + 2.0 * braking * distance.max(0.0)).sqrt()
}

/// Tracks the tightest speed cap found so far
struct Hold {
    target: f32,
    blocker: Blocker,
}

impl Hold {
    fn new(lane_max: f32) -> Self {
        Self {
            target: lane_max,
            blocker: Blocker::cleared(),
        }
    }

    fn consider(&mut self, by: Entity, kind: BlockerType, allowed: f32) {
        if allowed < self.target {
            self.target = allowed;
            self.blocker = Blocker::new(by, kind, allowed);
        }
    }
}

/// System to index who stands where before anyone looks ahead
pub fn index_lane_occupants(
    mut network: ResMut<LaneNetwork>,
    vehicles: Query<(Entity, &CarCurrentLane), (Without<Deleted>, Without<Temp>)>,
    pedestrians: Query<(Entity, &Crossing), (Without<Deleted>, Without<Temp>)>,
) {
    let occupants = vehicles
        .iter()
        .map(|(entity, current_lane)| (current_lane.lane, current_lane.curve_position, entity))
        .chain(
            pedestrians
                .iter()
                .map(|(entity, crossing)| (crossing.lane, crossing.curve_position, entity)),
        );
    network.rebuild_occupancy(occupants);
}

/// System to pick the next lane, set blockers and target speeds
#[allow(clippy::type_complexity)]
pub fn plan_vehicles(
    network: Res<LaneNetwork>,
    mut rng: ResMut<SimRng>,
    signals: Query<(Entity, &TrafficSignal)>,
    lanes: Query<&CarLane>,
    prefabs: Query<&CarData>,
    speeds: Query<&Speed>,
    mut vehicles: Query<
        (
            Entity,
            &CarCurrentLane,
            &PrefabRef,
            &mut NextLane,
            &mut CarNavigation,
            &mut Blocker,
        ),
        (Without<Deleted>, Without<Temp>),
    >,
) {
    for (entity, current_lane, prefab, mut next_lane, mut navigation, mut blocker) in &mut vehicles
    {
        let lane = current_lane.lane;
        if !matches!(next_lane.0, Some(next) if network.is_successor(lane, next)) {
            next_lane.0 = network.successors(lane).choose(&mut rng.0).copied();
        }

        let car = prefabs.get(prefab.0).ok();
        let braking = car.map_or(DEFAULT_BRAKING, |car| car.braking);
        let current_speed = speeds.get(entity).map_or(0.0, |speed| speed.0);
        let lane_max = speed::lane_max_speed(lanes.get(lane).ok(), car);

        let lookahead =
            stopping_distance(current_speed.max(lane_max), braking) + SAFE_GAP + LOOKAHEAD_MARGIN;
        let remaining = network
            .lane_length(lane)
            .map_or(0.0, |length| (length - current_lane.curve_position).max(0.0));

        let mut hold = Hold::new(lane_max);

        if let Some((obstacle, gap)) =
            network.find_obstacle_ahead(lane, current_lane.curve_position, next_lane.0, lookahead)
        {
            if obstacle != entity {
                let lead_speed = speeds.get(obstacle).map_or(0.0, |speed| speed.0);
                hold.consider(
                    obstacle,
                    BlockerType::Object,
                    approach_speed(gap - SAFE_GAP, braking, lead_speed),
                );
            }
        }

        if remaining <= lookahead {
            if let Some((signal, _)) = signals
                .iter()
                .find(|(_, signal)| signal.lane == lane && signal.is_stop())
            {
                hold.consider(
                    signal,
                    BlockerType::Signal,
                    approach_speed(remaining - SAFE_GAP, braking, 0.0),
                );
            }

            if let Some(next) = next_lane.0 {
                if let Ok(next_data) = lanes.get(next) {
                    let next_max = speed::lane_max_speed(Some(next_data), car);
                    if next_max < lane_max {
                        hold.consider(
                            next,
                            BlockerType::Limit,
                            approach_speed(remaining, braking, next_max),
                        );
                    }
                }
            }
        }

        navigation.max_speed = speed::with_sign_of(hold.target, navigation.max_speed);
        *blocker = hold.blocker;
    }
}
