//! Speed restoration for vehicles whose blocker was cleared

use super::components::{CarData, CarLane};

/// Lane speed used when the lane has no drivable data (about 54 km/h)
pub const FALLBACK_LANE_SPEED: f32 = 15.0;

/// Top speed assumed for a vehicle whose prefab has no [`CarData`]
pub const FALLBACK_MAX_SPEED: f32 = 20.0;

/// Lanes below this curviness are driven at the plain speed limit
pub const STRAIGHT_CURVINESS: f32 = 0.001;

/// Lowest speed the cornering formula may produce
pub const MIN_TURNING_SPEED: f32 = 1.0;

/// Lowest speed a freed vehicle is given, so it pushes through instead of crawling
pub const MIN_RESTORED_SPEED: f32 = 5.0;

const MIN_RESTORED_RATIO: f32 = 0.5;
const RAMP_FACTOR: f32 = 1.1;
const RAMP_STEP: f32 = 1.0;
const CORNERING_EPSILON: f32 = 1e-6;

/// Safe speed for `car` on a lane with the given limit and curviness
pub fn max_drive_speed(car: &CarData, speed_limit: f32, curviness: f32) -> f32 {
    if curviness < STRAIGHT_CURVINESS {
        return speed_limit;
    }

    let turning_speed = car.turning.x * car.max_speed
        / (curviness * car.max_speed + car.turning.x - car.turning.y).max(CORNERING_EPSILON);

    speed_limit.min(turning_speed.max(MIN_TURNING_SPEED))
}

/// Highest speed the vehicle may physically reach on its lane.
///
/// Without `CarData` the vehicle is treated as a [`FALLBACK_MAX_SPEED`] car with no
/// cornering limit. Without `CarLane` the lane is driven at [`FALLBACK_LANE_SPEED`].
pub fn lane_max_speed(lane: Option<&CarLane>, car: Option<&CarData>) -> f32 {
    let speed = match (lane, car) {
        (Some(lane), Some(car)) => {
            max_drive_speed(car, lane.speed_limit, lane.curviness).min(car.max_speed)
        }
        (None, Some(car)) => FALLBACK_LANE_SPEED.min(car.max_speed),
        (Some(lane), None) => lane.speed_limit.min(FALLBACK_MAX_SPEED),
        (None, None) => FALLBACK_LANE_SPEED.min(FALLBACK_MAX_SPEED),
    };
    speed.max(0.0)
}

/// Next target speed magnitude for a freed vehicle.
///
/// Ramps `current` up by 10% plus 1 m/s per tick, never below the floor and never above
/// `lane_max`. When the floor exceeds `lane_max` the lane maximum wins.
pub fn restored_speed(lane_max: f32, current: f32) -> f32 {
    let min_speed = MIN_RESTORED_SPEED.max(lane_max * MIN_RESTORED_RATIO);
    lane_max.min(min_speed.max(current * RAMP_FACTOR + RAMP_STEP))
}

/// Full resolution: lane maximum first, then the ramp.
pub fn resolve(lane: Option<&CarLane>, car: Option<&CarData>, current: f32) -> f32 {
    restored_speed(lane_max_speed(lane, car), current)
}

/// Gives `magnitude` the sign of `original`. Zero counts as forward.
pub fn with_sign_of(magnitude: f32, original: f32) -> f32 {
    if original < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}
