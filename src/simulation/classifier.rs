//! Keep-or-clear policy for obstruction markers

use super::components::{Blocker, CarCurrentLane};
use super::obstacle::ObstacleKind;

/// Outcome of classifying a blocker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Leave the marker and the speed alone
    Keep,
    /// Drop the marker and restore the travel speed
    Clear,
}

/// Decides whether a vehicle may ignore what is blocking it.
///
/// Rules are checked in order and the first match wins:
/// 1. no blocking entity
/// 2. signal, speed limit, caution or spawn markers
/// 3. vehicle is manoeuvring into a parking space
/// 4. trains
/// 5. cars, kept only for police, fire and ambulance
/// 6. bicycles
/// 7. pedestrians and animals
/// 8. anything else is kept
///
/// Reads its arguments only.
pub fn classify(lane: &CarCurrentLane, marker: &Blocker, obstacle: ObstacleKind) -> Decision {
    if !marker.is_blocked() {
        return Decision::Keep;
    }

    if marker.kind.is_regulatory() {
        return Decision::Keep;
    }

    if lane.is_parking() {
        return Decision::Keep;
    }

    match obstacle {
        ObstacleKind::Train => Decision::Keep,
        ObstacleKind::Car { emergency: true } => Decision::Keep,
        ObstacleKind::Car { emergency: false } => Decision::Clear,
        ObstacleKind::Bicycle => Decision::Clear,
        ObstacleKind::Pedestrian => Decision::Clear,
        ObstacleKind::Unknown => Decision::Keep,
    }
}
