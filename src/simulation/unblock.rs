//! The per-tick pass that frees vehicles from blockers they may ignore

use bevy::prelude::*;
use log::{debug, trace};

use super::classifier::{classify, Decision};
use super::components::{
    Ambulance, Blocker, Car, CarCurrentLane, CarData, CarLane, CarNavigation, Deleted,
    FireEngine, PoliceCar, PrefabRef, Temp,
};
use super::obstacle::{ObstacleKind, ObstacleTagQuery};
use super::speed;

/// Feature switch, read once per tick
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnblockSettings {
    pub enabled: bool,
}

impl Default for UnblockSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// What the last pass did. Overwritten every tick and never read back by the engine.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnblockReport {
    /// Vehicles the selector produced
    pub examined: usize,
    /// Of those, how many had a blocking entity
    pub blocked: usize,
    /// Blockers dropped this tick
    pub cleared: usize,
}

impl UnblockReport {
    pub fn kept(&self) -> usize {
        self.blocked - self.cleared
    }
}

/// Ordinary cars that are live in the simulation
pub type CandidateFilter = (
    With<Car>,
    Without<PoliceCar>,
    Without<FireEngine>,
    Without<Ambulance>,
    Without<Deleted>,
    Without<Temp>,
);

/// Selects ordinary cars with a blocker, classifies each blocker and, when it may be
/// ignored, clears it and writes the restored speed in the same step.
#[allow(clippy::type_complexity)]
pub fn clear_blockers(
    settings: Res<UnblockSettings>,
    mut report: ResMut<UnblockReport>,
    mut vehicles: Query<
        (
            Entity,
            &mut CarNavigation,
            &mut Blocker,
            &CarCurrentLane,
            &PrefabRef,
        ),
        CandidateFilter,
    >,
    lanes: Query<&CarLane>,
    prefabs: Query<&CarData>,
    obstacles: Query<ObstacleTagQuery>,
) {
    *report = UnblockReport::default();

    if !settings.enabled {
        return;
    }

    for (entity, mut navigation, mut blocker, current_lane, prefab) in &mut vehicles {
        report.examined += 1;

        let Some(blocking) = blocker.blocker else {
            continue;
        };
        report.blocked += 1;

        let obstacle = ObstacleKind::of(blocking, &obstacles);
        if classify(current_lane, &blocker, obstacle) == Decision::Keep {
            continue;
        }

        let restored = speed::resolve(
            lanes.get(current_lane.lane).ok(),
            prefabs.get(prefab.0).ok(),
            navigation.max_speed.abs(),
        );
        trace!(
            "{:?} ignores {:?} ({:?}), speed {:.2} -> {:.2}",
            entity,
            blocking,
            obstacle,
            navigation.max_speed,
            restored
        );

        navigation.max_speed = speed::with_sign_of(restored, navigation.max_speed);
        blocker.clear();
        report.cleared += 1;
    }

    if report.blocked > 0 {
        debug!(
            "unblock pass: {} examined, {} blocked, {} cleared",
            report.examined, report.blocked, report.cleared
        );
    }
}
