use bevy::prelude::*;
use log::info;

use super::components::{SimClock, Speed};
use super::lane_network::LaneNetwork;
use crate::simulation::{Bicycle, Blocker, Car, UnblockReport};

/// Resource to track totals across the whole run
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct DemoStats {
    pub ticks: u64,
    /// Vehicle-ticks spent with a blocker that the unblock pass looked at
    pub total_blocked: usize,
    pub total_cleared: usize,
    /// Most blockers cleared in a single tick
    pub peak_cleared: usize,
}

impl DemoStats {
    pub fn total_kept(&self) -> usize {
        self.total_blocked - self.total_cleared
    }

    /// Share of examined blockers that were cleared, in percent
    pub fn clear_rate(&self) -> f32 {
        if self.total_blocked > 0 {
            self.total_cleared as f32 / self.total_blocked as f32 * 100.0
        } else {
            0.0
        }
    }
}

/// Fold the last unblock report into the running totals
pub fn accumulate_stats(report: Res<UnblockReport>, mut stats: ResMut<DemoStats>) {
    stats.ticks += 1;
    stats.total_blocked += report.blocked;
    stats.total_cleared += report.cleared;
    stats.peak_cleared = stats.peak_cleared.max(report.cleared);
}

/// Log a summary of the world state
pub fn log_summary(world: &mut World) {
    let clock = *world.resource::<SimClock>();
    let lanes = world.resource::<LaneNetwork>().lane_count();
    let stats = world.resource::<DemoStats>().clone();

    let mut cars = world.query_filtered::<(&Speed, &Blocker), With<Car>>();
    let (car_count, speed_sum, blocked_now) = cars.iter(world).fold(
        (0usize, 0.0f32, 0usize),
        |(count, sum, blocked), (speed, blocker)| {
            (count + 1, sum + speed.0, blocked + usize::from(blocker.is_blocked()))
        },
    );
    let bicycles = world
        .query_filtered::<(), With<Bicycle>>()
        .iter(world)
        .count();

    info!(
        "t={:.1}s tick={} lanes={} cars={} bicycles={}",
        clock.elapsed, clock.tick, lanes, car_count, bicycles
    );
    info!(
        "  mean car speed {:.2} m/s, cars blocked now: {}",
        if car_count > 0 {
            speed_sum / car_count as f32
        } else {
            0.0
        },
        blocked_now
    );
    info!(
        "  blockers cleared so far: {} of {} ({:.1}%)",
        stats.total_cleared,
        stats.total_blocked,
        stats.clear_rate()
    );
}
