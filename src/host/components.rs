//! Host-side components and resources the unblock engine never touches

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Fixed-step simulation clock
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SimClock {
    /// Seconds per tick
    pub delta: f32,
    pub tick: u64,
    pub elapsed: f32,
}

impl SimClock {
    pub fn new(delta: f32) -> Self {
        Self {
            delta,
            tick: 0,
            elapsed: 0.0,
        }
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(0.1)
    }
}

/// Seeded RNG so demo runs are reproducible
#[derive(Resource)]
pub struct SimRng(pub StdRng);

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::seeded(0)
    }
}

/// Actual speed of a vehicle in m/s, integrated by the movement stage
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Speed(pub f32);

/// Lane the vehicle will continue into at the end of its current one
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NextLane(pub Option<Entity>);

/// Someone on foot standing in a lane
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    pub lane: Entity,
    pub curve_position: f32,
}

/// Marks a lane used to reach parking spaces
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ParkingLane;
