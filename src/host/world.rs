//! Demo scenario: a one-way ring road with a parking detour
//!
//! ```text
//!   L0 (signal) -> L1 -> L2 -> L3 -> L4 (bend) -> L5 (slow zone) -> L0
//!                          \-> P (parking) -/
//! ```

use anyhow::{Context, Result};
use bevy::prelude::*;
use rand::Rng;

use super::components::{Crossing, NextLane, ParkingLane, SimRng, Speed};
use super::lane_network::LaneNetwork;
use super::signal::TrafficSignal;
use crate::simulation::{
    Bicycle, Blocker, Car, CarCurrentLane, CarData, CarLane, CarNavigation, Creature, Human,
    PoliceCar, PrefabRef,
};

/// Every n-th car is a police car
const POLICE_EVERY: usize = 8;
/// Every n-th car is a truck
const TRUCK_EVERY: usize = 5;

/// (length, speed limit, curviness) of each ring lane
const RING: [(f32, f32, f32); 6] = [
    (120.0, 20.0, 0.0),
    (80.0, 20.0, 0.0),
    (120.0, 20.0, 0.0),
    (80.0, 20.0, 0.0),
    (60.0, 20.0, 0.05),
    (60.0, 8.0, 0.0),
];

const PARKING_LENGTH: f32 = 40.0;
const PARKING_SPEED_LIMIT: f32 = 5.0;

/// How many of each participant to place
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub vehicles: usize,
    pub bicycles: usize,
    pub pedestrians: usize,
    pub seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            vehicles: 24,
            bicycles: 3,
            pedestrians: 2,
            seed: 7,
        }
    }
}

/// Entities created by [`build_demo_world`]
#[derive(Debug, Clone)]
pub struct DemoLayout {
    pub ring: Vec<Entity>,
    pub parking: Entity,
    pub signal: Entity,
    pub sedan: Entity,
    pub truck: Entity,
    pub bicycle: Entity,
}

pub fn sedan() -> CarData {
    CarData {
        max_speed: 30.0,
        turning: Vec2::new(0.5, 0.1),
        acceleration: 3.5,
        braking: 7.0,
    }
}

pub fn truck() -> CarData {
    CarData {
        max_speed: 22.0,
        turning: Vec2::new(0.35, 0.1),
        acceleration: 1.8,
        braking: 5.0,
    }
}

pub fn bicycle() -> CarData {
    CarData {
        max_speed: 6.0,
        turning: Vec2::new(0.8, 0.1),
        acceleration: 1.5,
        braking: 3.0,
    }
}

/// Populate `world` with the demo ring, its prefabs and participants.
///
/// Replaces any [`LaneNetwork`] and [`SimRng`] already present.
pub fn build_demo_world(world: &mut World, config: &DemoConfig) -> Result<DemoLayout> {
    let mut network = LaneNetwork::new();
    let mut rng = SimRng::seeded(config.seed);

    let ring: Vec<Entity> = RING
        .iter()
        .map(|&(length, speed_limit, curviness)| {
            let lane = world
                .spawn(CarLane {
                    speed_limit,
                    curviness,
                })
                .id();
            network.add_lane(lane, length);
            lane
        })
        .collect();

    for (index, &lane) in ring.iter().enumerate() {
        network
            .connect(lane, ring[(index + 1) % ring.len()])
            .context("Failed to close the ring")?;
    }

    let parking = world
        .spawn((CarLane::straight(PARKING_SPEED_LIMIT), ParkingLane))
        .id();
    network.add_lane(parking, PARKING_LENGTH);
    network
        .connect(ring[2], parking)
        .context("Failed to connect the parking detour")?;
    network
        .connect(parking, ring[3])
        .context("Failed to connect the parking detour")?;

    let signal = world.spawn(TrafficSignal::new(ring[0], 12.0, 8.0)).id();

    let sedan = world.spawn(sedan()).id();
    let truck = world.spawn(truck()).id();
    let bicycle_prefab = world.spawn(bicycle()).id();

    for index in 0..config.vehicles {
        let (lane, position) = random_spot(&mut rng, &ring, &network)?;
        let prefab = if index % TRUCK_EVERY == TRUCK_EVERY - 1 {
            truck
        } else {
            sedan
        };

        let mut vehicle = world.spawn((
            Car,
            PrefabRef(prefab),
            CarNavigation::default(),
            Blocker::cleared(),
            CarCurrentLane::new(lane, position),
            Speed::default(),
            NextLane::default(),
        ));
        if index % POLICE_EVERY == POLICE_EVERY - 1 {
            vehicle.insert(PoliceCar);
        }
    }

    for _ in 0..config.bicycles {
        let (lane, position) = random_spot(&mut rng, &ring, &network)?;
        world.spawn((
            Bicycle,
            PrefabRef(bicycle_prefab),
            CarNavigation::default(),
            Blocker::cleared(),
            CarCurrentLane::new(lane, position),
            Speed::default(),
            NextLane::default(),
        ));
    }

    for index in 0..config.pedestrians {
        let (lane, curve_position) = random_spot(&mut rng, &ring, &network)?;
        let crossing = Crossing {
            lane,
            curve_position,
        };
        if index % 2 == 0 {
            world.spawn((Human, crossing));
        } else {
            world.spawn((Creature, crossing));
        }
    }

    world.insert_resource(network);
    world.insert_resource(rng);

    Ok(DemoLayout {
        ring,
        parking,
        signal,
        sedan,
        truck,
        bicycle: bicycle_prefab,
    })
}

/// A random lane of the ring and a distance along it
fn random_spot(rng: &mut SimRng, ring: &[Entity], network: &LaneNetwork) -> Result<(Entity, f32)> {
    let lane = ring[rng.0.random_range(0..ring.len())];
    let length = network
        .lane_length(lane)
        .context("Ring lane missing from lane network")?;
    Ok((lane, rng.0.random_range(0.0..length)))
}
