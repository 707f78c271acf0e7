//! Components the unblock engine reads and writes
//!
//! Vehicles, lanes and prefabs are ordinary entities owned by the host simulation.
//! The engine only ever overwrites [`Blocker`] and [`CarNavigation`] on vehicles.

use bevy::prelude::*;
use std::ops::BitOr;

/// Navigation state of a vehicle
///
/// `max_speed` is the target speed for the current tick. Its sign is the direction of
/// travel, so reversing vehicles carry a negative value.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct CarNavigation {
    pub max_speed: f32,
}

impl CarNavigation {
    pub fn new(max_speed: f32) -> Self {
        Self { max_speed }
    }
}

/// Why a vehicle is being held back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockerType {
    #[default]
    None,
    /// Red light or stop line
    Signal,
    /// Lower speed limit ahead
    Limit,
    Caution,
    /// Waiting to leave a spawn point
    Spawn,
    /// Some entity in the way; what it is gets decided from its tags
    Object,
}

impl BlockerType {
    /// Regulatory and safety markers that are respected no matter what they point at
    pub fn is_regulatory(self) -> bool {
        matches!(self, Self::Signal | Self::Limit | Self::Caution | Self::Spawn)
    }
}

/// Obstruction marker of a vehicle
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blocker {
    /// The entity in the way, if any
    pub blocker: Option<Entity>,
    pub kind: BlockerType,
    /// Speed cap in m/s imposed by the blocker, [`Blocker::UNCAPPED`] when there is none
    pub max_speed: u8,
}

impl Blocker {
    pub const UNCAPPED: u8 = u8::MAX;

    pub fn new(blocker: Entity, kind: BlockerType, max_speed: f32) -> Self {
        Self {
            blocker: Some(blocker),
            kind,
            max_speed: max_speed.clamp(0.0, Self::UNCAPPED as f32) as u8,
        }
    }

    pub fn cleared() -> Self {
        Self {
            blocker: None,
            kind: BlockerType::None,
            max_speed: Self::UNCAPPED,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.blocker.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::cleared();
    }
}

impl Default for Blocker {
    fn default() -> Self {
        Self::cleared()
    }
}

/// Flags describing what a vehicle is doing on its current lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CarLaneFlags(u32);

impl CarLaneFlags {
    pub const NONE: Self = Self(0);
    /// Pulling into or out of a parking space
    pub const PARKING_SPACE: Self = Self(1 << 0);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for CarLaneFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// The lane a vehicle currently occupies
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CarCurrentLane {
    pub lane: Entity,
    pub flags: CarLaneFlags,
    /// Distance travelled along the lane in metres
    pub curve_position: f32,
}

impl CarCurrentLane {
    pub fn new(lane: Entity, curve_position: f32) -> Self {
        Self {
            lane,
            flags: CarLaneFlags::NONE,
            curve_position,
        }
    }

    pub fn with_flags(mut self, flags: CarLaneFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn is_parking(&self) -> bool {
        self.flags.contains(CarLaneFlags::PARKING_SPACE)
    }
}

/// Drivable lane data, lives on the lane entity
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CarLane {
    /// m/s
    pub speed_limit: f32,
    /// Curvature of the lane, 0 for a straight segment
    pub curviness: f32,
}

impl CarLane {
    pub fn straight(speed_limit: f32) -> Self {
        Self {
            speed_limit,
            curviness: 0.0,
        }
    }
}

/// Points a vehicle at the prefab entity holding its [`CarData`]
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefabRef(pub Entity);

/// Static physical limits of a vehicle type, lives on the prefab entity
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CarData {
    /// Absolute top speed in m/s
    pub max_speed: f32,
    /// Cornering capability; `x` scales the speed kept through a bend, `y` offsets it
    pub turning: Vec2,
    /// m/s²
    pub acceleration: f32,
    /// m/s²
    pub braking: f32,
}

// Entity tags. They carry no data; only their presence matters.

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Car;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Bicycle;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Train;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Human;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Creature;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PoliceCar;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct FireEngine;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Ambulance;

/// Marked for removal by the host this tick
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Deleted;

/// Tool preview, not part of the running simulation
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Temp;
