//! What kind of thing is standing in a vehicle's way

use bevy::prelude::*;

use super::components::{Ambulance, Bicycle, Car, Creature, FireEngine, Human, PoliceCar, Train};

/// Query data used to read the tag set of a blocking entity
pub type ObstacleTagQuery = (
    Has<Train>,
    Has<Car>,
    Has<Bicycle>,
    Has<Human>,
    Has<Creature>,
    Has<PoliceCar>,
    Has<FireEngine>,
    Has<Ambulance>,
);

/// Tags present on a blocking entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObstacleTags {
    pub train: bool,
    pub car: bool,
    pub bicycle: bool,
    pub human: bool,
    pub creature: bool,
    pub police: bool,
    pub fire_engine: bool,
    pub ambulance: bool,
}

impl ObstacleTags {
    pub fn is_emergency(&self) -> bool {
        self.police || self.fire_engine || self.ambulance
    }
}

impl From<(bool, bool, bool, bool, bool, bool, bool, bool)> for ObstacleTags {
    fn from(
        (train, car, bicycle, human, creature, police, fire_engine, ambulance): (
            bool,
            bool,
            bool,
            bool,
            bool,
            bool,
            bool,
            bool,
        ),
    ) -> Self {
        Self {
            train,
            car,
            bicycle,
            human,
            creature,
            police,
            fire_engine,
            ambulance,
        }
    }
}

/// Category of a blocking entity, resolved once per obstruction marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Train,
    Car { emergency: bool },
    Bicycle,
    /// Humans and animals
    Pedestrian,
    Unknown,
}

impl ObstacleKind {
    /// Train wins over car, car over bicycle, bicycle over pedestrian.
    pub fn from_tags(tags: ObstacleTags) -> Self {
        if tags.train {
            Self::Train
        } else if tags.car {
            Self::Car {
                emergency: tags.is_emergency(),
            }
        } else if tags.bicycle {
            Self::Bicycle
        } else if tags.human || tags.creature {
            Self::Pedestrian
        } else {
            Self::Unknown
        }
    }

    /// Looks up `entity` in a tag query. Entities that no longer exist are `Unknown`.
    pub fn of(entity: Entity, tags: &Query<ObstacleTagQuery>) -> Self {
        tags.get(entity)
            .map(|item| Self::from_tags(ObstacleTags::from(item)))
            .unwrap_or(Self::Unknown)
    }
}

impl From<ObstacleTags> for ObstacleKind {
    fn from(tags: ObstacleTags) -> Self {
        Self::from_tags(tags)
    }
}
