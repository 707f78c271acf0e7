//! Blocker clearing engine
//!
//! Every tick, between the navigation and movement stages, ordinary cars that are held
//! back by other cars, bicycles or pedestrians are freed and given a smoothly restored
//! target speed. Signals, trains, emergency vehicles and parking manoeuvres are left alone.

mod classifier;
mod components;
mod obstacle;
pub mod speed;
mod stages;
mod unblock;

pub use classifier::{classify, Decision};
pub use components::{
    Ambulance, Bicycle, Blocker, BlockerType, Car, CarCurrentLane, CarData, CarLane,
    CarLaneFlags, CarNavigation, Creature, Deleted, FireEngine, Human, PoliceCar, PrefabRef,
    Temp, Train,
};
pub use obstacle::{ObstacleKind, ObstacleTagQuery, ObstacleTags};
pub use stages::{UnblockPlugin, VehicleStage};
pub use unblock::{clear_blockers, CandidateFilter, UnblockReport, UnblockSettings};
