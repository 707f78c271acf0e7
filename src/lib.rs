//! Traffic Unblock Library
//!
//! Lets ordinary cars drive through the cars, bicycles and pedestrians blocking them while
//! still stopping for signals, trains, emergency vehicles and parking manoeuvres. Ships
//! with a small host simulation that runs headless.

pub mod host;
pub mod simulation;
