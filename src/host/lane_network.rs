use anyhow::{Context, Result};
use bevy::prelude::*;
use ordered_float::OrderedFloat;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::ops::Bound;

/// Lane connectivity and per-tick lane occupancy
///
/// Lane data itself lives on the lane entities; this resource only knows which lane leads
/// into which, how long each lane is, and who stood where at the start of the tick.
#[derive(Resource, Default)]
pub struct LaneNetwork {
    /// Directed graph of lanes; an edge means "continues into"
    graph: DiGraph<Entity, ()>,

    /// Maps lane entities to their node indices in the graph
    lane_to_node: HashMap<Entity, NodeIndex>,

    /// Lane lengths in metres
    lengths: HashMap<Entity, f32>,

    /// Occupants of each lane keyed by distance along it, rebuilt every tick
    occupants: HashMap<Entity, BTreeMap<OrderedFloat<f32>, Vec<Entity>>>,
}

impl LaneNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a lane to the graph. Adding a lane twice only updates its length.
    pub fn add_lane(&mut self, lane: Entity, length: f32) {
        self.lengths.insert(lane, length);

        if self.lane_to_node.contains_key(&lane) {
            return;
        }

        let node_index = self.graph.add_node(lane);
        self.lane_to_node.insert(lane, node_index);
    }

    /// Declares that the end of `from` continues into the start of `to`
    pub fn connect(&mut self, from: Entity, to: Entity) -> Result<()> {
        let from_node = *self
            .lane_to_node
            .get(&from)
            .with_context(|| format!("Lane {from:?} not found in lane network"))?;
        let to_node = *self
            .lane_to_node
            .get(&to)
            .with_context(|| format!("Lane {to:?} not found in lane network"))?;

        if self.graph.contains_edge(from_node, to_node) {
            anyhow::bail!("Lane {from:?} is already connected to {to:?}");
        }

        self.graph.add_edge(from_node, to_node, ());
        Ok(())
    }

    /// Lanes reachable from the end of `lane`
    pub fn successors(&self, lane: Entity) -> Vec<Entity> {
        let Some(node_index) = self.lane_to_node.get(&lane) else {
            return Vec::new();
        };

        let mut lanes: Vec<Entity> = self
            .graph
            .neighbors(*node_index)
            .map(|node| self.graph[node])
            .collect();
        // petgraph walks edges newest first
        lanes.reverse();
        lanes
    }

    pub fn is_successor(&self, lane: Entity, next: Entity) -> bool {
        match (self.lane_to_node.get(&lane), self.lane_to_node.get(&next)) {
            (Some(from), Some(to)) => self.graph.contains_edge(*from, *to),
            _ => false,
        }
    }

    pub fn lane_length(&self, lane: Entity) -> Option<f32> {
        self.lengths.get(&lane).copied()
    }

    pub fn lane_count(&self) -> usize {
        self.lane_to_node.len()
    }

    // Occupancy tracking

    /// Replaces the occupancy index with `(lane, distance, entity)` triples
    pub fn rebuild_occupancy<I>(&mut self, occupants: I)
    where
        I: IntoIterator<Item = (Entity, f32, Entity)>,
    {
        self.occupants.clear();
        for (lane, distance, entity) in occupants {
            self.occupants
                .entry(lane)
                .or_default()
                .entry(OrderedFloat(distance))
                .or_default()
                .push(entity);
        }
    }

    /// Number of entities recorded on `lane` by the last rebuild
    pub fn occupant_count(&self, lane: Entity) -> usize {
        self.occupants
            .get(&lane)
            .map(|by_distance| by_distance.values().map(Vec::len).sum())
            .unwrap_or_default()
    }

    /// First occupant strictly past `distance` on `lane`
    fn first_after(&self, lane: Entity, distance: Bound<OrderedFloat<f32>>) -> Option<(f32, Entity)> {
        self.occupants
            .get(&lane)?
            .range((distance, Bound::Unbounded))
            .find_map(|(at, entities)| entities.first().map(|entity| (at.into_inner(), *entity)))
    }

    /// Nearest occupant ahead of `distance` on `lane`, continuing onto `next_lane` when the
    /// end of `lane` is within `lookahead`.
    ///
    /// Returns the occupant and the gap to it in metres.
    pub fn find_obstacle_ahead(
        &self,
        lane: Entity,
        distance: f32,
        next_lane: Option<Entity>,
        lookahead: f32,
    ) -> Option<(Entity, f32)> {
        if let Some((at, entity)) = self.first_after(lane, Bound::Excluded(OrderedFloat(distance))) {
            let gap = at - distance;
            return (gap <= lookahead).then_some((entity, gap));
        }

        let remaining = (self.lane_length(lane)? - distance).max(0.0);
        if remaining > lookahead {
            return None;
        }

        let (at, entity) = self.first_after(next_lane?, Bound::Unbounded)?;
        let gap = remaining + at;
        (gap <= lookahead).then_some((entity, gap))
    }
}
