use bevy::log::debug;

use crate::config::MAX_ROADS;
use crate::grid::{DirectionSet, RoadTile, Tile, TileGrid, TilePos};

impl TileGrid {
    /// Lay a road on an empty tile and auto-connect it to adjacent roads.
    pub fn place_road(&mut self, pos: TilePos) -> bool {
        if !self.get(pos).is_some_and(Tile::is_empty) {
            return false;
        }
        if self.road_count >= MAX_ROADS {
            debug!("road cap of {} reached, rejecting ({}, {})", MAX_ROADS, pos.x, pos.y);
            return false;
        }
        self.set(pos, Tile::Road(RoadTile::default()));
        self.road_count += 1;
        self.reconnect_around(pos);
        true
    }

    /// Clear a road tile (and any sign on it) and disconnect its neighbours.
    pub fn remove_road(&mut self, pos: TilePos) -> bool {
        if !self.is_road(pos) {
            return false;
        }
        self.set(pos, Tile::Empty);
        self.road_count = self.road_count.saturating_sub(1);
        self.reconnect_around(pos);
        true
    }

    fn reconnect_around(&mut self, pos: TilePos) {
        self.recompute_connections(pos);
        let roads: Vec<TilePos> = self
            .neighbors(pos)
            .filter(|n| n.tile.is_road())
            .map(|n| n.pos)
            .collect();
        for npos in roads {
            self.recompute_connections(npos);
        }
    }

    /// Rebuild the connection mask of one road tile from a neighbour scan.
    pub fn recompute_connections(&mut self, pos: TilePos) {
        if !self.is_road(pos) {
            return;
        }
        let connections: DirectionSet = self
            .neighbors(pos)
            .filter(|n| n.tile.is_road())
            .map(|n| n.direction)
            .collect();
        if let Some(Tile::Road(road)) = self.get_mut(pos) {
            road.connections = connections;
        }
    }

    pub fn connections(&self, pos: TilePos) -> DirectionSet {
        self.get(pos)
            .and_then(Tile::road)
            .map_or(DirectionSet::EMPTY, |road| road.connections)
    }
}
