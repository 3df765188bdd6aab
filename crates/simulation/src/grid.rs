use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::buildings::Building;
use crate::config::{GRID_HEIGHT, GRID_WIDTH};
use crate::signs::Sign;

/// Compass direction on the tile grid. North is `-y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    S,
    E,
    W,
}

impl Direction {
    /// Scan order used for neighbour queries and random direction choice.
    pub const ALL: [Direction; 4] = [Direction::N, Direction::S, Direction::E, Direction::W];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::N => (0, -1),
            Direction::S => (0, 1),
            Direction::E => (1, 0),
            Direction::W => (-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::N => Direction::S,
            Direction::S => Direction::N,
            Direction::E => Direction::W,
            Direction::W => Direction::E,
        }
    }

    /// 90 degree clockwise turn.
    pub fn clockwise(self) -> Direction {
        match self {
            Direction::N => Direction::E,
            Direction::E => Direction::S,
            Direction::S => Direction::W,
            Direction::W => Direction::N,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Direction::N => 0b0001,
            Direction::S => 0b0010,
            Direction::E => 0b0100,
            Direction::W => 0b1000,
        }
    }
}

/// Bitmask of connected directions on a road tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const EMPTY: DirectionSet = DirectionSet(0);

    pub fn contains(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    pub fn insert(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Connected directions in `Direction::ALL` order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = DirectionSet::EMPTY;
        for dir in iter {
            set.insert(dir);
        }
        set
    }
}

/// Integer tile coordinate. Signed so that stepping off the map is
/// representable and rejected by `in_bounds` rather than wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: Direction) -> TilePos {
        let (dx, dy) = dir.delta();
        TilePos::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadTile {
    /// Derived from the neighbour scan; rewritten on every road add/remove.
    pub connections: DirectionSet,
    pub sign: Option<Sign>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Road(RoadTile),
    Building(Building),
}

impl Tile {
    pub fn is_road(&self) -> bool {
        matches!(self, Tile::Road(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Tile::Empty)
    }

    pub fn road(&self) -> Option<&RoadTile> {
        match self {
            Tile::Road(road) => Some(road),
            _ => None,
        }
    }

    pub fn building(&self) -> Option<&Building> {
        match self {
            Tile::Building(building) => Some(building),
            _ => None,
        }
    }
}

/// One entry of a neighbour scan.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'a> {
    pub pos: TilePos,
    pub direction: Direction,
    pub tile: &'a Tile,
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    pub tiles: Vec<Tile>,
    pub width: i32,
    pub height: i32,
    pub(crate) road_count: usize,
    pub(crate) building_count: usize,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT)
    }
}

impl TileGrid {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            tiles: vec![Tile::Empty; (width * height) as usize],
            width,
            height,
            road_count: 0,
            building_count: 0,
        }
    }

    #[inline]
    pub fn in_bounds(&self, pos: TilePos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    #[inline]
    fn index(&self, pos: TilePos) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| (pos.y * self.width + pos.x) as usize)
    }

    #[inline]
    pub fn get(&self, pos: TilePos) -> Option<&Tile> {
        self.index(pos).and_then(|i| self.tiles.get(i))
    }

    #[inline]
    pub fn get_mut(&mut self, pos: TilePos) -> Option<&mut Tile> {
        let idx = self.index(pos)?;
        self.tiles.get_mut(idx)
    }

    /// Replace the tile at `pos`. Returns false when out of bounds.
    ///
    /// This is the raw mutation; road connectivity and the road/building
    /// counters are maintained by `place_road`/`place_building` and friends.
    pub fn set(&mut self, pos: TilePos, tile: Tile) -> bool {
        match self.get_mut(pos) {
            Some(slot) => {
                *slot = tile;
                true
            }
            None => false,
        }
    }

    pub fn is_road(&self, pos: TilePos) -> bool {
        self.get(pos).is_some_and(Tile::is_road)
    }

    /// The four cardinal neighbours in N, S, E, W order, omitting out-of-bounds.
    pub fn neighbors(&self, pos: TilePos) -> impl Iterator<Item = Neighbor<'_>> {
        Direction::ALL.into_iter().filter_map(move |direction| {
            let npos = pos.step(direction);
            self.get(npos).map(|tile| Neighbor {
                pos: npos,
                direction,
                tile,
            })
        })
    }

    pub fn road_count(&self) -> usize {
        self.road_count
    }

    pub fn building_count(&self) -> usize {
        self.building_count
    }

    pub fn positions(&self) -> impl Iterator<Item = TilePos> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| TilePos::new(x, y)))
    }
}
