use bevy::log::debug;

use crate::grid::{Tile, TileGrid, TilePos};

use super::types::Sign;

impl TileGrid {
    /// Attach `sign` to the road at `pos`, replacing any sign already there.
    pub fn place_sign(&mut self, pos: TilePos, sign: Sign) -> bool {
        match self.get_mut(pos) {
            Some(Tile::Road(road)) => {
                road.sign = Some(sign);
                true
            }
            _ => {
                debug!("sign {:?} rejected at ({}, {}): not a road", sign, pos.x, pos.y);
                false
            }
        }
    }

    pub fn remove_sign(&mut self, pos: TilePos) -> bool {
        match self.get_mut(pos) {
            Some(Tile::Road(road)) => road.sign.take().is_some(),
            _ => false,
        }
    }

    pub fn sign_at(&self, pos: TilePos) -> Option<Sign> {
        self.get(pos).and_then(Tile::road).and_then(|road| road.sign)
    }

    pub fn sign_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|tile| tile.road().is_some_and(|road| road.sign.is_some()))
            .count()
    }
}
