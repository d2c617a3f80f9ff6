use crate::config::PHEROMONE_MIN;
use crate::pheromone::{Pheromone, PheromoneId, PheromoneType};
use crate::position::Position;
use std::collections::HashMap;

/// Pheromones owned by the world, keyed by where they lie
pub type PheromoneRegistry = HashMap<Position, Pheromone>;

/// Terrain type of a tile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileType {
    /// Walkable ground
    Path,
    /// Obstruction, never entered
    Wall,
    /// Deadly: an ant next to one dies
    Hazard,
    /// The search target
    Food,
    /// Where ants are born
    Spawn,
    /// "No change" sentinel, never stored on a tile
    None,
}

impl TileType {
    /// Layout character for this type
    pub const fn symbol(self) -> char {
        match self {
            TileType::Path => '.',
            TileType::Wall => '#',
            TileType::Hazard => 'H',
            TileType::Food => 'F',
            TileType::Spawn => 'S',
            TileType::None => ' ',
        }
    }

    /// Inverse of [`symbol`](Self::symbol); `None` for unknown characters
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(TileType::Path),
            '#' => Some(TileType::Wall),
            'H' => Some(TileType::Hazard),
            'F' => Some(TileType::Food),
            'S' => Some(TileType::Spawn),
            _ => None,
        }
    }

    /// Ants may step onto tiles of this type
    #[inline]
    pub const fn is_walkable(self) -> bool {
        matches!(self, TileType::Path | TileType::Spawn | TileType::Food)
    }
}

/// One cell of the world grid
///
/// A tile knows at most one pheromone, by id. The pheromone itself lives in
/// the world's registry; if it has been removed (or replaced) the reference
/// simply stops resolving.
#[derive(Clone, Debug)]
pub struct WorldTile {
    centre: Position,
    tile_type: TileType,
    pheromone: Option<PheromoneId>,
}

impl WorldTile {
    /// Create a tile; a `None` type falls back to `Wall`
    pub fn new(centre: Position, tile_type: TileType) -> Self {
        let tile_type = match tile_type {
            TileType::None => TileType::Wall,
            other => other,
        };
        Self {
            centre,
            tile_type,
            pheromone: None,
        }
    }

    #[inline]
    pub fn centre(&self) -> Position {
        self.centre
    }

    #[inline]
    pub fn tile_type(&self) -> TileType {
        self.tile_type
    }

    /// Change the tile type; returns false (and changes nothing) for `None`
    pub fn set_tile_type(&mut self, tile_type: TileType) -> bool {
        if tile_type == TileType::None {
            return false;
        }
        self.tile_type = tile_type;
        true
    }

    /// Point this tile at a pheromone without taking ownership of it
    pub fn register_pheromone(&mut self, pheromone: PheromoneId) {
        self.pheromone = Some(pheromone);
    }

    /// The tile's pheromone, if it is still in the registry
    pub fn pheromone<'a>(&self, registry: &'a PheromoneRegistry) -> Option<&'a Pheromone> {
        let id = self.pheromone?;
        registry.get(&self.centre).filter(|p| p.id() == id)
    }

    pub fn tile_pheromone_type(&self, registry: &PheromoneRegistry) -> PheromoneType {
        self.pheromone(registry)
            .map_or(PheromoneType::None, Pheromone::pheromone_type)
    }

    /// Strength used for tile selection; `PHEROMONE_MIN` without a live pheromone
    pub fn tile_pheromone_strength(&self, registry: &PheromoneRegistry) -> f64 {
        match self.pheromone(registry) {
            Some(p) if !p.evaporated() => p.pheromone_strength(),
            _ => PHEROMONE_MIN,
        }
    }

    /// Snapshot handed to ants by terrain queries
    pub fn view(&self, registry: &PheromoneRegistry) -> TileView {
        TileView {
            centre: self.centre,
            tile_type: self.tile_type,
            pheromone_type: self.tile_pheromone_type(registry),
            pheromone_strength: self.tile_pheromone_strength(registry),
        }
    }
}

/// What an ant can see of a neighbouring tile
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileView {
    pub centre: Position,
    pub tile_type: TileType,
    pub pheromone_type: PheromoneType,
    pub pheromone_strength: f64,
}

impl TileView {
    /// A tile with no pheromone on it
    pub fn bare(centre: Position, tile_type: TileType) -> Self {
        Self {
            centre,
            tile_type,
            pheromone_type: PheromoneType::None,
            pheromone_strength: PHEROMONE_MIN,
        }
    }
}
