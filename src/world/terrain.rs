use crate::direction::Direction;
use crate::position::Position;
use crate::world::tile::{PheromoneRegistry, TileView, WorldTile};
use std::collections::HashMap;

/// Grid cell coordinate `(column, row)` a position falls into
pub type Cell = (i64, i64);

/// Answers "which tiles surround this position?" for an ant
///
/// Order of the returned tiles carries no meaning; ants shuffle them.
pub trait TerrainSource {
    fn query_terrain(&self, position: Position) -> Vec<TileView>;
}

impl<F> TerrainSource for F
where
    F: Fn(Position) -> Vec<TileView>,
{
    fn query_terrain(&self, position: Position) -> Vec<TileView> {
        self(position)
    }
}

/// Cell containing `position` on a grid of `tile_size` squares
#[inline]
pub fn cell_of(position: Position, tile_size: f64) -> Cell {
    (
        (position.x / tile_size).floor() as i64,
        (position.y / tile_size).floor() as i64,
    )
}

/// Centre of `cell` on a grid of `tile_size` squares
#[inline]
pub fn centre_of(cell: Cell, tile_size: f64) -> Position {
    Position::new(
        cell.0 as f64 * tile_size + tile_size / 2.0,
        cell.1 as f64 * tile_size + tile_size / 2.0,
    )
}

/// Four-neighbour terrain over the world's tile registry
///
/// Looks one tile size away in each [`Direction`] and reports whichever
/// tiles are registered there, with their current pheromone state.
pub struct GridTerrain<'a> {
    pub tiles: &'a [WorldTile],
    pub index: &'a HashMap<Cell, usize>,
    pub pheromones: &'a PheromoneRegistry,
    pub tile_size: f64,
}

impl TerrainSource for GridTerrain<'_> {
    fn query_terrain(&self, position: Position) -> Vec<TileView> {
        Direction::ALL
            .iter()
            .filter_map(|direction| {
                let (dx, dy) = direction.unit();
                let probe = position.offset(dx * self.tile_size, dy * self.tile_size);
                self.index.get(&cell_of(probe, self.tile_size))
            })
            .map(|&idx| self.tiles[idx].view(self.pheromones))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::tile::TileType;

    #[test]
    fn test_cell_roundtrip() {
        for cell in [(0, 0), (3, 7), (-2, 5)] {
            assert_eq!(cell_of(centre_of(cell, 20.0), 20.0), cell);
        }
    }

    #[test]
    fn test_cell_lookup_tolerates_rounding() {
        let tile_size = 0.1;
        let centre = centre_of((3, 0), tile_size);
        let probe = centre.offset(tile_size, 0.0);

        assert_eq!(cell_of(probe, tile_size), (4, 0));
    }

    #[test]
    fn test_grid_terrain_reports_registered_neighbours() {
        let tile_size = 20.0;
        let tiles: Vec<WorldTile> = [((1, 1), TileType::Spawn), ((2, 1), TileType::Food), ((1, 0), TileType::Wall)]
            .iter()
            .map(|&(cell, tile_type)| WorldTile::new(centre_of(cell, tile_size), tile_type))
            .collect();
        let index: HashMap<Cell, usize> = tiles
            .iter()
            .enumerate()
            .map(|(i, t)| (cell_of(t.centre(), tile_size), i))
            .collect();
        let pheromones = PheromoneRegistry::new();
        let terrain = GridTerrain {
            tiles: &tiles,
            index: &index,
            pheromones: &pheromones,
            tile_size,
        };

        let mut around = terrain.query_terrain(centre_of((1, 1), tile_size));
        around.sort_by(|a, b| a.centre.x.total_cmp(&b.centre.x));

        assert_eq!(around.len(), 2);
        assert_eq!(around[0].tile_type, TileType::Wall);
        assert_eq!(around[1].tile_type, TileType::Food);
    }
}
