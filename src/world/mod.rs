pub mod parser;
pub mod terrain;
pub mod tile;
pub mod world;

pub use parser::{parse_layout, parse_layout_str, Layout, LayoutCell};
pub use terrain::{cell_of, centre_of, Cell, GridTerrain, TerrainSource};
pub use tile::{PheromoneRegistry, TileType, TileView, WorldTile};
pub use world::World;
