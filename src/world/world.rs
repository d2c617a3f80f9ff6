use crate::ant::{AntBot, AntId};
use crate::config::SimConfig;
use crate::observer::{NoopObserver, Observer};
use crate::pheromone::{Pheromone, PheromoneId, PheromoneType};
use crate::position::Position;
use crate::world::parser::Layout;
use crate::world::terrain::{cell_of, Cell, GridTerrain, TerrainSource};
use crate::world::tile::{PheromoneRegistry, TileType, TileView, WorldTile};
use std::collections::HashMap;
use tracing::{debug, info};

/// The simulated world: every tile, ant and pheromone, advanced tick by tick
///
/// The world is the only owner of its registries. Ants refer to pheromones
/// by position, pheromones refer to ants by id and tiles refer to pheromones
/// by id; all of those are resolved here when needed.
pub struct World {
    config: SimConfig,
    rng: fastrand::Rng,
    observer: Box<dyn Observer>,

    ants: Vec<AntBot>,
    next_ant_id: u64,
    pheromones: PheromoneRegistry,
    next_pheromone_id: u64,
    tiles: Vec<WorldTile>,
    tile_index: HashMap<Cell, usize>,
    spawn_points: Vec<Position>,

    foraging_ants: usize,
    gathering_ants: usize,
    dead_ants: usize,
    shortest_path_length: Option<usize>,
    current_shortest_path: Vec<Position>,
    ticks: u64,
}

impl World {
    /// Create an empty world reporting to `observer`
    pub fn new(config: SimConfig, observer: Box<dyn Observer>) -> Self {
        let rng = config.rng();
        Self {
            config,
            rng,
            observer,
            ants: Vec::new(),
            next_ant_id: 0,
            pheromones: PheromoneRegistry::new(),
            next_pheromone_id: 0,
            tiles: Vec::new(),
            tile_index: HashMap::new(),
            spawn_points: Vec::new(),
            foraging_ants: 0,
            gathering_ants: 0,
            dead_ants: 0,
            shortest_path_length: None,
            current_shortest_path: Vec::new(),
            ticks: 0,
        }
    }

    /// Create an empty world that reports to nobody
    pub fn headless(config: SimConfig) -> Self {
        Self::new(config, Box::new(NoopObserver))
    }

    /// Register every tile of `layout`
    pub fn load_layout(&mut self, layout: &Layout) {
        let tile_size = self.config.tile_size;
        for cell in layout.cells() {
            self.register_world_tile(cell.centre(tile_size), cell.tile_type);
        }
        debug!(
            tiles = self.tiles.len(),
            spawn_points = self.spawn_points.len(),
            "layout loaded"
        );
    }

    /// Run one tick: move every ant, clear out the dead, then age every pheromone
    pub fn tick(&mut self) {
        self.update_ants();
        self.update_pheromones();
        self.ticks += 1;

        debug!(
            tick = self.ticks,
            ants = self.ants.len(),
            foraging = self.foraging_ants,
            gathering = self.gathering_ants,
            dead = self.dead_ants,
            pheromones = self.pheromones.len(),
            shortest = ?self.shortest_path_length,
            "tick"
        );
    }

    /// Spawn an ant at `position`; several ants may share a position
    pub fn register_ant(&mut self, position: Position) -> AntId {
        let id = AntId::new(self.next_ant_id);
        self.next_ant_id += 1;

        let mut ant = AntBot::new(id, position, self.rng.fork());
        ant.set_max_nodes_remembered(self.config.max_nodes_remembered);
        self.ants.push(ant);
        id
    }

    /// Spawn an ant at a randomly chosen spawn tile; `None` without spawn tiles
    pub fn spawn_ant(&mut self) -> Option<AntId> {
        if self.spawn_points.is_empty() {
            return None;
        }
        let position = self.spawn_points[self.rng.usize(..self.spawn_points.len())];
        Some(self.register_ant(position))
    }

    /// Add a tile unless one already occupies that spot; `None` tiles are ignored
    pub fn register_world_tile(&mut self, position: Position, tile_type: TileType) {
        if tile_type == TileType::None {
            return;
        }
        let cell = cell_of(position, self.config.tile_size);
        if self.tile_index.contains_key(&cell) {
            return;
        }

        self.tile_index.insert(cell, self.tiles.len());
        self.tiles.push(WorldTile::new(position, tile_type));
        if tile_type == TileType::Spawn {
            self.spawn_points.push(position);
        }
        self.observer.update_tile_graphics(position, tile_type);
    }

    /// Change the type of the tile at `position`; returns false if nothing changed
    pub fn set_tile_type(&mut self, position: Position, tile_type: TileType) -> bool {
        let Some(&idx) = self.tile_index.get(&cell_of(position, self.config.tile_size)) else {
            return false;
        };
        let tile = &mut self.tiles[idx];
        let centre = tile.centre();
        let was_spawn = tile.tile_type() == TileType::Spawn;
        if !tile.set_tile_type(tile_type) {
            return false;
        }

        if was_spawn {
            self.spawn_points.retain(|p| *p != centre);
        }
        if tile_type == TileType::Spawn {
            self.spawn_points.push(centre);
        }
        self.observer.update_tile_graphics(centre, tile_type);
        true
    }

    /// Drop a pheromone (or reinforce an existing one) on behalf of `ant`
    ///
    /// Trail pheromones need `pheromones_enabled`, hazard pheromones need
    /// `smart_pheromones_enabled`. An existing hazard pheromone keeps its type.
    pub(crate) fn register_pheromone(
        &mut self,
        position: Position,
        kind: PheromoneType,
        ant: &mut AntBot,
    ) {
        let allowed = match kind {
            PheromoneType::Hazard => self.config.smart_pheromones_enabled,
            PheromoneType::Found | PheromoneType::None => self.config.pheromones_enabled,
        };
        if !allowed {
            return;
        }

        // Pheromones lie on tile centres so the tile can resolve them
        let tile = self
            .tile_index
            .get(&cell_of(position, self.config.tile_size))
            .copied();
        let position = tile.map_or(position, |idx| self.tiles[idx].centre());

        if let Some(existing) = self.pheromones.get_mut(&position) {
            if existing.pheromone_type() != PheromoneType::Hazard {
                existing.set_pheromone_type(kind);
            }
            existing.register_ant(ant.id());
        } else {
            let id = PheromoneId::new(self.next_pheromone_id);
            self.next_pheromone_id += 1;

            let mut pheromone = Pheromone::new(id, position, kind);
            pheromone.set_evaporation_rate(self.config.evaporation_rate);
            pheromone.register_ant(ant.id());
            self.pheromones.insert(position, pheromone);

            if let Some(idx) = tile {
                self.tiles[idx].register_pheromone(id);
            }
        }

        ant.register_pheromone_position(position);
    }

    /// Remove every ant and clear the statistics
    pub fn reset_ant_register(&mut self) {
        self.ants.clear();
        self.foraging_ants = 0;
        self.gathering_ants = 0;
        self.dead_ants = 0;
        self.shortest_path_length = None;
        self.current_shortest_path.clear();
    }

    pub fn reset_pheromone_register(&mut self) {
        self.pheromones.clear();
    }

    pub fn reset_world_tile_register(&mut self) {
        self.tiles.clear();
        self.tile_index.clear();
        self.spawn_points.clear();
    }

    /// Clear all three registers
    pub fn reset(&mut self) {
        self.reset_ant_register();
        self.reset_pheromone_register();
        self.reset_world_tile_register();
        self.ticks = 0;
    }

    pub fn set_evaporation_rate(&mut self, evaporation_rate: f64) {
        self.config.evaporation_rate = evaporation_rate;
        for pheromone in self.pheromones.values_mut() {
            pheromone.set_evaporation_rate(evaporation_rate);
        }
    }

    pub fn set_pheromones_enabled(&mut self, enabled: bool) {
        self.config.pheromones_enabled = enabled;
    }

    pub fn set_smart_pheromones_enabled(&mut self, enabled: bool) {
        self.config.smart_pheromones_enabled = enabled;
    }

    pub fn set_max_nodes_remembered(&mut self, max_nodes_remembered: usize) {
        self.config.max_nodes_remembered = max_nodes_remembered;
        for ant in &mut self.ants {
            ant.set_max_nodes_remembered(max_nodes_remembered);
        }
    }

    /// Live ants
    pub fn ant_count(&self) -> usize {
        self.ants.len()
    }

    pub fn foraging_ants(&self) -> usize {
        self.foraging_ants
    }

    pub fn gathering_ants(&self) -> usize {
        self.gathering_ants
    }

    /// Ants that died since the last reset
    pub fn dead_ants(&self) -> usize {
        self.dead_ants
    }

    /// Moves on the best known route; `None` (infinite) until some ant finds the target
    pub fn shortest_path_length(&self) -> Option<usize> {
        self.shortest_path_length
    }

    /// Best known route, target first
    pub fn shortest_path(&self) -> &[Position] {
        &self.current_shortest_path
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn ants(&self) -> &[AntBot] {
        &self.ants
    }

    pub fn ant(&self, id: AntId) -> Option<&AntBot> {
        self.ants.iter().find(|ant| ant.id() == id)
    }

    pub fn tile(&self, position: Position) -> Option<&WorldTile> {
        self.tile_index
            .get(&cell_of(position, self.config.tile_size))
            .map(|&idx| &self.tiles[idx])
    }

    pub fn tiles(&self) -> &[WorldTile] {
        &self.tiles
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Pheromone strength the tile at `position` offers ants; `None` if there is no tile
    pub fn tile_pheromone_strength(&self, position: Position) -> Option<f64> {
        self.tile(position)
            .map(|tile| tile.tile_pheromone_strength(&self.pheromones))
    }

    /// Pheromone on the tile containing `position`, or at exactly `position` off the grid
    pub fn pheromone_at(&self, position: Position) -> Option<&Pheromone> {
        self.pheromones.get(&self.pheromone_key(position))
    }

    /// Registry key for a pheromone dropped at `position`
    fn pheromone_key(&self, position: Position) -> Position {
        self.tile(position).map_or(position, WorldTile::centre)
    }

    pub fn pheromone_count(&self) -> usize {
        self.pheromones.len()
    }

    pub fn spawn_points(&self) -> &[Position] {
        &self.spawn_points
    }

    /// Tiles surrounding `position`, as an ant standing there would see them
    pub fn neighbours(&self, position: Position) -> Vec<TileView> {
        self.terrain().query_terrain(position)
    }

    fn terrain(&self) -> GridTerrain<'_> {
        GridTerrain {
            tiles: &self.tiles,
            index: &self.tile_index,
            pheromones: &self.pheromones,
            tile_size: self.config.tile_size,
        }
    }

    fn update_ants(&mut self) {
        self.foraging_ants = 0;
        self.gathering_ants = 0;

        let mut ants = std::mem::take(&mut self.ants);
        for ant in &mut ants {
            let terrain = GridTerrain {
                tiles: &self.tiles,
                index: &self.tile_index,
                pheromones: &self.pheromones,
                tile_size: self.config.tile_size,
            };
            ant.advance(&terrain, self.observer.as_ant_observer());

            if let Some(dropped) = ant.take_dropped_pheromone() {
                self.register_pheromone(dropped.position, dropped.kind, ant);
            }

            self.do_gathering_ant_logic(ant);
            self.do_ant_pheromone_deregistration(ant);
        }
        self.ants = ants;

        self.do_dead_ant_logic();
        self.do_foraging_ant_logic();
    }

    fn do_gathering_ant_logic(&mut self, ant: &AntBot) {
        if !ant.is_gathering() {
            return;
        }
        self.gathering_ants += 1;

        // Strictly shorter only: the current holder keeps ties
        let Some(length) = ant.shortest_path_length() else {
            return;
        };
        if self.shortest_path_length.map_or(true, |best| length < best) {
            info!(
                ant = ant.id().get(),
                length,
                previous = ?self.shortest_path_length,
                "shorter path found"
            );
            self.shortest_path_length = Some(length);
            self.current_shortest_path = ant.shortest_path().to_vec();
        }
    }

    fn do_ant_pheromone_deregistration(&mut self, ant: &mut AntBot) {
        for position in ant.take_deregistered_pheromones() {
            let key = self.pheromone_key(position);
            if let Some(pheromone) = self.pheromones.get_mut(&key) {
                pheromone.deregister_ant(ant.id());
            }
        }
    }

    fn do_dead_ant_logic(&mut self) {
        let before = self.ants.len();
        self.ants.retain(|ant| !ant.is_dead());
        let died = before - self.ants.len();
        if died > 0 {
            self.dead_ants += died;
            debug!(died, total = self.dead_ants, "ants died");
        }
    }

    fn do_foraging_ant_logic(&mut self) {
        self.foraging_ants = self.ants.iter().filter(|ant| ant.is_foraging()).count();
    }

    fn update_pheromones(&mut self) {
        self.pheromones.retain(|_, pheromone| !pheromone.evaporated());

        let strengths: HashMap<AntId, f64> = self
            .ants
            .iter()
            .map(|ant| (ant.id(), ant.dropped_pheromone_strength()))
            .collect();

        for pheromone in self.pheromones.values_mut() {
            pheromone.update(
                |ant| strengths.get(&ant).copied(),
                self.observer.as_pheromone_observer(),
            );
        }
    }

    /// Tile layout in the text format read by [`parse_layout`](crate::world::parse_layout)
    pub fn render_layout(&self) -> String {
        if self.tiles.is_empty() {
            return String::new();
        }

        let (mut min_col, mut min_row, mut max_col, mut max_row) = (0, 0, i64::MIN, i64::MIN);
        for &(col, row) in self.tile_index.keys() {
            min_col = min_col.min(col);
            min_row = min_row.min(row);
            max_col = max_col.max(col);
            max_row = max_row.max(row);
        }

        let mut out = String::new();
        for row in min_row..=max_row {
            let mut line = String::with_capacity((max_col - min_col + 1) as usize);
            for col in min_col..=max_col {
                let symbol = self
                    .tile_index
                    .get(&(col, row))
                    .map_or(' ', |&idx| self.tiles[idx].tile_type().symbol());
                line.push(symbol);
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PHEROMONE_MIN;
    use crate::world::parser::parse_layout_str;
    use crate::world::terrain::centre_of;

    fn world_from(layout: &str, config: SimConfig) -> World {
        let mut world = World::headless(config);
        world.load_layout(&parse_layout_str(layout).unwrap());
        world
    }

    fn seeded() -> SimConfig {
        SimConfig {
            seed: Some(11),
            ..SimConfig::default()
        }
    }

    fn at(col: i64, row: i64) -> Position {
        centre_of((col, row), SimConfig::default().tile_size)
    }

    #[test]
    fn test_world_creation() {
        let world = world_from("S.F\n#H.\n", seeded());

        assert_eq!(world.tile_count(), 6);
        assert_eq!(world.spawn_points(), &[at(0, 0)]);
        assert_eq!(world.ant_count(), 0);
        assert_eq!(world.shortest_path_length(), None);
    }

    #[test]
    fn test_tile_registration_is_idempotent() {
        let mut world = world_from("..\n", seeded());

        world.register_world_tile(at(0, 0), TileType::Wall);
        world.register_world_tile(at(5, 5), TileType::None);

        assert_eq!(world.tile_count(), 2);
        assert_eq!(world.tile(at(0, 0)).unwrap().tile_type(), TileType::Path);
    }

    #[test]
    fn test_ants_may_share_a_position() {
        let mut world = world_from("S\n", seeded());

        let a = world.spawn_ant().unwrap();
        let b = world.spawn_ant().unwrap();

        assert_ne!(a, b);
        assert_eq!(world.ant_count(), 2);
    }

    #[test]
    fn test_spawn_without_spawn_points() {
        let mut world = world_from("...\n", seeded());
        assert!(world.spawn_ant().is_none());
    }

    #[test]
    fn test_set_tile_type_tracks_spawn_points() {
        let mut world = world_from("S.\n", seeded());

        assert!(world.set_tile_type(at(1, 0), TileType::Spawn));
        assert!(world.set_tile_type(at(0, 0), TileType::Path));
        assert!(!world.set_tile_type(at(0, 0), TileType::None));
        assert!(!world.set_tile_type(at(9, 9), TileType::Path));

        assert_eq!(world.spawn_points(), &[at(1, 0)]);
    }

    #[test]
    fn test_neighbours() {
        let world = world_from("...\n.S.\n...\n", seeded());

        assert_eq!(world.neighbours(at(1, 1)).len(), 4);
        assert_eq!(world.neighbours(at(0, 0)).len(), 2);
    }

    #[test]
    fn test_hazard_pheromone_is_sticky() {
        let mut world = world_from("...\n", seeded());
        let spot = at(1, 0);
        let mut ant = AntBot::new(AntId::new(99), spot, fastrand::Rng::with_seed(1));

        world.register_pheromone(spot, PheromoneType::Hazard, &mut ant);
        world.register_pheromone(spot, PheromoneType::Found, &mut ant);

        let pheromone = world.pheromone_at(spot).unwrap();
        assert_eq!(pheromone.pheromone_type(), PheromoneType::Hazard);
        assert_eq!(pheromone.contributor_count(), 1);
        assert_eq!(world.pheromone_count(), 1);
        assert_eq!(ant.registered_pheromones(), &[spot]);
        assert_eq!(
            world.tile(spot).unwrap().tile_pheromone_type(&world.pheromones),
            PheromoneType::Hazard
        );
    }

    #[test]
    fn test_pheromone_switches() {
        let mut world = world_from("...\n", seeded());
        let mut ant = AntBot::new(AntId::new(1), at(0, 0), fastrand::Rng::with_seed(1));

        world.set_smart_pheromones_enabled(false);
        world.register_pheromone(at(0, 0), PheromoneType::Hazard, &mut ant);
        assert_eq!(world.pheromone_count(), 0);

        world.set_pheromones_enabled(false);
        world.set_smart_pheromones_enabled(true);
        world.register_pheromone(at(1, 0), PheromoneType::Found, &mut ant);
        assert_eq!(world.pheromone_count(), 0);
        assert_eq!(world.tile_pheromone_strength(at(1, 0)), Some(PHEROMONE_MIN));

        world.register_pheromone(at(1, 0), PheromoneType::Hazard, &mut ant);
        assert_eq!(world.pheromone_count(), 1);
    }

    #[test]
    fn test_evaporated_pheromones_are_removed() {
        let mut world = world_from("...\n", seeded());
        world.set_evaporation_rate(0.5);
        let mut ant = AntBot::new(AntId::new(1), at(0, 0), fastrand::Rng::with_seed(1));
        world.register_pheromone(at(2, 0), PheromoneType::Found, &mut ant);
        assert_eq!(world.pheromone_at(at(2, 0)).unwrap().evaporation_rate(), 0.5);

        // 1.0 halves each tick; below 0.01 after 7 updates, purged on the next tick
        for _ in 0..8 {
            world.tick();
        }

        assert_eq!(world.pheromone_count(), 0);
        assert_eq!(world.tile_pheromone_strength(at(2, 0)), Some(PHEROMONE_MIN));
    }

    #[test]
    fn test_setters_propagate() {
        let mut world = world_from("S\n", seeded());
        world.spawn_ant();
        let mut ant = AntBot::new(AntId::new(50), at(0, 0), fastrand::Rng::with_seed(1));
        world.register_pheromone(at(0, 0), PheromoneType::Found, &mut ant);

        world.set_max_nodes_remembered(2);
        world.set_evaporation_rate(0.3);

        assert_eq!(world.ants()[0].graph().max_nodes_remembered(), 2);
        assert_eq!(world.pheromone_at(at(0, 0)).unwrap().evaporation_rate(), 0.3);
    }

    #[test]
    fn test_resets() {
        let mut world = world_from("SH\n", seeded());
        world.spawn_ant();
        world.tick();
        assert_eq!(world.dead_ants(), 1);
        assert_eq!(world.pheromone_count(), 1);

        world.reset_ant_register();
        assert_eq!(world.dead_ants(), 0);

        world.reset_pheromone_register();
        assert_eq!(world.pheromone_count(), 0);

        world.reset();
        assert_eq!(world.tile_count(), 0);
        assert!(world.spawn_points().is_empty());
        assert_eq!(world.ticks(), 0);
    }

    #[test]
    fn test_off_centre_drops_land_on_the_tile() {
        let mut world = world_from("S.F\n", seeded());
        let corner = Position::new(0.0, 0.0);
        world.register_ant(corner);

        for _ in 0..8 {
            world.tick();
        }

        let trail = world.pheromone_at(corner).unwrap();
        assert_eq!(trail.position(), at(0, 0));
        assert!(world.pheromone_at(at(0, 0)).is_some());
        assert!(world.tile_pheromone_strength(corner).unwrap() > 1.0);
        assert!(world.tile_pheromone_strength(at(1, 0)).unwrap() > 1.0);
        assert!(world.pheromones.keys().all(|p| world.tile(*p).unwrap().centre() == *p));
    }

    #[test]
    fn test_render_layout_roundtrip() {
        let text = "#####\n#S..#\n# H F\n#####\n";
        let world = world_from(text, seeded());

        assert_eq!(world.render_layout(), text);
    }
}
