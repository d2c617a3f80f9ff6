use crate::config::{PROBABILITY_RANGE, RECENTLY_VISITED_PENALTY};
use crate::graph::AntGraph;
use crate::observer::AntObserver;
use crate::pheromone::PheromoneType;
use crate::position::Position;
use crate::world::{TerrainSource, TileType, TileView};

/// Identity of an ant within its world; ids are handed out in spawn order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AntId(u64);

impl AntId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Behavioural state of an ant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AntState {
    /// Searching for the target for the first time
    Foraging,
    /// Walking the committed route back to where it started, laying trail
    Gathering,
    /// Found the target at least once; searching again for a shorter route
    DroppingPheromone,
    /// Walked next to a hazard
    Dead,
}

/// Pheromone an ant left behind during its last advance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DroppedPheromone {
    pub position: Position,
    pub kind: PheromoneType,
    pub strength: f64,
}

/// A single ant
///
/// Each advance either moves the ant one tile (foraging, or walking its route
/// home) or resolves an encounter with food or a hazard next to it.
#[derive(Clone, Debug)]
pub struct AntBot {
    id: AntId,
    position: Position,
    state: AntState,
    graph: AntGraph,
    rng: fastrand::Rng,
    neighbours: Vec<TileView>,

    pheromone_type: PheromoneType,
    pheromone_strength: f64,
    dropped: Option<DroppedPheromone>,
    registered_pheromones: Vec<Position>,
    deregistered_pheromones: Vec<Position>,

    returning_to_source: bool,
    steps_from_target: usize,
    shortest_path_length: Option<usize>,
    /// Committed route home, target first
    route: Vec<Position>,
}

impl AntBot {
    /// Create a foraging ant at `position` drawing randomness from `rng`
    pub fn new(id: AntId, position: Position, rng: fastrand::Rng) -> Self {
        Self {
            id,
            position,
            state: AntState::Foraging,
            graph: AntGraph::new(position),
            rng,
            neighbours: Vec::new(),
            pheromone_type: PheromoneType::None,
            pheromone_strength: 0.0,
            dropped: None,
            registered_pheromones: Vec::new(),
            deregistered_pheromones: Vec::new(),
            returning_to_source: false,
            steps_from_target: 0,
            shortest_path_length: None,
            route: Vec::new(),
        }
    }

    /// Take one step
    pub fn advance(&mut self, terrain: &dyn TerrainSource, observer: &mut dyn AntObserver) {
        // Deregistrations are only reported for the advance that raised them
        self.deregistered_pheromones.clear();

        match self.state {
            AntState::Gathering => self.gather(observer),
            AntState::Foraging | AntState::DroppingPheromone => self.forage(terrain, observer),
            AntState::Dead => {}
        }
    }

    #[inline]
    pub fn id(&self) -> AntId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn state(&self) -> AntState {
        self.state
    }

    pub fn is_foraging(&self) -> bool {
        self.state == AntState::Foraging
    }

    /// True once the ant has found the target, whether or not it is walking home
    pub fn is_gathering(&self) -> bool {
        matches!(self.state, AntState::Gathering | AntState::DroppingPheromone)
    }

    pub fn is_dead(&self) -> bool {
        self.state == AntState::Dead
    }

    /// Pheromone dropped since the last call, if any; reading consumes it
    pub fn take_dropped_pheromone(&mut self) -> Option<DroppedPheromone> {
        self.dropped.take()
    }

    pub fn dropped_pheromone_type(&self) -> PheromoneType {
        self.pheromone_type
    }

    /// Trail strength this ant lays, `1 / route length`; 0.0 until a route is known
    pub fn dropped_pheromone_strength(&self) -> f64 {
        if self.is_gathering() {
            self.pheromone_strength
        } else {
            0.0
        }
    }

    /// Steps walked back from the target; `None` (infinite) before a route is known
    pub fn steps_from_target(&self) -> Option<usize> {
        self.is_gathering().then_some(self.steps_from_target)
    }

    /// Moves on the committed route; `None` (infinite) before a route is known
    pub fn shortest_path_length(&self) -> Option<usize> {
        self.shortest_path_length
    }

    /// Committed route from target (first) to start (last)
    pub fn shortest_path(&self) -> &[Position] {
        &self.route
    }

    pub fn graph(&self) -> &AntGraph {
        &self.graph
    }

    /// Remember that this ant contributes to the pheromone at `position`
    pub fn register_pheromone_position(&mut self, position: Position) {
        if !self.registered_pheromones.contains(&position) {
            self.registered_pheromones.push(position);
        }
    }

    pub fn registered_pheromones(&self) -> &[Position] {
        &self.registered_pheromones
    }

    /// Pheromones this ant stopped contributing to during the last advance
    pub fn take_deregistered_pheromones(&mut self) -> Vec<Position> {
        std::mem::take(&mut self.deregistered_pheromones)
    }

    pub fn set_max_nodes_remembered(&mut self, max_nodes_remembered: usize) {
        self.graph.set_max_nodes_remembered(max_nodes_remembered);
    }

    fn set_state(&mut self, state: AntState, observer: &mut dyn AntObserver) {
        self.state = state;
        match state {
            AntState::Gathering => observer.show_found_graphics(self.id),
            AntState::Foraging | AntState::DroppingPheromone | AntState::Dead => {
                observer.show_forage_graphics(self.id)
            }
        }
    }

    fn update_position(&mut self, position: Position, observer: &mut dyn AntObserver) {
        self.position = position;
        observer.update_graphics(self.id, position);
    }

    fn drop_pheromone(&mut self) {
        self.dropped = Some(DroppedPheromone {
            position: self.position,
            kind: self.pheromone_type,
            strength: self.dropped_pheromone_strength(),
        });
    }

    fn forage(&mut self, terrain: &dyn TerrainSource, observer: &mut dyn AntObserver) {
        // Shuffle in case the terrain always answers in the same order
        self.neighbours = terrain.query_terrain(self.position);
        self.rng.shuffle(&mut self.neighbours);

        for i in 0..self.neighbours.len() {
            let tile = self.neighbours[i];
            if self.found_food(&tile, observer) || self.encountered_hazard(&tile, observer) {
                return;
            }
        }

        let next = self.determine_next_position();
        self.update_position(next, observer);
        self.graph.add_node(next);
    }

    fn gather(&mut self, observer: &mut dyn AntObserver) {
        if !self.returning_to_source {
            self.set_state(AntState::DroppingPheromone, observer);
            return;
        }

        match self.route.get(self.steps_from_target).copied() {
            Some(next) => {
                self.update_position(next, observer);
                self.steps_from_target += 1;
            }
            None => {
                self.steps_from_target = 0;
                self.returning_to_source = false;
            }
        }

        self.drop_pheromone();
    }

    /// Commits to the route through `tile` if it is food and the route beats the best so far
    fn found_food(&mut self, tile: &TileView, observer: &mut dyn AntObserver) -> bool {
        if tile.tile_type != TileType::Food {
            return false;
        }

        self.graph.set_found_target(tile.centre);
        let candidate = self.graph.shortest_path();
        let length = candidate.len().saturating_sub(1).max(1);

        if self.shortest_path_length.is_some_and(|best| length >= best) {
            return false;
        }

        self.route = candidate.to_vec();
        self.set_state(AntState::Gathering, observer);
        self.shortest_path_length = Some(length);
        self.pheromone_strength = 1.0 / length as f64;
        self.pheromone_type = PheromoneType::Found;
        self.returning_to_source = true;
        self.steps_from_target = 0;
        self.deregistered_pheromones = std::mem::take(&mut self.registered_pheromones);
        true
    }

    fn encountered_hazard(&mut self, tile: &TileView, observer: &mut dyn AntObserver) -> bool {
        if tile.tile_type != TileType::Hazard {
            return false;
        }

        self.set_state(AntState::Dead, observer);
        self.pheromone_type = PheromoneType::Hazard;
        self.drop_pheromone();
        true
    }

    /// Roulette-wheel pick among the neighbours; stays put when nothing is enterable
    fn determine_next_position(&mut self) -> Position {
        if self.neighbours.is_empty() {
            return self.position;
        }

        let mut weights = self.calculate_neighbour_probabilities();
        let total: u64 = weights.iter().sum();
        if total == 0 {
            return self.position;
        }

        let normalisation = PROBABILITY_RANGE as f64 / total as f64;
        for weight in &mut weights {
            *weight = (*weight as f64 * normalisation) as u64;
        }

        let draw = self.rng.u64(1..=PROBABILITY_RANGE);
        match select_weighted(&weights, draw) {
            Some(idx) => self.neighbours[idx].centre,
            None => self.position,
        }
    }

    /// Raw selection weight of every neighbour, ties shaken apart
    fn calculate_neighbour_probabilities(&mut self) -> Vec<u64> {
        let pheromone_sum: f64 = self.neighbours.iter().map(|t| t.pheromone_strength).sum();

        let mut weights = Vec::with_capacity(self.neighbours.len());
        for i in 0..self.neighbours.len() {
            let tile = self.neighbours[i];
            weights.push(self.calculate_tile_probability_max(&tile, pheromone_sum));
        }

        // Small relative to the whole range, but scales with it
        let shake_range = PROBABILITY_RANGE / RECENTLY_VISITED_PENALTY;
        let unshaken = weights.clone();
        for (weight, &raw) in weights.iter_mut().zip(&unshaken) {
            // Zero weights stay zero: walls and hazards must remain unreachable
            if raw > 0 && unshaken.iter().filter(|&&w| w == raw).count() > 1 {
                *weight += self.rng.u64(..shake_range);
            }
        }

        weights
    }

    /// Share of the probability range `tile` may claim
    fn calculate_tile_probability_max(&mut self, tile: &TileView, pheromone_sum: f64) -> u64 {
        if tile.pheromone_type == PheromoneType::Hazard || !tile.tile_type.is_walkable() {
            return 0;
        }

        let mut range = PROBABILITY_RANGE;
        if self.graph.recently_visited(tile.centre) {
            range /= RECENTLY_VISITED_PENALTY;
        }

        let share = if pheromone_sum > 0.0 {
            tile.pheromone_strength / pheromone_sum
        } else {
            0.0
        };
        let probability_max = share * range as f64;

        // Enterable tiles must never end up with a zero weight
        if probability_max < 1.0 {
            self.rng.u64(1..=range)
        } else {
            probability_max as u64
        }
    }
}

/// Index of the weight whose cumulative slice (in ascending weight order)
/// first covers `draw`; falls back to the heaviest entry
///
/// Returns `None` only for an empty slice.
pub fn select_weighted(weights: &[u64], draw: u64) -> Option<usize> {
    let mut ranked: Vec<(u64, usize)> = weights.iter().copied().zip(0..).collect();
    ranked.sort_unstable();

    let mut cumulative = 0u64;
    for &(weight, idx) in &ranked {
        cumulative += weight;
        if weight > 0 && cumulative >= draw {
            return Some(idx);
        }
    }

    ranked.last().map(|&(_, idx)| idx)
}
