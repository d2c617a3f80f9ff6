use crate::ant::AntId;
use crate::config::{HAZARD_PHEROMONE_STRENGTH, PHEROMONE_MIN};
use crate::observer::PheromoneObserver;
use crate::position::Position;
use std::collections::BTreeSet;

/// What a pheromone marks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PheromoneType {
    /// Lies on a route leading to the target
    Found,
    /// Marks the spot where an ant died next to a hazard
    Hazard,
    None,
}

/// Identity of one pheromone instance, used for weak references from tiles
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PheromoneId(u64);

impl PheromoneId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// An environmental marker left by ants
///
/// Trail strength decays by the evaporation rate each tick and is topped up
/// by every ant still registered as a contributor. Contributors are held by
/// id only; ids that no longer resolve are dropped on the next update.
#[derive(Clone, Debug)]
pub struct Pheromone {
    id: PheromoneId,
    kind: PheromoneType,
    position: Position,
    strength: f64,
    evaporation_rate: f64,
    contributors: BTreeSet<AntId>,
}

impl Pheromone {
    pub fn new(id: PheromoneId, position: Position, kind: PheromoneType) -> Self {
        Self {
            id,
            kind,
            position,
            strength: 1.0,
            evaporation_rate: 0.0,
            contributors: BTreeSet::new(),
        }
    }

    /// Advance the pheromone by one tick
    ///
    /// `dropped_strength` resolves a contributor to the strength it currently
    /// lays, or `None` if the ant no longer exists.
    pub fn update<F>(&mut self, dropped_strength: F, observer: &mut dyn PheromoneObserver)
    where
        F: Fn(AntId) -> Option<f64>,
    {
        let mut contribution = 0.0;
        self.contributors.retain(|&ant| match dropped_strength(ant) {
            Some(strength) => {
                contribution += strength;
                true
            }
            None => false,
        });

        match self.kind {
            PheromoneType::Hazard => self.strength = HAZARD_PHEROMONE_STRENGTH,
            PheromoneType::Found | PheromoneType::None => {
                let decayed = (1.0 - self.evaporation_rate) * self.strength;
                self.strength = (decayed + contribution).max(0.0);
            }
        }

        observer.update_pheromone_graphics(self.position, self.kind, self.pheromone_strength());
    }

    /// Current strength, or 0.0 once evaporated
    pub fn pheromone_strength(&self) -> f64 {
        if self.evaporated() {
            0.0
        } else {
            self.strength
        }
    }

    pub fn evaporated(&self) -> bool {
        self.strength < PHEROMONE_MIN
    }

    pub fn set_evaporation_rate(&mut self, evaporation_rate: f64) {
        self.evaporation_rate = evaporation_rate;
    }

    pub fn evaporation_rate(&self) -> f64 {
        self.evaporation_rate
    }

    pub fn pheromone_type(&self) -> PheromoneType {
        self.kind
    }

    pub fn set_pheromone_type(&mut self, kind: PheromoneType) {
        self.kind = kind;
    }

    /// Add `ant` as a contributor; repeated registration is a no-op
    pub fn register_ant(&mut self, ant: AntId) {
        self.contributors.insert(ant);
    }

    pub fn deregister_ant(&mut self, ant: AntId) {
        self.contributors.remove(&ant);
    }

    pub fn is_contributor(&self, ant: AntId) -> bool {
        self.contributors.contains(&ant)
    }

    pub fn contributor_count(&self) -> usize {
        self.contributors.len()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn id(&self) -> PheromoneId {
        self.id
    }
}
