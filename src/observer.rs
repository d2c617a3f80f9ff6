//! Presentation hooks.
//!
//! The simulation never renders anything itself. Whoever hosts it can watch
//! state changes through these traits; every method defaults to a no-op.

use crate::ant::AntId;
use crate::pheromone::PheromoneType;
use crate::position::Position;
use crate::world::TileType;
use tracing::trace;

pub trait AntObserver {
    /// The ant moved to `position`
    fn update_graphics(&mut self, _ant: AntId, _position: Position) {}

    /// The ant found a (better) route and is heading home
    fn show_found_graphics(&mut self, _ant: AntId) {}

    /// The ant is back to searching (or died)
    fn show_forage_graphics(&mut self, _ant: AntId) {}
}

pub trait PheromoneObserver {
    /// Called after every pheromone update, once per tick
    fn update_pheromone_graphics(
        &mut self,
        _position: Position,
        _kind: PheromoneType,
        _strength: f64,
    ) {
    }
}

pub trait TileObserver {
    /// A tile was created or changed type
    fn update_tile_graphics(&mut self, _position: Position, _tile_type: TileType) {}
}

/// Everything a [`World`](crate::world::World) reports to
pub trait Observer: AntObserver + PheromoneObserver + TileObserver {
    fn as_ant_observer(&mut self) -> &mut dyn AntObserver;

    fn as_pheromone_observer(&mut self) -> &mut dyn PheromoneObserver;
}

impl<T: AntObserver + PheromoneObserver + TileObserver> Observer for T {
    fn as_ant_observer(&mut self) -> &mut dyn AntObserver {
        self
    }

    fn as_pheromone_observer(&mut self) -> &mut dyn PheromoneObserver {
        self
    }
}

/// Discards every notification
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl AntObserver for NoopObserver {}
impl PheromoneObserver for NoopObserver {}
impl TileObserver for NoopObserver {}

/// Emits every notification as a `trace` event
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl AntObserver for TracingObserver {
    fn update_graphics(&mut self, ant: AntId, position: Position) {
        trace!(ant = ant.get(), %position, "ant moved");
    }

    fn show_found_graphics(&mut self, ant: AntId) {
        trace!(ant = ant.get(), "ant found target");
    }

    fn show_forage_graphics(&mut self, ant: AntId) {
        trace!(ant = ant.get(), "ant foraging");
    }
}

impl PheromoneObserver for TracingObserver {
    fn update_pheromone_graphics(&mut self, position: Position, kind: PheromoneType, strength: f64) {
        trace!(%position, ?kind, strength, "pheromone updated");
    }
}

impl TileObserver for TracingObserver {
    fn update_tile_graphics(&mut self, position: Position, tile_type: TileType) {
        trace!(%position, ?tile_type, "tile changed");
    }
}
