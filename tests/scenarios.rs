use antsim::config::PHEROMONE_MIN;
use antsim::prelude::*;
use antsim::world::{centre_of, parse_layout_str};

fn world_from(layout: &str, config: SimConfig) -> World {
    let mut world = World::headless(config);
    world.load_layout(&parse_layout_str(layout).expect("valid layout"));
    world
}

fn seeded(seed: u64) -> SimConfig {
    SimConfig {
        seed: Some(seed),
        ..SimConfig::default()
    }
}

fn at(col: i64, row: i64) -> Position {
    centre_of((col, row), SimConfig::default().tile_size)
}

#[test]
fn ant_next_to_food_gathers_on_first_tick() {
    let mut world = world_from("S..\nF..\n...\n", seeded(1));
    let id = world.register_ant(at(0, 0));

    world.tick();

    let ant = world.ant(id).unwrap();
    assert_eq!(ant.state(), AntState::Gathering);
    assert_eq!(ant.shortest_path_length(), Some(1));
    assert_eq!(world.gathering_ants(), 1);
    assert_eq!(world.foraging_ants(), 0);
    assert_eq!(world.shortest_path_length(), Some(1));
    assert_eq!(world.shortest_path(), &[at(0, 1), at(0, 0)]);
}

#[test]
fn ant_next_to_hazard_dies() {
    let mut world = world_from(".SH\n", seeded(2));
    world.register_ant(at(1, 0));

    world.tick();

    assert_eq!(world.dead_ants(), 1);
    assert_eq!(world.ant_count(), 0);
    let marker = world.pheromone_at(at(1, 0)).unwrap();
    assert_eq!(marker.pheromone_type(), PheromoneType::Hazard);
    assert_eq!(marker.pheromone_strength(), 1.0);
}

#[test]
fn switches_off_means_no_pheromone() {
    let config = SimConfig {
        pheromones_enabled: false,
        smart_pheromones_enabled: false,
        ..seeded(3)
    };
    let mut world = world_from("S...F\n.#H#.\n.....\n", config);

    for _ in 0..200 {
        world.spawn_ant();
        world.tick();
        assert_eq!(world.pheromone_count(), 0);
    }

    for tile in world.tiles() {
        assert_eq!(
            world.tile_pheromone_strength(tile.centre()),
            Some(PHEROMONE_MIN)
        );
    }
}

#[test]
fn returning_ant_reinforces_its_trail() {
    let mut world = world_from("S.F\n", seeded(4));
    world.register_ant(at(0, 0));

    // Out to the middle, then the food is in sight
    world.tick();
    world.tick();
    assert_eq!(world.shortest_path_length(), Some(2));
    assert_eq!(world.shortest_path(), &[at(2, 0), at(1, 0), at(0, 0)]);

    for _ in 0..4 {
        world.tick();
    }

    let trail = world.pheromone_at(at(1, 0)).unwrap();
    assert_eq!(trail.pheromone_type(), PheromoneType::Found);
    assert!(trail.pheromone_strength() > 1.0);
    assert!(world.tile_pheromone_strength(at(1, 0)).unwrap() > 1.0);
}

#[test]
fn evaporating_trail_disappears_after_ant_dies() {
    let mut world = world_from("S.F\n", SimConfig {
        evaporation_rate: 0.5,
        ..seeded(5)
    });
    world.register_ant(at(0, 0));
    for _ in 0..4 {
        world.tick();
    }
    assert!(world.pheromone_count() > 0);

    // Nobody left to reinforce it
    world.reset_ant_register();
    for _ in 0..20 {
        world.tick();
    }

    assert_eq!(world.pheromone_count(), 0);
}

#[test]
fn same_seed_same_run() {
    let layout = "S.....\n.#.##.\n...#.F\n.H....\n";
    let run = |seed| {
        let mut world = world_from(layout, seeded(seed));
        for _ in 0..300 {
            world.spawn_ant();
            world.tick();
        }
        (
            world.ant_count(),
            world.dead_ants(),
            world.gathering_ants(),
            world.shortest_path_length(),
            world.pheromone_count(),
        )
    };

    assert_eq!(run(17), run(17));
}

#[test]
fn shortest_path_never_grows() {
    let mut world = world_from("S.....\n......\n......\n.....F\n", seeded(6));
    let mut best: Option<usize> = None;

    for _ in 0..500 {
        world.spawn_ant();
        world.tick();
        if let (Some(previous), Some(now)) = (best, world.shortest_path_length()) {
            assert!(now <= previous);
        }
        best = world.shortest_path_length().or(best);
    }
}
