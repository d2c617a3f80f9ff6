// Integration tests for the binary using assert_cmd.
// These tests shell out the compiled binary and validate observable behavior.

use assert_cmd::prelude::*;
use predicates::str::contains;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

const BIN: &str = "antsim";

#[test]
fn prints_summary() -> Result<(), Box<dyn std::error::Error>> {
    let mut f = NamedTempFile::new()?;
    writeln!(f, "; small room\n#####\n#S..#\n#..F#\n#####")?;

    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args([
        "--ants", "10",
        "--ticks", "50",
        "--map", f.path().to_str().unwrap(),
        "--seed", "42",
        "--suppress-events",
    ]);

    cmd.assert()
        .success()
        .stdout(contains("==="))
        .stdout(contains("Simulation Latency"))
        .stdout(contains("dead=0"))
        .stdout(contains("shortest="));

    Ok(())
}

#[test]
fn food_next_to_spawn_settles_immediately() -> Result<(), Box<dyn std::error::Error>> {
    let mut f = NamedTempFile::new()?;
    writeln!(f, "SF")?;

    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args([
        "-n", "1",
        "-m", f.path().to_str().unwrap(),
        "--seed", "123",
        "--stop-when-settled",
    ]);

    cmd.assert()
        .success()
        .stdout(contains("shortest path is now 1 moves"))
        .stdout(contains("shortest=1"))
        .stdout(contains("(1 ticks)"))
        .stdout(contains("settled"));

    Ok(())
}

#[test]
fn print_layout_reproduces_the_map() -> Result<(), Box<dyn std::error::Error>> {
    let mut f = NamedTempFile::new()?;
    writeln!(f, "#####\n#S.F#\n# H #\n#####")?;

    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args([
        "-n", "0",
        "-t", "1",
        "-m", f.path().to_str().unwrap(),
        "--print-layout",
    ]);

    cmd.assert()
        .success()
        .stdout(contains("#####\n#S.F#\n# H #\n#####\n"));

    Ok(())
}

#[test]
fn config_file_is_honoured() -> Result<(), Box<dyn std::error::Error>> {
    let mut map = NamedTempFile::new()?;
    writeln!(map, "S...")?;
    let mut config = NamedTempFile::new()?;
    writeln!(config, "evaporation_rate: 2.0")?;

    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args([
        "-m", map.path().to_str().unwrap(),
        "--config", config.path().to_str().unwrap(),
    ]);

    cmd.assert()
        .failure()
        .stderr(contains("InvalidEvaporationRate"));

    Ok(())
}

#[test]
fn unknown_tile_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let mut f = NamedTempFile::new()?;
    writeln!(f, "S.x")?;

    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args(["-m", f.path().to_str().unwrap()]);

    cmd.assert()
        .failure()
        .stderr(contains("UnknownTile"));

    Ok(())
}
