//! CLI integration tests for the walls and check commands

mod common;

use std::fs;
use std::process::{Command, Output};

use common::{bitsyroom_binary, block_pixels, write_room};
use tempfile::TempDir;

fn run_in(dir: &std::path::Path, args: &[&str]) -> Output {
    Command::new(bitsyroom_binary())
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to execute bitsyroom")
}

/// A bitmap with the first `n` pixels on, row-major.
fn bitmap(n: usize) -> String {
    (0..8)
        .map(|row| (0..8).map(|col| if row * 8 + col < n { '1' } else { '0' }).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Test that walls are rewritten and inserted in place
#[test]
fn test_walls_in_place() {
    let temp = TempDir::new().expect("should create temp dir");
    let path = temp.path().join("game.bitsydata");
    let text = format!(
        "TIL 1\n{}\nNAME dense\nWAL false\n\nTIL 2\n{}\nNAME sparse\n\n",
        bitmap(21),
        bitmap(20)
    );
    fs::write(&path, &text).expect("should write game data");

    let output = run_in(temp.path(), &["walls", "game.bitsydata"]);
    assert!(output.status.success(), "walls failed: {}", String::from_utf8_lossy(&output.stderr));

    let patched = fs::read_to_string(&path).expect("should read game data");
    assert_eq!(
        patched,
        format!(
            "TIL 1\n{}\nNAME dense\nWAL true\n\nTIL 2\n{}\nNAME sparse\nWAL false\n\n",
            bitmap(21),
            bitmap(20)
        )
    );
}

/// Test that --dry-run prints the result and leaves the file alone
#[test]
fn test_walls_dry_run() {
    let temp = TempDir::new().expect("should create temp dir");
    let path = temp.path().join("game.bitsydata");
    let text = format!("TIL 1\n{}\nNAME dense\nWAL false\n\n", bitmap(64));
    fs::write(&path, &text).expect("should write game data");

    let output = run_in(temp.path(), &["walls", "game.bitsydata", "--dry-run"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("WAL true"));
    assert_eq!(fs::read_to_string(&path).expect("should read game data"), text);
}

/// Test that a malformed tile block fails without touching the file
#[test]
fn test_walls_malformed() {
    let temp = TempDir::new().expect("should create temp dir");
    let path = temp.path().join("game.bitsydata");
    let text = "TIL 1\n00000000\n";
    fs::write(&path, text).expect("should write game data");

    let output = run_in(temp.path(), &["walls", "game.bitsydata"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("line 1"));
    assert_eq!(fs::read_to_string(&path).expect("should read game data"), text);
}

/// Test that the default data path comes from the config file
#[test]
fn test_walls_default_path_from_config() {
    let temp = TempDir::new().expect("should create temp dir");
    fs::write(temp.path().join("bitsy.toml"), "[game]\ndata = \"data.txt\"\n").expect("should write config");
    fs::write(temp.path().join("data.txt"), format!("TIL 1\n{}\nNAME x\n\n", bitmap(30)))
        .expect("should write game data");

    let output = run_in(temp.path(), &["walls"]);
    assert!(output.status.success(), "walls failed: {}", String::from_utf8_lossy(&output.stderr));
    let patched = fs::read_to_string(temp.path().join("data.txt")).expect("should read game data");
    assert!(patched.contains("NAME x\nWAL true\n"));
}

/// Test that converted output passes the check command
#[test]
fn test_check_converted_output() {
    let temp = TempDir::new().expect("should create temp dir");
    let rooms = temp.path().join("rooms");
    fs::create_dir(&rooms).expect("should create rooms dir");
    write_room(&rooms.join("a.png"), &block_pixels(3, 4, 30));
    write_room(&rooms.join("b.png"), &[(0, 0), (127, 0)]);

    let output = run_in(temp.path(), &["rooms", "rooms", "-o", "game.bitsydata"]);
    assert!(output.status.success(), "rooms failed: {}", String::from_utf8_lossy(&output.stderr));

    let output = run_in(temp.path(), &["check", "game.bitsydata"]);
    assert!(output.status.success(), "check failed: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("2 room(s), 4 tile(s)"));
}

/// Test that check reports references to undefined tiles
#[test]
fn test_check_unresolved_reference() {
    let temp = TempDir::new().expect("should create temp dir");
    let mut grid = vec![["0"; 16].join(","); 16];
    grid[0] = format!("5,{}", ["0"; 15].join(","));
    let text = format!("ROOM 0\n{}\nNAME r\nPAL 0\n", grid.join("\n"));
    fs::write(temp.path().join("game.bitsydata"), text).expect("should write game data");

    let output = run_in(temp.path(), &["check", "game.bitsydata"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("undefined tile 5"));
}
