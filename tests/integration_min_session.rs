// Minimal integration test that drives the compiled binary through a PTY.
// This exercises the real event loop and crossterm input handling across
// the main boundaries without relying on internal modules.
//
// Notes:
// - Requires a TTY; uses expectrl which allocates a pseudo terminal.
// - Marked Unix-only and ignored by default to avoid CI/platform issues.
// - Run manually via: `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn minimal_session_completes_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let words = dir.path().join("words.txt");
    std::fs::write(&words, "hi\n")?;

    let bin = assert_cmd::cargo::cargo_bin("typer");
    let cmd = format!("{} -w 1 --word-list {}", bin.display(), words.display());

    let mut p = spawn(cmd)?;

    // Give the app a moment to enter raw mode and draw the words
    std::thread::sleep(Duration::from_millis(200));

    // Type the only word and finish it with a space
    p.send("hi ")?;

    p.expect("Press Enter to continue...")?;
    p.send("\r")?;

    p.expect(Eof)?;
    Ok(())
}

#[test]
#[ignore]
fn escape_aborts_without_report() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("typer");
    let mut p = spawn(format!("{} -w 5 --seed 1", bin.display()))?;

    std::thread::sleep(Duration::from_millis(200));
    p.send("\x1b")?; // ESC

    p.expect(Eof)?;
    Ok(())
}
