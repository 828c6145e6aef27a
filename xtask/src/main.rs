//! Development automation for the Relay workspace.
//!
//! Run with: `cargo xtask <command>`
//!
//! User-facing output goes through `println!`/`eprintln!`.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::env;
use std::process::{Command, ExitCode};

use anyhow::Context;

const CRATES: &[&str] = &["relay-domain", "relay-core", "relay-infra", "relay-app"];

fn main() -> ExitCode {
    let task = env::args().nth(1);

    let result = match task.as_deref() {
        Some("ci") => run_ci(),
        Some("fmt") => run_fmt(),
        Some("clippy") => run_clippy(),
        Some("check") => run_check(),
        Some("test") => run_test(),
        Some("deny") => run_deny(),
        Some("help") | None => {
            print_help();
            Ok(())
        }
        Some(unknown) => {
            eprintln!("Unknown task: {unknown}");
            eprintln!();
            print_help();
            Err(anyhow::anyhow!("Unknown task"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Task failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!("Relay Development Tasks");
    println!();
    println!("USAGE:");
    println!("    cargo xtask <TASK>");
    println!();
    println!("TASKS:");
    println!("    ci      Run fmt, clippy, check, test and deny in sequence");
    println!("    fmt     Check Rust code formatting");
    println!("    clippy  Run Clippy with warnings denied");
    println!("    check   Check each crate on its own (catches missing features)");
    println!("    test    Run all workspace tests");
    println!("    deny    Check dependencies with cargo-deny (skipped if not installed)");
    println!("    help    Show this help message");
}

fn run_ci() -> anyhow::Result<()> {
    let steps: [(&str, fn() -> anyhow::Result<()>); 5] = [
        ("Checking format", run_fmt),
        ("Running Clippy", run_clippy),
        ("Checking crates individually", run_check),
        ("Running tests", run_test),
        ("Checking dependencies", run_deny),
    ];

    for (index, (label, step)) in steps.iter().enumerate() {
        println!("\n==> Step {}/{}: {label}...", index + 1, steps.len());
        step()?;
    }

    println!("\n✓ All CI checks passed!");
    Ok(())
}

fn run_fmt() -> anyhow::Result<()> {
    cargo(&["fmt", "--all", "--", "--check"], "Format check failed. Run 'cargo fmt --all' to fix.")
}

fn run_clippy() -> anyhow::Result<()> {
    cargo(
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        "Clippy reported issues. See output above.",
    )
}

fn run_check() -> anyhow::Result<()> {
    for krate in CRATES {
        println!("cargo check -p {krate}");
        cargo(&["check", "-p", krate], &format!("{krate} failed to compile on its own"))?;
    }
    Ok(())
}

fn run_test() -> anyhow::Result<()> {
    cargo(&["test", "--workspace"], "Tests failed")
}

fn run_deny() -> anyhow::Result<()> {
    let installed = Command::new("cargo")
        .args(["deny", "--version"])
        .output()
        .is_ok_and(|output| output.status.success());

    if !installed {
        println!("cargo-deny is not installed, skipping (cargo install cargo-deny)");
        return Ok(());
    }

    cargo(&["deny", "check"], "cargo-deny found issues")
}

/// Run `cargo` with `args`, failing with `hint` on a non-zero exit.
fn cargo(args: &[&str], hint: &str) -> anyhow::Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .status()
        .with_context(|| format!("Failed to run cargo {}", args.join(" ")))?;

    if !status.success() {
        anyhow::bail!("{hint}");
    }
    Ok(())
}
