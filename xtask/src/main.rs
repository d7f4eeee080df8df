use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the random lottery workspace",
    long_about = "A unified CLI for launching the lottery window, running a headless draw,\n\
                  and running the test and CI checks of the workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the lottery window
    Ui,
    /// Run one headless draw (arguments after `--` go to random_lottery)
    Draw {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Run the workspace tests
    Test {
        /// Build lottery_core without the HTTPS transport
        #[arg(long)]
        offline: bool,
    },
    /// Run CI checks (fmt, clippy, tests)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Tests with and without the https feature
    Features,
    /// Run check + features
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    match Command::new("cargo").args(args).status() {
        Ok(status) => status,
        Err(err) => {
            eprintln!("failed to execute cargo: {err}");
            exit(1);
        }
    }
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test workspace");
    run_cargo(&["test", "--workspace"]);
}

fn ci_features() {
    step("Test lottery_core without https");
    run_cargo(&[
        "test",
        "-p",
        "lottery_core",
        "--no-default-features",
        "--features",
        "test-helpers",
    ]);

    step("Build binaries without https");
    run_cargo(&[
        "build",
        "-p",
        "lottery_cli",
        "-p",
        "lottery_ui",
        "--no-default-features",
    ]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ui => {
            run_cargo(&["run", "-p", "lottery_ui", "--release"]);
        }
        Commands::Draw { args } => {
            let mut cargo_args = vec!["run", "-p", "lottery_cli", "--"];
            cargo_args.extend(args.iter().map(String::as_str));
            run_cargo(&cargo_args);
        }
        Commands::Test { offline } => {
            if offline {
                run_cargo(&[
                    "test",
                    "-p",
                    "lottery_core",
                    "--no-default-features",
                    "--features",
                    "test-helpers",
                ]);
            } else {
                run_cargo(&["test", "--workspace"]);
            }
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Features => ci_features(),
                CiJob::All => {
                    ci_check();
                    ci_features();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}
