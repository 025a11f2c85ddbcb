use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::layout::{self, DEFAULT_SCREEN_WIDTH, ZoneSpec};
use crate::simulate::{SimulateArgs, run_simulate};
use crate::telemetry::init_tracing;

#[derive(Debug, Parser)]
#[command(
    name = "dropzone-harness",
    about = "Replay scripted drag-and-release gestures against drop-zone layouts",
    version
)]
pub struct Cli {
    /// Log core state transitions at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to stderr as JSON.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Drag, release, and print the settling trajectory.
    Simulate(SimulateArgs),

    /// Print a zone layout as JSON.
    Zones(ZonesArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ZonesArgs {
    /// JSON zone file to validate and echo; the built-in grid when omitted.
    #[arg(long)]
    pub zones: Option<PathBuf>,

    /// Screen width for the built-in grid.
    #[arg(long, default_value_t = DEFAULT_SCREEN_WIDTH)]
    pub width: f64,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Simulate(args) => run_simulate(args),
        Commands::Zones(args) => {
            let stdout = std::io::stdout();
            print_zones(&args, &mut stdout.lock())
        }
    }
}

fn print_zones(args: &ZonesArgs, out: &mut impl Write) -> Result<()> {
    let zones = layout::resolve(args.zones.as_deref(), args.width)?;
    let specs: Vec<ZoneSpec> = zones.iter().map(ZoneSpec::from).collect();
    writeln!(out, "{}", serde_json::to_string_pretty(&specs)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;
    use tempfile::tempdir;

    use super::{Cli, Commands, ZonesArgs, print_zones, run};
    use crate::error::HarnessError;
    use crate::simulate::{SimulateArgs, Vector2};

    fn simulate_args() -> SimulateArgs {
        SimulateArgs {
            zones: None,
            config: None,
            width: 360.0,
            from_zone: 0,
            drag: Vector2::new(-120.0, 270.0),
            velocity: Vector2::new(0.0, 500.0),
            drag_steps: 4,
            decay: false,
            frame_ms: 16,
            max_frames: 600,
            json: true,
        }
    }

    fn cli(command: Commands) -> Cli {
        Cli {
            verbose: false,
            log_json: false,
            command,
        }
    }

    #[test]
    fn parses_negative_pairs_and_globals() {
        let cli = Cli::try_parse_from([
            "dropzone-harness",
            "simulate",
            "--drag",
            "-90,240",
            "--velocity",
            "-300,900",
            "--from-zone",
            "2",
            "--verbose",
        ])
        .expect("parse");
        assert!(cli.verbose);
        let Commands::Simulate(args) = cli.command else {
            panic!("expected simulate");
        };
        assert_eq!(args.drag, Vector2::new(-90.0, 240.0));
        assert_eq!(args.velocity, Vector2::new(-300.0, 900.0));
        assert_eq!(args.from_zone, 2);
        assert_eq!(args.frame_ms, 16);
        assert!(!args.json);
    }

    #[test]
    fn rejects_malformed_pair() {
        let result = Cli::try_parse_from(["dropzone-harness", "simulate", "--drag", "12"]);
        assert!(result.is_err());
    }

    #[test]
    fn simulate_command_dispatches_successfully() {
        assert!(run(cli(Commands::Simulate(simulate_args()))).is_ok());
    }

    #[test]
    fn simulate_command_reports_unsettled_run() {
        let error = run(cli(Commands::Simulate(SimulateArgs {
            max_frames: 1,
            ..simulate_args()
        })))
        .expect_err("one frame is not enough");
        assert!(matches!(error, HarnessError::Unsettled { frames: 1 }));
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn simulate_command_rejects_invalid_config_file() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("motion.toml");
        std::fs::write(&path, "[spring]\nmass = -1.0\n").expect("write");

        let error = run(cli(Commands::Simulate(SimulateArgs {
            config: Some(path),
            ..simulate_args()
        })))
        .expect_err("negative mass");
        assert!(matches!(error, HarnessError::Config(_)));
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn simulate_command_reads_json_config() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("motion.json");
        std::fs::write(&path, r#"{ "spring": { "stiffness": 320.0, "damping": 26.0 } }"#)
            .expect("write");

        let result = run(cli(Commands::Simulate(SimulateArgs {
            config: Some(path),
            ..simulate_args()
        })));
        assert!(result.is_ok());
    }

    #[test]
    fn zones_command_missing_file_fails() {
        let error = run(cli(Commands::Zones(ZonesArgs {
            zones: Some(PathBuf::from("/tmp/dropzone-harness/does-not-exist.json")),
            width: 360.0,
        })))
        .expect_err("missing zone file");
        assert!(matches!(error, HarnessError::ZoneFile { .. }));
    }

    #[test]
    fn zones_command_prints_default_grid() {
        let mut out = Vec::new();
        print_zones(
            &ZonesArgs {
                zones: None,
                width: 360.0,
            },
            &mut out,
        )
        .expect("print");
        let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
        let ids: Vec<u64> = value
            .as_array()
            .expect("array")
            .iter()
            .map(|z| z["id"].as_u64().expect("id"))
            .collect();
        assert_eq!(ids, vec![3, 5, 1, 4]);
    }
}
