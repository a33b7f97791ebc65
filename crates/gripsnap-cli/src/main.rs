//! gripsnap CLI - query cylindrical grip surfaces
//!
//! Reads a TOML scene (frame, grip point, constraint, queries, hand poses)
//! and prints the results as JSON on stdout. Logs go to stderr.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use gripsnap_math::Point3;
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod report;
mod scene;

use scene::Scene;

#[derive(Parser)]
#[command(name = "gripsnap")]
#[command(
    version,
    about = "Query cylindrical grip surfaces for hand-pose snapping",
    long_about = None
)]
struct Cli {
    /// Logging verbosity level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the derived surface quantities for a scene
    Info {
        /// Path to a .toml scene file
        scene: PathBuf,
    },
    /// Project the scene's query points (and --point) onto the surface
    Nearest {
        /// Path to a .toml scene file
        scene: PathBuf,
        /// Extra world-space point, as x,y,z
        #[arg(short, long, value_parser = parse_point, allow_hyphen_values = true)]
        point: Option<Point3>,
    },
    /// Snap every pose in the scene to the surface point nearest its target
    Snap {
        /// Path to a .toml scene file
        scene: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Info { scene } => print_json(&report::info(&load(&scene)?)?)?,
        Commands::Nearest { scene, point } => {
            let scene = load(&scene)?;
            if scene.queries.is_empty() && point.is_none() {
                anyhow::bail!("scene has no [[queries]] and no --point was given");
            }
            print_json(&report::nearest(&scene, point)?)?
        }
        Commands::Snap { scene } => print_json(&report::snap(&load(&scene)?)?)?,
    }

    Ok(())
}

fn load(path: &Path) -> Result<Scene> {
    let scene = Scene::load(path)?;
    info!(
        path = %path.display(),
        queries = scene.queries.len(),
        poses = scene.poses.len(),
        "loaded scene"
    );
    Ok(scene)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_point(s: &str) -> std::result::Result<Point3, String> {
    let coords = s
        .split(',')
        .map(|c| c.trim().parse::<f64>().map_err(|e| format!("bad coordinate {c:?}: {e}")))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    match coords.as_slice() {
        [x, y, z] => Ok(Point3::new(*x, *y, *z)),
        _ => Err(format!("expected x,y,z but got {} values", coords.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("1, -2.5,3").unwrap(), Point3::new(1.0, -2.5, 3.0));
        assert!(parse_point("1,2").is_err());
        assert!(parse_point("1,a,3").is_err());
    }

    #[test]
    fn test_nearest_accepts_negative_point() {
        let args = ["gripsnap", "nearest", "scene.toml", "--point", "-1,0,2"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Nearest { point, .. } => assert_eq!(point, Some(Point3::new(-1.0, 0.0, 2.0))),
            _ => panic!("expected nearest"),
        }
    }
}
