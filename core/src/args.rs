use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;
use params::ArrayDeclaration;

#[derive(Parser, Debug)]
#[command(name = "tunedump")]
#[command(author = "Jørgen Hanssen <jorgen@hanssen.io>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rebuilds tuned evaluation parameters from a tuner log")]
pub struct Args {
    /// Progress log written by the tuner.
    pub log: PathBuf,

    /// Last iteration whose updates are kept.
    pub max_iteration: i64,

    /// Also print the parameters as C arrays ("true" to enable).
    #[arg(action = ArgAction::Set, value_parser = parse_to_c, default_value = "false")]
    pub to_c: bool,

    /// Array to emit, as NAME, NAME:N or NAME:D0xD1xD2. Repeat in vector order.
    /// Defaults to the engine's evaluation tables.
    #[arg(long = "array", value_name = "DECL")]
    pub arrays: Vec<ArrayDeclaration>,

    /// Render values missing from the log as 0 instead of failing.
    #[arg(long)]
    pub zero_fill: bool,

    /// Write the output here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log to a file instead of stderr.
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

impl Args {
    pub fn declarations(&self) -> Vec<ArrayDeclaration> {
        if self.arrays.is_empty() {
            ArrayDeclaration::defaults()
        } else {
            self.arrays.clone()
        }
    }
}

fn parse_to_c(value: &str) -> Result<bool, String> {
    Ok(value.eq_ignore_ascii_case("true"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_defaults() {
        let args = Args::parse_from(["tunedump", "tune.log", "40"]);
        assert_eq!(args.max_iteration, 40);
        assert!(!args.to_c);
        assert_eq!(args.declarations(), ArrayDeclaration::defaults());
    }

    #[test]
    fn test_to_c_is_case_insensitive() {
        assert!(Args::parse_from(["tunedump", "tune.log", "3", "True"]).to_c);
        assert!(!Args::parse_from(["tunedump", "tune.log", "3", "yes"]).to_c);
    }

    #[test]
    fn test_custom_arrays() {
        let args = Args::parse_from([
            "tunedump",
            "tune.log",
            "3",
            "true",
            "--array",
            "Tempo",
            "--array",
            "Mobility:4x28",
        ]);
        assert_eq!(
            args.declarations(),
            vec![
                ArrayDeclaration::scalar("Tempo"),
                ArrayDeclaration::new("Mobility", &[4, 28]),
            ]
        );
    }

    #[test]
    fn test_rejects_bad_array() {
        assert!(Args::try_parse_from(["tunedump", "tune.log", "3", "--array", "Row:0"]).is_err());
    }
}
