use crate::parse::{parse_jitter, parse_override, parse_scale};
use clap::{Parser, ValueEnum};
use lhcube_doe::{JitterSelector, PermutationDraw, ScaleOverride};
use std::path::PathBuf;

/// Permutation strategy selectable from the command line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DrawArg {
    /// Fisher-Yates shuffle of the strata
    #[default]
    Shuffle,
    /// Redraw a stratum until a free one is found
    Rejection,
}

impl From<DrawArg> for PermutationDraw {
    fn from(draw: DrawArg) -> Self {
        match draw {
            DrawArg::Shuffle => PermutationDraw::Shuffle,
            DrawArg::Rejection => PermutationDraw::Rejection,
        }
    }
}

/// Generates a Latin Hypercube sample and writes it as comma separated values
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Number of points, also the number of strata of each dimension
    #[arg(short = 'n', long)]
    pub points: usize,
    /// Number of dimensions
    #[arg(short, long)]
    pub dims: usize,
    /// Bounds LO:HI of every dimension [default: 0:<points>]
    #[arg(short, long, value_parser = parse_scale, allow_hyphen_values = true)]
    pub scale: Option<(f64, f64)>,
    /// Bounds I:LO:HI of the I-th dimension, replacing the scale (repeatable)
    #[arg(long = "override", value_parser = parse_override, allow_hyphen_values = true)]
    pub overrides: Vec<ScaleOverride>,
    /// Jittered dimensions: false, true or a comma separated list of indices
    #[arg(short, long, value_parser = parse_jitter, default_value = "false")]
    pub jitter: JitterSelector,
    /// Comma separated column headings [default: dim0,dim1,...]
    #[arg(long, value_delimiter = ',')]
    pub headings: Option<Vec<String>>,
    /// Seed of the random generator, seeded from system entropy otherwise
    #[arg(long)]
    pub seed: Option<u64>,
    /// Permutation strategy
    #[arg(long, value_enum, default_value_t = DrawArg::Shuffle)]
    pub draw: DrawArg,
    /// Generates dimensions concurrently
    #[arg(long)]
    pub parallel: bool,
    /// Prints statistics of each dimension once the design is written
    #[arg(long)]
    pub stats: bool,
    /// Increases logging verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Output CSV file
    #[arg(short, long)]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "lhcube",
            "-n",
            "5",
            "--dims",
            "2",
            "--scale",
            "-1:1",
            "--override",
            "1:10:20",
            "--jitter",
            "0",
            "--headings",
            "x,y",
            "--seed",
            "42",
            "--draw",
            "rejection",
            "-vv",
            "-o",
            "out.csv",
        ])
        .unwrap();
        assert_eq!(args.points, 5);
        assert_eq!(args.dims, 2);
        assert_eq!(args.scale, Some((-1., 1.)));
        assert_eq!(
            args.overrides,
            vec![ScaleOverride {
                dim: 1,
                lower: 10.,
                upper: 20.
            }]
        );
        assert_eq!(args.jitter, JitterSelector::Dims(vec![0]));
        assert_eq!(
            args.headings,
            Some(vec!["x".to_string(), "y".to_string()])
        );
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.draw, DrawArg::Rejection);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.output, PathBuf::from("out.csv"));
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["lhcube", "-n", "5", "-d", "1", "-o", "out.csv"]).unwrap();
        assert_eq!(args.jitter, JitterSelector::None);
        assert_eq!(args.scale, None);
        assert!(args.overrides.is_empty());
        assert_eq!(args.draw, DrawArg::Shuffle);
        assert!(!args.parallel && !args.stats);
    }

    #[test]
    fn test_invalid_args() {
        assert!(Args::try_parse_from(["lhcube", "-n", "5", "-d", "1"]).is_err());
        assert!(Args::try_parse_from(["lhcube", "-n", "x", "-d", "1", "-o", "a"]).is_err());
        assert!(
            Args::try_parse_from(["lhcube", "-n", "5", "-d", "1", "-s", "2:1", "-o", "a"])
                .is_err()
        );
    }
}
