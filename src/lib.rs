/*!
`lhcube` generates a Latin Hypercube sample from command line arguments and writes it as
a CSV file: a heading row followed by one row per point, each value printed with the number
of decimals required by its dimension (see [lhcube_doe::precision()]).

```text
lhcube --points 5 --dims 2 --scale 0:1 --override 1:10:20 --jitter true -o doe.csv
```

Arguments are fully validated before anything is generated, the output file only appears
once the whole design is written.
*/
#![warn(missing_docs)]
pub mod cli;
mod errors;
pub mod output;
pub mod parse;

pub use errors::*;

use cli::Args;
use lhcube_doe::{generate, summary, DimensionStats, LhsConfig, LhsDesign};
use log::{info, warn};
use std::io::Write;
use std::path::PathBuf;

/// Environment variable used to set the log filter
pub const LHCUBE_LOG: &str = "LHCUBE_LOG";

/// Designs with more cells (points x dimensions) than this trigger a warning
pub const LARGE_DESIGN_CELLS: usize = 10_000_000;

/// A validated run: generation configuration and output location
#[derive(Clone, Debug)]
pub struct Run {
    /// Generation configuration
    pub config: LhsConfig,
    /// Output CSV file
    pub output: PathBuf,
    /// Whether statistics are printed
    pub stats: bool,
}

impl Run {
    /// Builds the generation configuration from command line arguments and checks it,
    /// together with the output location. Nothing is created on the file system.
    pub fn from_args(args: Args) -> Result<Self> {
        let mut config = LhsConfig::default()
            .n_points(args.points)
            .n_dims(args.dims)
            .jitter(args.jitter)
            .draw(args.draw.into())
            .parallel(args.parallel);
        // an unscaled design maps strata to unit intervals
        let (lower, upper) = args.scale.unwrap_or((0., args.points as f64));
        config = config.base_scale(lower, upper);
        for o in args.overrides {
            config = config.scale_override(o.dim, o.lower, o.upper);
        }
        if let Some(headings) = args.headings {
            config = config.headings(&headings);
        }
        if let Some(seed) = args.seed {
            config = config.seed(seed);
        }
        config.check()?;
        output::check_output(&args.output)?;
        Ok(Run {
            config,
            output: args.output,
            stats: args.stats,
        })
    }

    /// Generates the design and writes it to the output file
    pub fn execute(&self) -> Result<LhsDesign<f64>> {
        let cells = self
            .config
            .get_n_points()
            .checked_mul(self.config.get_n_dims())
            .unwrap_or(usize::MAX);
        if cells > LARGE_DESIGN_CELLS {
            warn!(
                "Large design of {} points in {} dimensions, generation may take a while",
                self.config.get_n_points(),
                self.config.get_n_dims()
            );
        }
        let design = generate(&self.config)?;
        let headings = self.config.get_headings();
        output::write_design(&self.output, &design, &headings)?;
        info!(
            "Wrote {} points in {} dimensions to {}",
            design.n_points(),
            design.n_dims(),
            self.output.display()
        );
        Ok(design)
    }
}

/// Writes per dimension statistics of `design`, one block per dimension
pub fn write_stats<W: Write>(
    mut out: W,
    design: &LhsDesign<f64>,
    headings: &[String],
) -> Result<()> {
    let stats: Vec<DimensionStats<f64>> = summary(design.samples())?;
    for (s, heading) in stats.iter().zip(headings) {
        writeln!(out, "Analysis of {heading}")?;
        writeln!(out, "  Mean: {}", s.mean)?;
        match (s.variance, s.std_dev) {
            (Some(variance), Some(std_dev)) => {
                writeln!(out, "  Variance: {variance}")?;
                writeln!(out, "  Standard Deviation: {std_dev}")?;
            }
            _ => writeln!(out, "  Variance: undefined with a single point")?,
        }
        writeln!(out, "  Min: {}", s.min)?;
        writeln!(out, "  Max: {}", s.max)?;
    }
    Ok(())
}

/// Validates arguments, generates and writes the design, prints statistics if requested
pub fn run(args: Args) -> Result<()> {
    let run = Run::from_args(args)?;
    let design = run.execute()?;
    if run.stats {
        write_stats(std::io::stdout().lock(), &design, &run.config.get_headings())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use clap::Parser;
    use lhcube_doe::DoeError;
    use std::fs;
    use std::path::Path;

    fn args(extra: &[&str], output: &Path) -> Args {
        let mut argv = vec!["lhcube"];
        argv.extend_from_slice(extra);
        argv.push("-o");
        argv.push(output.to_str().unwrap());
        Args::try_parse_from(argv).unwrap()
    }

    fn read_rows(path: &Path) -> (Vec<String>, Vec<Vec<f64>>) {
        let mut reader = csv::Reader::from_path(path).unwrap();
        let headings = reader
            .headers()
            .unwrap()
            .iter()
            .map(|h| h.to_string())
            .collect();
        let rows = reader
            .records()
            .map(|r| r.unwrap().iter().map(|v| v.parse().unwrap()).collect())
            .collect();
        (headings, rows)
    }

    #[test]
    fn test_run_writes_design() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doe.csv");
        let args = args(
            &["-n", "5", "-d", "2", "-s", "0:1", "--override", "1:10:20", "--seed", "7"],
            &path,
        );
        run(args).unwrap();

        let (headings, rows) = read_rows(&path);
        assert_eq!(headings, vec!["dim0", "dim1"]);
        assert_eq!(rows.len(), 5);
        let mut dim0: Vec<f64> = rows.iter().map(|r| r[0]).collect();
        dim0.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(dim0, vec![0., 0.2, 0.4, 0.6, 0.8]);
        assert!(rows.iter().all(|r| (10. ..20.).contains(&r[1])));
    }

    #[test]
    fn test_written_values_match_design() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doe.csv");
        let run = Run::from_args(args(
            &["-n", "30", "-d", "3", "-j", "true", "-s", "-5:5", "--headings", "a,b b,c_c"],
            &path,
        ))
        .unwrap();
        let design = run.execute().unwrap();

        let (headings, rows) = read_rows(&path);
        assert_eq!(headings, vec!["a", "b b", "c_c"]);
        assert_eq!(rows.len(), 30);
        let precisions = design.precisions();
        for (i, row) in rows.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                let tol = 0.5 * 10f64.powi(-(precisions[j] as i32)) + 1e-12;
                assert_abs_diff_eq!(*v, design.samples()[[i, j]], epsilon = tol);
            }
        }
    }

    #[test]
    fn test_default_scale_is_unit_strata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doe.csv");
        let run = Run::from_args(args(&["-n", "4", "-d", "1"], &path)).unwrap();
        let design = run.execute().unwrap();
        let mut values = design.samples().column(0).to_vec();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(values, vec![0., 1., 2., 3.]);
        assert_eq!(design.precisions()[0], 2);
    }

    #[test]
    fn test_invalid_config_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doe.csv");
        for extra in [
            vec!["-n", "0", "-d", "1"],
            vec!["-n", "3", "-d", "0"],
            vec!["-n", "3", "-d", "2", "-j", "0,2"],
            vec!["-n", "3", "-d", "2", "-j", "1,1"],
            vec!["-n", "3", "-d", "2", "--override", "2:0:1"],
            vec!["-n", "3", "-d", "2", "--headings", "a"],
            vec!["-n", "3", "-d", "1", "--headings", "$$"],
        ] {
            assert!(Run::from_args(args(&extra, &path)).is_err(), "{extra:?}");
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);

        let missing = dir.path().join("missing").join("doe.csv");
        assert!(matches!(
            Run::from_args(args(&["-n", "3", "-d", "1"], &missing)),
            Err(LhcubeError::InvalidOutput { .. })
        ));
    }

    #[test]
    fn test_generation_failure_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doe.csv");
        // valid bounds whose stratum width overflows
        let run = Run::from_args(args(
            &["-n", "3", "-d", "1", "-s", "-1.7e308:1.7e308"],
            &path,
        ))
        .unwrap();
        assert!(matches!(
            run.execute(),
            Err(LhcubeError::DoeError(DoeError::GenerationError(_)))
        ));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_write_stats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doe.csv");
        let run = Run::from_args(args(&["-n", "5", "-d", "1", "-s", "0:1"], &path)).unwrap();
        let design = run.execute().unwrap();
        let mut out = Vec::new();
        write_stats(&mut out, &design, &run.config.get_headings()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Analysis of dim0\n"));
        let mean: f64 = text
            .lines()
            .find_map(|l| l.trim().strip_prefix("Mean: "))
            .unwrap()
            .parse()
            .unwrap();
        assert_abs_diff_eq!(mean, 0.4, epsilon = 1e-12);
        assert!(text.contains("Min: 0\n"));

        let path = dir.path().join("single.csv");
        let run = Run::from_args(args(&["-n", "1", "-d", "1"], &path)).unwrap();
        let design = run.execute().unwrap();
        let mut out = Vec::new();
        write_stats(&mut out, &design, &run.config.get_headings()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Variance: undefined"));
    }
}
