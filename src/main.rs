use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};
use lhcube::{cli::Args, LHCUBE_LOG};

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env = Env::new().filter_or(LHCUBE_LOG, level);
    let mut builder = Builder::from_env(env);
    let builder = builder.target(env_logger::Target::Stderr);
    builder.init();

    lhcube::run(args)?;
    Ok(())
}
