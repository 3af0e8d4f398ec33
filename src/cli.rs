use clap::Parser;
use std::path::PathBuf;

/// Phong-lit sphere viewer.
#[derive(Parser, Debug)]
#[command(name = "phong-sphere", version, about)]
pub struct Args {
    /// TOML config file. Defaults are used when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter directive (e.g. `debug`, `phong_sphere=trace`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Latitude segment override.
    #[arg(long)]
    pub lat: Option<u32>,

    /// Longitude segment override.
    #[arg(long)]
    pub lon: Option<u32>,
}

pub fn parse() -> Args {
    Args::parse()
}
