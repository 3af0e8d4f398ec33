mod cli;

use phong_sphere::AppConfig;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

const DEFAULT_LOG_DIRECTIVE: &str = "phong_sphere=info";

fn main() {
    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or(DEFAULT_LOG_DIRECTIVE);
    let directive: Result<Directive, _> = log_directive
        .parse()
        .or_else(|_| DEFAULT_LOG_DIRECTIVE.parse());
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = directive {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("phong-sphere v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => AppConfig::load(path).unwrap_or_else(|e| {
            warn!("failed to load config, using defaults: {e}");
            AppConfig::default()
        }),
        None => AppConfig::default(),
    };

    let config = match config.with_segment_overrides(args.lat, args.lon) {
        Ok(config) => config,
        Err(e) => {
            error!("invalid command line: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = phong_sphere::run(config) {
        error!("fatal: {e}");
        std::process::exit(1);
    }
}
