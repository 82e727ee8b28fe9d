use std::path::PathBuf;

use galaxy::GalaxyParameters;

/// Used for Save/Load when no path is given on the command line.
const DEFAULT_PARAMS_PATH: &str = "galaxy.json";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let params_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PARAMS_PATH));

    let params = if params_path.exists() {
        match GalaxyParameters::load(&params_path) {
            Ok(params) => {
                log::info!("parameters from {}", params_path.display());
                params.clamped()
            }
            Err(e) => {
                log::warn!("could not read {}: {}; using defaults", params_path.display(), e);
                GalaxyParameters::default()
            }
        }
    } else {
        log::info!("no parameter file at {}; using defaults", params_path.display());
        GalaxyParameters::default()
    };

    if let Err(e) = galaxy::run(params, params_path) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
