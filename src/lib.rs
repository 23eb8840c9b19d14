//! WeatherEyes: turns noisy per-item weather guesses into a consensus state
//! and decides when to notify someone about a change.

pub mod input;

use std::env;
use std::path::{Path, PathBuf};

pub use weathereyes_application as application;
pub use weathereyes_domain as domain;

/// Config location: explicit path, then `WEATHEREYES_CONFIG_PATH`, then
/// `$HOME/.weathereyes/config.yaml`, then the working directory.
pub fn config_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }

    if let Ok(path) = env::var("WEATHEREYES_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    if let Ok(home) = env::var("HOME") {
        return Path::new(&home).join(".weathereyes").join("config.yaml");
    }

    PathBuf::from("weathereyes-config.yaml")
}
