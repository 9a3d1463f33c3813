//! Path utilities for oddsedge.
//!
//! User settings live under `~/.oddsedge/`:
//! - `~/.oddsedge/config.toml` - engine configuration

use std::path::PathBuf;

/// Returns the oddsedge home directory (`~/.oddsedge/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".oddsedge")
}

/// Returns the default config file path (`~/.oddsedge/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_lives_under_oddsedge_home() {
        let config = default_config();
        assert!(config.starts_with(home_dir()));
        assert!(config.to_string_lossy().contains(".oddsedge"));
        assert_eq!(config.file_name().unwrap(), "config.toml");
    }
}
