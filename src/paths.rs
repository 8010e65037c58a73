//! Where thermoscope keeps its files.
//!
//! Running from a checkout (`cargo run` or any debug build) keeps everything in
//! the working directory. Installed builds use the platform locations:
//! - Linux: config in `~/.config/thermoscope/`, data in `~/.local/share/thermoscope/`
//! - macOS: `~/Library/Application Support/thermoscope/`
//! - Windows: `%APPDATA%\Thermoscope\`

use std::path::PathBuf;

const APP_DIR: &str = if cfg!(target_os = "windows") {
    "Thermoscope"
} else {
    "thermoscope"
};

/// Running from a checkout rather than an installed build.
pub fn is_dev_mode() -> bool {
    cfg!(debug_assertions) || std::env::var_os("CARGO").is_some()
}

/// Root for sidecars and logs. `None` only if the platform has no data directory.
pub fn data_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        Some(PathBuf::from("."))
    } else {
        dirs::data_dir().map(|base| base.join(APP_DIR))
    }
}

/// Directory holding `config.json`. Only Linux separates config from data.
pub fn config_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }
    if cfg!(target_os = "linux") {
        dirs::config_dir().map(|base| base.join(APP_DIR))
    } else {
        data_dir()
    }
}

/// `name` under the data directory, or relative to the working directory as a last resort.
fn data_subdir(name: &str) -> PathBuf {
    data_dir()
        .map(|root| root.join(name))
        .unwrap_or_else(|| PathBuf::from(name))
}

pub fn config_file() -> PathBuf {
    config_dir()
        .map(|dir| dir.join("config.json"))
        .unwrap_or_else(|| PathBuf::from("config.json"))
}

/// Sidecars for URL-sourced images. Local images keep theirs next to the file.
pub fn annotations_dir() -> PathBuf {
    data_subdir("annotations")
}

pub fn logs_dir() -> PathBuf {
    data_subdir("logs")
}

/// Create the installed-mode directories. A checkout uses the working directory as is.
pub fn ensure_directories() -> std::io::Result<()> {
    if is_dev_mode() {
        return Ok(());
    }
    if let Some(dir) = config_dir() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::create_dir_all(logs_dir())?;
    std::fs::create_dir_all(annotations_dir())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_is_json() {
        assert_eq!(
            config_file().file_name().and_then(|n| n.to_str()),
            Some("config.json")
        );
    }

    #[test]
    fn test_checkout_paths_are_local() {
        // Test builds have debug assertions on
        assert!(is_dev_mode());
        assert_eq!(config_dir(), Some(PathBuf::from(".")));
        assert_eq!(annotations_dir(), PathBuf::from("./annotations"));
        assert_eq!(logs_dir(), PathBuf::from("./logs"));
    }
}
