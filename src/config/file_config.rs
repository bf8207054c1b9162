//! Configuration file discovery.
//!
//! # Configuration File Format
//!
//! ```toml
//! [unsplash]
//! access_key = "your-access-key"
//! api_base = "https://api.unsplash.com"
//! timeout_secs = 15
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! rest_port = 9999
//! service_name = "unsplash-mcp-server"
//! ```
//!
//! Every key is optional. Environment variables override the file, see
//! [`load_config`](super::load_config).

use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "unsplash-mcp.toml";

/// Directory created under the platform config dir
pub const CONFIG_DIR_NAME: &str = "unsplash-mcp";

/// File name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Candidate config file locations, most specific first
pub fn config_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
    }
    candidates
}

/// First existing config file among [`config_file_candidates`]
pub fn find_config_file() -> Option<PathBuf> {
    find_in(&config_file_candidates())
}

fn find_in(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|p| is_file(p)).cloned()
}

fn is_file(path: &Path) -> bool {
    path.metadata().map(|m| m.is_file()).unwrap_or(false)
}
