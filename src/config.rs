use crate::error::Result;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const POSTS_KEY: &str = "linkedinPosts";
pub const FAVORITE_EMOJIS_KEY: &str = "favoriteEmojis";
pub const RECENT_EMOJIS_KEY: &str = "recentEmojis";
pub const LOG_FILENAME: &str = "postline.log";
pub const DATA_DIR_NAME: &str = ".postline";

/// Get the default postline data directory
pub fn get_data_dir() -> PathBuf {
    env::var("HOME")
        .map(|home| PathBuf::from(home).join(DATA_DIR_NAME))
        .unwrap_or_else(|_| PathBuf::from(DATA_DIR_NAME))
}

/// Resolve the data directory, preferring an explicit override
pub fn resolve_data_dir(override_dir: Option<PathBuf>) -> PathBuf {
    override_dir.unwrap_or_else(get_data_dir)
}

/// Ensure the data directory exists
pub fn ensure_data_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Get the path to the log file used by the interactive editor
pub fn get_log_file_path(dir: &Path) -> PathBuf {
    dir.join(LOG_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_home() {
        let dir = resolve_data_dir(Some(PathBuf::from("/tmp/somewhere")));
        assert_eq!(dir, PathBuf::from("/tmp/somewhere"));
    }

    #[test]
    fn default_dir_ends_with_dot_postline() {
        assert!(get_data_dir().ends_with(DATA_DIR_NAME));
    }
}
