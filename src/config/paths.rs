use std::path::{Path, PathBuf};

pub const GLOBAL_STATE_DIR: &str = ".expertchat";
pub const GLOBAL_SETTINGS_FILE_NAME: &str = "config.yaml";

pub fn state_root_for_home(home: &Path) -> PathBuf {
    home.join(GLOBAL_STATE_DIR)
}
