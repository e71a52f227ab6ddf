// mflgrrs/src/constants.rs

/// Project configuration looked up in the model workspace when `--config` is not given.
pub const DEFAULT_CONFIG_NAME: &str = "mflgr-config.yml";

pub const MODEL_WS_ENV: &str = "MFLGR_MODEL_WS";
pub const CONFIG_ENV: &str = "MFLGR_CONFIG";
