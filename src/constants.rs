use std::time::Duration;

pub const DEFAULT_CONFIG_DIR: &str = "tuner";
pub const DEFAULT_CONFIG_FILE: &str = "tuner.toml";
pub const DEFAULT_DATA_DIR: &str = "tuner";
pub const DEFAULT_STORE_FILE: &str = "channels.json";
pub const DEFAULT_LOG_FILE: &str = "tuner.log";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// ids of built-in channels stay below this
pub const FIRST_CHANNEL_ID: u32 = 10000;
pub const DEFAULT_CATEGORY: &str = "用户频道";
pub const UNKNOWN_TITLE: &str = "Unknown Channel";

pub const EXTGRP_PREFIX: &str = "#EXTGRP:";
pub const EXTINF_PREFIX: &str = "#EXTINF:";

// how much of a downloaded playlist gets written to the log
pub const PREVIEW_CHARS: usize = 500;
