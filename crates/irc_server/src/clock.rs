//! Thin wall-clock wrapper so handlers never call `SystemTime`/`chrono`
//! directly — creation timestamps are decimal seconds since epoch (§6);
//! topic modification timestamps are `HH:MM:SS` local time (§6).

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Local;

pub fn now_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub fn now_hms() -> String {
    Local::now().format("%H:%M:%S").to_string()
}
