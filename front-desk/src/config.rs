//! Engine configuration
//!
//! All settings can be overridden through environment variables (a `.env`
//! file is honoured via `dotenv`):
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `FRONT_DESK_DB_PATH` | `./work_dir/front_desk.redb` | Database file |
//! | `FRONT_DESK_LOG_LEVEL` | `info` | Log level |
//! | `FRONT_DESK_LOG_DIR` | unset | Directory for rolling file logs |
//! | `FRONT_DESK_MIN_DEPOSIT` | `0` | Minimum deposit to confirm a booking |
//! | `FRONT_DESK_CHECK_IN_TIME` | `14:00` | Default check-in time |
//! | `FRONT_DESK_CHECK_OUT_TIME` | `12:00` | Default check-out time |

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Path of the redb database file
    pub db_path: String,
    /// Log level: trace | debug | info | warn | error
    pub log_level: String,
    /// Directory for rolling file logs (console-only when unset)
    pub log_dir: Option<String>,
    /// Minimum deposit required to confirm a booking
    pub min_deposit: f64,
    /// Default check-in time (HH:MM)
    pub check_in_time: String,
    /// Default check-out time (HH:MM)
    pub check_out_time: String,
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            db_path: std::env::var("FRONT_DESK_DB_PATH")
                .unwrap_or_else(|_| "./work_dir/front_desk.redb".into()),
            log_level: std::env::var("FRONT_DESK_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("FRONT_DESK_LOG_DIR").ok(),
            min_deposit: std::env::var("FRONT_DESK_MIN_DEPOSIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.0),
            check_in_time: std::env::var("FRONT_DESK_CHECK_IN_TIME")
                .unwrap_or_else(|_| "14:00".into()),
            check_out_time: std::env::var("FRONT_DESK_CHECK_OUT_TIME")
                .unwrap_or_else(|_| "12:00".into()),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            db_path: "./work_dir/front_desk.redb".into(),
            log_level: "info".into(),
            log_dir: None,
            min_deposit: 0.0,
            check_in_time: "14:00".into(),
            check_out_time: "12:00".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = EngineConfig::default();
        assert_eq!(config.min_deposit, 0.0);
        assert_eq!(config.check_in_time, "14:00");
        assert!(config.log_dir.is_none());
    }
}
