use crate::errors::{AppError, AppResult};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// IANA zone name used for all wall-clock day comparisons.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Nominal workday length in hours.
    #[serde(default = "default_workday_hours")]
    pub workday_hours: i64,
    /// Segments closed below this duration are discarded as noise.
    #[serde(default = "default_min_segment_secs")]
    pub min_segment_secs: i64,
    /// Work-hour credit for one vacation weekday.
    #[serde(default = "default_hours_per_vacation_day")]
    pub hours_per_vacation_day: i64,
    /// User id assumed when the CLI is called without --user.
    #[serde(default = "default_user")]
    pub default_user: i64,
}

fn default_timezone() -> String {
    "Europe/Berlin".to_string()
}
fn default_workday_hours() -> i64 {
    8
}
fn default_min_segment_secs() -> i64 {
    30
}
fn default_hours_per_vacation_day() -> i64 {
    8
}
fn default_user() -> i64 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            timezone: default_timezone(),
            workday_hours: default_workday_hours(),
            min_segment_secs: default_min_segment_secs(),
            hours_per_vacation_day: default_hours_per_vacation_day(),
            default_user: default_user(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("stechuhr")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".stechuhr")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("stechuhr.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("stechuhr.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB path: user provided or default
        let db_path = if let Some(name) = custom_db {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file (skipped in test mode so test runs never
        // touch the real per-user configuration)
        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(config)
    }

    pub fn tz(&self) -> AppResult<Tz> {
        self.timezone
            .parse()
            .map_err(|_| AppError::InvalidTimezone(self.timezone.clone()))
    }

    pub fn workday_ms(&self) -> i64 {
        self.workday_hours * 3_600_000
    }

    pub fn min_segment_ms(&self) -> i64 {
        self.min_segment_secs * 1000
    }

    /// Validate the loaded configuration; returns one message per problem.
    pub fn check(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.database.trim().is_empty() {
            problems.push("database path is empty".to_string());
        }
        if self.tz().is_err() {
            problems.push(format!("unknown time zone '{}'", self.timezone));
        }
        if self.workday_hours <= 0 || self.workday_hours > 24 {
            problems.push(format!(
                "workday_hours must be between 1 and 24 (found {})",
                self.workday_hours
            ));
        }
        if self.min_segment_secs < 0 {
            problems.push(format!(
                "min_segment_secs must not be negative (found {})",
                self.min_segment_secs
            ));
        }
        if self.hours_per_vacation_day <= 0 {
            problems.push(format!(
                "hours_per_vacation_day must be positive (found {})",
                self.hours_per_vacation_day
            ));
        }
        problems
    }
}
