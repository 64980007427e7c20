use crate::errors::{AppError, AppResult};
use crate::models::payment_method::PaymentMethod;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub mod migrate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_payment_method")]
    pub default_payment_method: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_checkin_source")]
    pub checkin_source: String,
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

pub(crate) fn default_payment_method() -> String {
    "cash".to_string()
}
pub(crate) fn default_currency_symbol() -> String {
    "₡".to_string()
}
pub(crate) fn default_checkin_source() -> String {
    "kiosk".to_string()
}
pub(crate) fn default_list_limit() -> usize {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            default_payment_method: default_payment_method(),
            currency_symbol: default_currency_symbol(),
            checkin_source: default_checkin_source(),
            list_limit: default_list_limit(),
        }
    }
}

impl Config {
    /// Standard configuration directory for the platform:
    /// `%APPDATA%\gymdesk` on Windows, `~/.gymdesk` elsewhere.
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("gymdesk")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".gymdesk")
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("gymdesk.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("gymdesk.sqlite")
    }

    /// Load configuration from file, or defaults if there is none yet.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            Ok(serde_yaml::from_str(&content)?)
        } else {
            Ok(Config::default())
        }
    }

    /// Payment method used when `--pay` is omitted.
    pub fn default_payment(&self) -> AppResult<PaymentMethod> {
        PaymentMethod::from_code(&self.default_payment_method)
            .ok_or_else(|| AppError::InvalidPaymentMethod(self.default_payment_method.clone()))
    }

    /// Resolve a user-supplied DB name: absolute paths are kept, relative
    /// ones live in the config directory.
    pub fn resolve_db_path(custom: Option<&str>) -> PathBuf {
        match custom {
            Some(name) => {
                let p = PathBuf::from(name);
                if p.is_absolute() {
                    p
                } else {
                    Self::config_dir().join(p)
                }
            }
            None => Self::database_file(),
        }
    }

    /// Create the config directory and file (unless `is_test`) and the
    /// empty database file. Returns the database path.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let db_path = Self::resolve_db_path(custom_db);

        if !is_test {
            fs::create_dir_all(Self::config_dir())?;

            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };

            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}
