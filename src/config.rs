use std::env;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "OPD Booking";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default listening port when neither `OPD_PORT` nor `PORT` is set.
pub const DEFAULT_PORT: u16 = 5000;

/// Get the default application data directory
/// ~/OpdBooking/ on all platforms (user-visible, holds the ledger database)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("OpdBooking")
}

/// Environment-provided server configuration.
///
/// Read once at startup; `.env` files are honored via `dotenvy` before
/// this is constructed.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listening port (`OPD_PORT`, falling back to `PORT`).
    pub port: u16,
    /// Directory holding the ledger database (`OPD_DATA_DIR`).
    pub data_dir: PathBuf,
    /// Allowed CORS origins (`OPD_ALLOWED_ORIGINS`, comma-separated).
    /// A single `*` entry allows any origin.
    pub allowed_origins: Vec<String>,
    /// Hospital name printed on ticket PDFs (`OPD_HOSPITAL_NAME`).
    pub hospital_name: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("OPD_PORT")
            .or_else(|_| env::var("PORT"))
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let data_dir = env::var("OPD_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| app_data_dir());

        let allowed_origins = parse_origins(
            &env::var("OPD_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".into()),
        );

        let hospital_name =
            env::var("OPD_HOSPITAL_NAME").unwrap_or_else(|_| "City Care Hospital".into());

        Self {
            port,
            data_dir,
            allowed_origins,
            hospital_name,
        }
    }

    /// Path of the ledger database inside the data directory.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("opd.db")
    }
}

/// Split a comma-separated origin list, dropping empty entries.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}
