use std::env;
use std::path::PathBuf;

/// Process-wide configuration, read from the environment once at startup
/// and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_url: String,
    /// Directory holding uploaded media files; only consulted for
    /// best-effort cleanup when a residence is deleted.
    pub uploads_dir: PathBuf,
    /// CORS allow-list. Empty means any origin (development).
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_owned());
        let uploads_dir =
            PathBuf::from(env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_owned()));
        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            bind_addr,
            database_url,
            uploads_dir,
            allowed_origins,
        }
    }
}
