use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_QUESTIONS_PATH: &str = "data/questions.json";

/// Server settings read from the environment, with defaults matching the
/// development setup (`PORT`, `QUESTIONS_PATH`).
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub questions_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let questions_path = env::var("QUESTIONS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_QUESTIONS_PATH));

        Self {
            port,
            questions_path,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
