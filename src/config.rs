use std::{env, fmt::Display, net::SocketAddr, path::PathBuf, str::FromStr};
use tracing::{info, warn};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/feedback.json";

/// Server settings read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PORT", DEFAULT_PORT),
            data_path: try_load("APP_DATA_PATH", PathBuf::from(DEFAULT_DATA_PATH)),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|err| {
            warn!("Invalid {key} value '{raw}': {err}, using default: {default:?}");
            default
        }),
        Err(_) => {
            info!("{key} not set, using default: {default:?}");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_keys_fall_back_to_defaults() {
        let port: u16 = try_load("FEEDBACK_APP_TEST_UNSET_PORT", 4242);
        assert_eq!(port, 4242);
    }

    #[test]
    fn addr_binds_all_interfaces() {
        let config = Config {
            port: 9000,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
        };
        assert_eq!(config.addr().to_string(), "0.0.0.0:9000");
    }
}
