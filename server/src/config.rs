//! Command-line and environment configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::ArgAction;

/// Runtime settings for the server binary.
///
/// Every option can also be supplied through the environment variable named
/// in its `env` attribute; command-line flags take precedence.
#[derive(Debug, Clone, clap::Parser)]
#[command(version, about = "HTTP service for managing to-do items")]
pub struct Config {
    /// Address to bind the HTTP listener to
    #[arg(long, env = "TODO_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to bind the HTTP listener to
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// SQLite connection string; the file is created if missing
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://todos.db")]
    pub database_url: String,

    /// Upper bound on pooled database connections
    #[arg(long, env = "TODO_MAX_CONNECTIONS", default_value_t = 8)]
    pub max_connections: u32,

    /// Insert the five sample to-dos on startup
    #[arg(long, env = "TODO_SEED_SAMPLE")]
    pub seed_sample: bool,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Log level implied by the `-v` count. `RUST_LOG` directives are
    /// applied on top of it.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn explicit_flags_are_parsed() {
        let config = Config::try_parse_from([
            "todo-server",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--database-url",
            "sqlite::memory:",
            "--max-connections",
            "2",
            "--seed-sample",
        ])
        .unwrap();

        assert_eq!(config.socket_addr(), "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 2);
        assert!(config.seed_sample);
    }

    #[test]
    fn verbosity_raises_log_level() {
        let quiet = Config::try_parse_from(["todo-server"]).unwrap();
        assert_eq!(quiet.log_level(), tracing::Level::INFO);

        let loud = Config::try_parse_from(["todo-server", "-vv"]).unwrap();
        assert_eq!(loud.log_level(), tracing::Level::TRACE);
    }

    #[test]
    fn rejects_non_numeric_port() {
        assert!(Config::try_parse_from(["todo-server", "--port", "http"]).is_err());
    }
}
