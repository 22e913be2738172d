//! Process configuration.
//!
//! # Responsibility
//! - Parse command-line flags with environment fallbacks.
//! - Resolve derived settings (bind address, log level, not-found policy).

use crate::graphql::MissingTargetPolicy;
use clap::{ArgAction, Parser};
use featuremap_core::default_log_level;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Port used when neither `--port` nor `PORT` is given.
pub const DEFAULT_PORT: u16 = 4000;

#[derive(Debug, Clone, Parser)]
#[command(name = "featuremap-server", version)]
#[command(about = "GraphQL API for storing and listing map features", long_about = None)]
pub struct ServerConfig {
    /// Store location: file path, sqlite://<path>, sqlite:<path> or :memory:
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Address to bind the HTTP listener to
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to bind the HTTP listener to
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Log level (trace|debug|info|warn|error); build-mode default when unset
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rotating log files; logs go to stderr when unset
    #[arg(long, env = "LOG_DIR")]
    pub log_dir: Option<String>,

    /// Fail editFeature/deleteFeature with NOT_FOUND when no feature matches
    #[arg(long, env = "STRICT_MUTATIONS", default_value_t = false, action = ArgAction::Set)]
    pub strict_mutations: bool,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }

    pub fn missing_target_policy(&self) -> MissingTargetPolicy {
        if self.strict_mutations {
            MissingTargetPolicy::Reject
        } else {
            MissingTargetPolicy::Ignore
        }
    }
}
