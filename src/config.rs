// ⚙️ Server Configuration
//
// Flags first, then ATM_* environment variables, then defaults.

use clap::Parser;

pub const DEFAULT_LOG_FILTER: &str = "atm_ledger=info,tower_http=info";

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "atm-server")]
#[command(about = "In-memory ATM account service", long_about = None)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "ATM_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "ATM_PORT", default_value_t = 8081)]
    pub port: u16,

    /// tracing filter directives (RUST_LOG wins when set)
    #[arg(long, env = "ATM_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8081,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
