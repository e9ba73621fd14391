//! kroki-mcp binary entry point.

use clap::Parser;

use kroki_mcp::config::ServiceConfig;

/// MCP stdio server for rendering diagrams via a Kroki server.
#[derive(Parser)]
#[command(name = "kroki-mcp", version, about)]
struct Cli {
    /// Kroki server base URL (defaults to $KROKI_SERVER_URL, then https://kroki.io)
    #[arg(long)]
    server_url: Option<String>,

    /// HTTP timeout for render requests, in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn main() {
    let cli = Cli::parse();

    // Log to stderr; stdout carries the JSON-RPC protocol stream.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match ServiceConfig::resolve(cli.server_url, cli.timeout_secs) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("kroki-mcp: error: {e}");
            std::process::exit(2);
        }
    };

    kroki_mcp::run_mcp_server(config);
}
