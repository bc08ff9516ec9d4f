//! Web server CLI command.

use crate::cli::common::{CliContext, CliError, CliResult};
use crate::web;
use clap::Args;
use std::net::SocketAddr;

/// Serve the map and the read-only API over HTTP
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,
}

impl ServeArgs {
    /// Execute the serve command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let addr: SocketAddr = format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| CliError::validation(format!("Invalid address: {e}")))?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| CliError::io(format!("Failed to start runtime: {e}")))?;

        println!("Map available at http://{addr}/map");

        runtime
            .block_on(web::run_server(
                ctx.config.clone(),
                ctx.data_dir.clone(),
                addr,
            ))
            .map_err(|e| CliError::io(format!("Server error: {e:#}")))
    }
}
