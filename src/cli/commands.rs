use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use crate::config::{self, Transport};
use crate::gateway::GatewayContext;

#[derive(Parser)]
#[command(name = "sejm-gateway")]
#[command(about = "RPC-style gateway exposing Polish legal-act lookups as a typed tool interface")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum TransportArg {
    Stdio,
    Http,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the gateway until interrupted.
    Serve {
        #[arg(long, value_enum)]
        transport: Option<TransportArg>,
        /// Reserved for a future file-based config layer; currently
        /// settings are read from the environment regardless.
        #[arg(long)]
        config: Option<String>,
    },
    /// Probe upstream reachability and print the resolved configuration.
    Doctor,
    /// Print the fixed tool catalog without contacting upstream.
    Tools,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { transport, config: _ } => serve(transport).await,
        Commands::Doctor => super::doctor::run().await,
        Commands::Tools => {
            print_tool_catalog();
            Ok(())
        }
    }
}

async fn serve(transport_arg: Option<TransportArg>) -> Result<()> {
    let settings = config::load_settings();
    let transport = match transport_arg {
        Some(TransportArg::Stdio) => Transport::Stdio,
        Some(TransportArg::Http) => Transport::Http,
        None => settings.transport.clone(),
    };

    info!(server = %settings.server_name, version = %settings.server_version, "starting gateway");
    let ctx = Arc::new(GatewayContext::new(settings));

    match transport {
        Transport::Stdio => crate::transport::stdio::serve(ctx).await,
        Transport::Http => {
            let host = ctx.settings.host.clone();
            let port = ctx.settings.port;
            crate::transport::http::serve(ctx, &host, port).await
        }
    }
}

fn print_tool_catalog() {
    for (name, description) in crate::tools::TOOL_CATALOG {
        println!("{name:<28} {description}");
    }
}
