use clap::{Parser, Subcommand};

/// BrandHub — OAuth2 + MCP gateway exposing brand data to AI assistants
#[derive(Parser)]
#[command(name = "brandhub", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the gateway server
    Serve {
        /// Port to bind
        #[arg(short, long, default_value = "8090")]
        port: u16,

        /// Seed a demo organization and authorization code into the
        /// in-memory stores (local development only)
        #[arg(long)]
        seed_demo: bool,
    },
}
