mod cli;

use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

use reqline::server::Server;

#[tokio::main]
async fn main() -> Result<()> {
    reqline::logger::init_logger();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Parse { reqline }) => match reqline::parser::parse(&reqline) {
            Ok(descriptor) => println!("{}", serde_json::to_string_pretty(&descriptor)?),
            Err(e) => {
                eprintln!(
                    "{}",
                    serde_json::json!({ "error": true, "message": e.to_string() })
                );
                std::process::exit(1);
            }
        },
        None => {
            let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
            let server = Server::bind(addr).await?;
            server.serve().await?;
        }
    }
    Ok(())
}
