use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about = "Reqline statement parser and request runner", long_about = None)]
pub struct Cli {
    /// Port the HTTP service listens on
    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a reqline statement and print the descriptor without executing it
    Parse {
        /// The statement, e.g. 'HTTP GET | URL https://api.example.com'
        reqline: String,
    },
}
