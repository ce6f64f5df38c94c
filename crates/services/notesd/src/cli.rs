//! Command-line interface for notesd.

use clap::Parser;
use std::path::PathBuf;

/// Command-line interface for notesd.
///
/// The signing secret is only ever read from the `JWT_SECRET` environment
/// variable.
#[derive(Parser, Debug, Default)]
#[command(name = "notesd")]
#[command(version, about = "Personal notes API server")]
pub struct Cli {
    /// Optional TOML configuration file
    #[arg(short, long, env = "NOTESD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on [default: 127.0.0.1:8080]
    #[arg(short, long, env = "NOTESD_BIND")]
    pub bind: Option<String>,

    /// SQLite database path [default: notes.db]
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}
