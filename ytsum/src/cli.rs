//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ytsum")]
#[command(about = "Summarise YouTube videos with a chat-completion model")]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP service
    Serve {
        /// Address to bind, overrides `server.bind_address`
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },
    /// Summarise a single video and print the result
    Summarise(SummariseArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SummariseArgs {
    /// YouTube video link
    #[arg(short, long)]
    pub url: String,

    /// Language code of the captions to read
    #[arg(short = 'l', long, default_value = "en")]
    pub video_language: String,

    /// Language code the summary is written in
    #[arg(short, long)]
    pub summary_language: String,
}
