//! Command-line surface for `writer`.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "writer", version, about = "Read and write Quill posts", long_about = None)]
pub struct Cli {
    /// GraphQL endpoint
    #[arg(long, env = "QUILL_API_URL", default_value = quill_client::client::DEFAULT_ENDPOINT)]
    pub api_url: String,

    /// Quiet period before an autosave, in milliseconds
    #[arg(long, env = "QUILL_AUTOSAVE_MS", default_value_t = 500)]
    pub autosave_ms: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask the server for a greeting
    Hello { name: Option<String> },
    /// List posts from the home feed, or your own with --mine
    List {
        #[arg(long)]
        mine: bool,
    },
    /// Print one post
    Show { id: String },
    /// Open the editor on a post, or on a new one
    Edit { id: Option<String> },
}
