//! writer: terminal client for the Quill GraphQL API

mod args;
mod edit;

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use args::{Cli, Commands};
use quill_client::GraphQLClient;
use quill_shared::PostDto;
use quill_shared::dto::PostFilterDto;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = GraphQLClient::new(&cli.api_url);
    tracing::debug!(endpoint = %client.endpoint(), "Using API");

    match cli.command {
        Commands::Hello { name } => println!("{}", client.hello(name.as_deref()).await?),
        Commands::List { mine } => {
            let filter = if mine { PostFilterDto::Mine } else { PostFilterDto::Home };
            for post in client.posts(filter).await? {
                println!("{}\t{}\t{}", post.id, post.title, post.author);
            }
        }
        Commands::Show { id } => print_post(&client.post(&id).await?),
        Commands::Edit { id } => {
            edit::run(client, id, Duration::from_millis(cli.autosave_ms)).await?;
        }
    }

    Ok(())
}

fn print_post(post: &PostDto) {
    println!("{}", post.title);
    println!("by {} ({})", post.author, post.id);
    if let Some(image) = &post.image {
        println!("image: {image}");
    }
    println!();
    println!("{}", post.body);
}
