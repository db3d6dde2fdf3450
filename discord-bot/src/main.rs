//! Binary for the persona Discord bot. `run` starts the gateway client, `chat` the terminal loop.

use anyhow::Result;
use clap::Parser;
use discord_bot::{chat, load_config, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::Chat => chat::run_terminal_chat().await,
    }
}
