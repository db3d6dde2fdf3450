//! Terminal chat: single-turn prompts to the model in persona voice, `quit` / `exit` to leave.

use std::sync::Arc;

use anyhow::Result;
use llm_client::{EnvLlmConfig, GeminiLlmClient, LlmClient};
use persona::Persona;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::handlers::provider_reply;

const SEPARATOR_WIDTH: usize = 40;

fn is_exit(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "quit" | "exit")
}

/// Runs the loop over arbitrary reader / writer until EOF or an exit word.
pub async fn chat_loop<R, W>(
    llm_client: &dyn LlmClient,
    persona: &Persona,
    input: R,
    mut output: W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    output
        .write_all(format!("{}\n", persona.chat.banner).as_bytes())
        .await?;

    loop {
        output.write_all(b"You:\n").await?;
        output.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if is_exit(&line) {
            output
                .write_all(format!("{}\n", persona.chat.farewell).as_bytes())
                .await?;
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let result = llm_client
            .get_llm_response(&persona.system_instruction, line.trim())
            .await;
        let reply = provider_reply(persona, &result);
        output
            .write_all(
                format!(
                    "\n{}\n{}\n\n{}\n",
                    persona.chat.reply_header,
                    reply,
                    "-".repeat(SEPARATOR_WIDTH)
                )
                .as_bytes(),
            )
            .await?;
    }
    output.flush().await?;
    Ok(())
}

/// `chat` subcommand: Gemini config and persona from env, stdin / stdout.
pub async fn run_terminal_chat() -> Result<()> {
    let llm_config = EnvLlmConfig::from_env()?;
    let persona = Persona::from_env()?;
    let llm_client: Arc<dyn LlmClient> = Arc::new(GeminiLlmClient::from_config(&llm_config));
    chat_loop(
        llm_client.as_ref(),
        &persona,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
}
