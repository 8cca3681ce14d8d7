//! CLI transport for direct terminal interaction

use crate::assistant::{Reply, ReplySource, ResponseRouter, Sender, Transcript};
use crate::config::Config;
use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Answer a single question and print the reply
pub async fn run_ask(config: &Config, message: &str) -> Result<()> {
    if message.is_empty() {
        anyhow::bail!("No message provided");
    }

    let router = ResponseRouter::from_config(config);
    let reply = router.answer(message).await;
    tracing::debug!("Reply from {}", reply.source);
    println!("{}", reply.text);
    Ok(())
}

fn print_reply(reply: &Reply) {
    let label = match reply.source {
        ReplySource::Agent => "brevo".green().bold(),
        ReplySource::Fallback => "brevo (offline)".yellow().bold(),
    };
    println!("\n{}\n{}\n", label, reply.text);
}

fn print_history(transcript: &Transcript) {
    if transcript.is_empty() {
        println!("No messages yet.\n");
        return;
    }
    for entry in transcript.entries() {
        let who = match entry.sender {
            Sender::User => "you".cyan(),
            Sender::Assistant => "brevo".green(),
        };
        println!(
            "[{}] {}: {}",
            entry.time.format("%H:%M:%S").to_string().dimmed(),
            who,
            entry.text
        );
    }
    println!();
}

/// Interactive chat loop over stdin
///
/// `exit`/`quit` leave, `clear` empties the transcript, `history` prints it.
/// End of input also ends the session.
pub async fn run_chat(config: &Config, initial_message: Option<String>) -> Result<()> {
    let router = ResponseRouter::from_config(config);
    let mut transcript = Transcript::new();

    println!("{}", "=== BREVO Smart Travel Planner ===".bold().cyan());
    println!("Ask about destinations, budgets or weather. Type 'exit' to quit.\n");

    if let Some(msg) = initial_message.filter(|m| !m.is_empty()) {
        println!("> {}", msg);
        transcript.push_user(&msg);
        let reply = router.answer(&msg).await;
        print_reply(&reply);
        transcript.push_reply(&reply);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            println!();
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "exit" | "quit" => {
                println!("Goodbye!");
                break;
            }
            "clear" => {
                transcript.clear();
                println!("Conversation cleared.\n");
                continue;
            }
            "history" => {
                print_history(&transcript);
                continue;
            }
            _ => {}
        }

        transcript.push_user(input);
        let reply = router.answer(input).await;
        print_reply(&reply);
        transcript.push_reply(&reply);
    }

    tracing::debug!("Chat session ended after {} messages", transcript.len());
    Ok(())
}

/// Print the effective configuration as TOML
pub fn run_show_config(config: &Config, path: &Path) -> Result<()> {
    println!("# {}", path.display());
    print!("{}", config.to_toml()?);
    Ok(())
}
