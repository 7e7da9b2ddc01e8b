//! Command-line client for exercising an A2A agent or gateway
//!
//! Fetches the target's capability card, submits one task with a fresh id,
//! and prints the agent's reply.

use a2a_gateway::protocol::{AgentCard, Task, TaskState};
use clap::Parser;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "send-task")]
#[command(about = "Send a task to an A2A agent and print the reply", version)]
struct Args {
    /// Base URL of the agent or gateway
    #[arg(short, long, default_value = "http://localhost:5005")]
    url: String,

    /// Message text to send
    message: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()?;

    let base = args.url.trim_end_matches('/');

    let card: AgentCard = client
        .get(format!("{base}/.well-known/agent.json"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    println!("Connected to: {} - {}", card.name, card.description);

    let task = Task::from_user_text(&args.message);
    println!("Sending task {}", task.id);

    // No error_for_status here: a 502 still carries a failed task body
    let reply: Task = client
        .post(format!("{base}/tasks/send"))
        .json(&task)
        .send()
        .await?
        .json()
        .await?;

    match &reply.status {
        Some(status) if status.state == TaskState::Completed => {
            let text = reply.messages.last().map(|m| m.text()).unwrap_or_default();
            println!("Agent replied:\n{text}");
        }
        Some(status) => {
            println!(
                "Task failed: {}",
                status.reason.as_deref().unwrap_or("no reason given")
            );
            if let Some(last) = reply.messages.last() {
                println!("{}", last.text());
            }
        }
        None => println!("Agent returned a task with no status"),
    }

    Ok(())
}
