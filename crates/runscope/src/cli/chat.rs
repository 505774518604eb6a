//! Chat transcript command handlers.

use super::commands::{ChatCommands, OutputFormat};
use super::output::{local_time, print_json};
use runscope::{BackendConfig, RunscopeResult};

/// Handle chat transcript commands.
pub async fn handle_chat_command(cmd: ChatCommands, config: &BackendConfig) -> RunscopeResult<()> {
    let repository = super::repository(config);

    match cmd {
        ChatCommands::Users { format } => {
            let users = repository.list_user_profiles().await?;
            match format {
                OutputFormat::Json => print_json(&users)?,
                OutputFormat::Human => {
                    for user in &users {
                        println!("{:<38} {}", user.user_id, user.display_name);
                    }
                    println!("Total: {} users", users.len());
                }
            }
        }
        ChatCommands::Messages { user_id, format } => {
            let messages = repository.list_chat_messages(&user_id).await?;
            match format {
                OutputFormat::Json => print_json(&messages)?,
                OutputFormat::Human if messages.is_empty() => {
                    println!("No messages found for user {}", user_id);
                }
                OutputFormat::Human => {
                    for message in &messages {
                        println!("[{}] {}:", local_time(&message.created_at), message.sender);
                        if let Some(text) = &message.content_text {
                            println!("  {}", text.replace('\n', "\n  "));
                        }
                        if let Some(json) = &message.content_json {
                            let pretty = serde_json::to_string_pretty(json)
                                .unwrap_or_else(|_| json.to_string());
                            println!("  {}", pretty.replace('\n', "\n  "));
                        }
                    }
                    println!("Total: {} messages", messages.len());
                }
            }
        }
    }

    Ok(())
}
