//! Handler for the `complete` command.
//!
//! Runs one prompt through the same acquire/release path a long-lived
//! consumer would use. Handy for checking credentials end to end.

use serde_json::json;

use crate::adapter::inbound::cli::command::CompleteArgs;
use crate::adapter::inbound::cli::{operator, output};
use crate::error::Result;
use crate::port::inbound::operator::completion::CompletionRequest;

/// Execute the complete command.
///
/// # Errors
///
/// Returns an error if the consumer or role is unknown, the pool cannot hand
/// out a client, or the provider call fails.
pub async fn execute(args: &CompleteArgs) -> Result<()> {
    let request = CompletionRequest {
        config_toml: operator::read_config_toml(&args.config)?,
        consumer: args.consumer.clone(),
        role: args.role.clone(),
        prompt: args.prompt.clone(),
    };

    let response = operator::operator().complete(request).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "complete",
            "response": response,
        }));
        return Ok(());
    }

    if output::verbosity() > 0 {
        output::field("Key", &response.key);
        output::field("Model", &response.model);
        println!();
    }
    println!("{}", response.text);
    Ok(())
}
