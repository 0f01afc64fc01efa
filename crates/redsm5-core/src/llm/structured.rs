//! Schema-validated structured output
//!
//! The model is asked for a JSON object matching a fixed schema. Output that
//! fails to parse or validate is sent back to the model together with the
//! validation error, and the request is repeated until it succeeds or the
//! attempt budget runs out.

use super::backend::{ChatBackend, ChatRequest};
use super::messages::ChatMessage;
use crate::error::{Redsm5Error, Redsm5Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

/// A typed response the model must produce
pub trait StructuredOutput: DeserializeOwned + Serialize + Send {
    /// Schema name sent in the response-format hint
    const NAME: &'static str;

    /// JSON schema of the expected object
    fn json_schema() -> Value;

    /// Semantic checks beyond what deserialization enforces
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// OpenAI `response_format` value requesting `T`'s schema
pub fn response_format<T: StructuredOutput>() -> Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": T::NAME,
            "schema": T::json_schema(),
            "strict": true,
        }
    })
}

/// Locate the JSON object in a model reply
///
/// Models sometimes wrap the object in a code fence or add a sentence around
/// it; everything outside the outermost braces is dropped.
pub fn extract_json(raw: &str) -> &str {
    let trimmed = raw.trim();
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

/// Parse and validate a model reply as `T`
pub fn parse_structured<T: StructuredOutput>(raw: &str) -> Redsm5Result<T> {
    let value: T = serde_json::from_str(extract_json(raw)).map_err(|e| {
        Redsm5Error::validation(format!("Output does not match {}: {}", T::NAME, e))
    })?;
    value
        .validate()
        .map_err(|reason| Redsm5Error::validation(format!("Invalid {}: {}", T::NAME, reason)))?;
    Ok(value)
}

fn reask_message(error: &Redsm5Error) -> ChatMessage {
    ChatMessage::user(format!(
        "Your previous answer was rejected: {}. Reply again with only a JSON object that matches the required schema.",
        error
    ))
}

/// Request a `T` from `backend`, re-asking on invalid output
///
/// `max_attempts` is the total number of requests made. Errors from the
/// backend itself (transport, endpoint) are returned immediately, since the
/// client already retried them. Truncated output is retried without a re-ask.
/// After the last attempt the final validation error is returned.
pub async fn request_structured<T: StructuredOutput>(
    backend: &dyn ChatBackend,
    mut request: ChatRequest,
    max_attempts: u32,
) -> Redsm5Result<T> {
    request.response_format = Some(response_format::<T>());
    let max_attempts = max_attempts.max(1);
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        let completion = backend.chat(&request).await?;

        if completion.is_truncated() {
            warn!(attempt, max_attempts, schema = T::NAME, "output truncated at token limit");
            last_error = Some(Redsm5Error::truncated(format!(
                "{} output stopped at the token limit",
                T::NAME
            )));
            continue;
        }

        match parse_structured::<T>(&completion.content) {
            Ok(value) => {
                if attempt > 1 {
                    debug!(attempt, schema = T::NAME, "valid output after re-ask");
                }
                return Ok(value);
            }
            Err(error) => {
                warn!(
                    attempt,
                    max_attempts,
                    schema = T::NAME,
                    error = %error,
                    "output failed validation"
                );
                request
                    .messages
                    .push(ChatMessage::assistant(completion.content));
                request.messages.push(reask_message(&error));
                last_error = Some(error);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        Redsm5Error::validation(format!("No valid {} after {} attempts", T::NAME, max_attempts))
    }))
}
