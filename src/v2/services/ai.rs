//! Natural-language (Spotter) endpoints (V2).

use crate::errors::ThoughtSpotResult;
use crate::v2::V2Client;
use serde_json::{json, Value};

/// AI endpoints (`ai/...`).
pub struct AiService<'a> {
    client: &'a V2Client,
}

impl<'a> AiService<'a> {
    pub(crate) fn new(client: &'a V2Client) -> Self {
        Self { client }
    }

    /// Starts a conversation against a data model. `tokens` seeds the
    /// conversation vocabulary; the wire format is a single string of
    /// bracketed lowercase tokens (`[revenue],[region]`).
    pub async fn conversation_create(
        &self,
        metadata_identifier: &str,
        tokens: Option<&[String]>,
    ) -> ThoughtSpotResult<Value> {
        let mut request = json!({ "metadata_identifier": metadata_identifier });
        if let Some(tokens) = tokens {
            let joined = tokens
                .iter()
                .map(|token| format!("[{}]", token.to_lowercase()))
                .collect::<Vec<_>>()
                .join(",");
            request["tokens"] = Value::from(joined);
        }
        self.client.post_json("ai/conversation/create", request).await
    }

    /// Sends a message in an existing conversation.
    pub async fn conversation_converse(
        &self,
        conversation_identifier: &str,
        metadata_identifier: &str,
        message: &str,
    ) -> ThoughtSpotResult<Value> {
        self.client
            .post_json(
                &format!("ai/conversation/{conversation_identifier}/converse"),
                json!({
                    "metadata_identifier": metadata_identifier,
                    "message": message,
                }),
            )
            .await
    }

    /// One-shot natural-language answer.
    pub async fn answer_create(
        &self,
        metadata_identifier: &str,
        query: &str,
    ) -> ThoughtSpotResult<Value> {
        self.client
            .post_json(
                "ai/answer/create",
                json!({
                    "metadata_identifier": metadata_identifier,
                    "query": query,
                }),
            )
            .await
    }

    /// Suggested analytical questions for a data model.
    pub async fn analytical_questions(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("ai/analytical-questions", request).await
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn token_string_format() {
        let tokens = ["Revenue", "Region"];
        let joined = tokens
            .iter()
            .map(|token| format!("[{}]", token.to_lowercase()))
            .collect::<Vec<_>>()
            .join(",");
        assert_eq!(joined, "[revenue],[region]");
    }
}
