use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One model turn: an ordered list of content blocks.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ModelMessage {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
}

impl ModelMessage {
    pub fn new(content: Vec<ContentBlock>) -> Self {
        Self {
            content,
            stop_reason: None,
        }
    }

    pub fn block_types(&self) -> Vec<&str> {
        self.content.iter().map(ContentBlock::block_type).collect()
    }

    /// True when any block records an invocation of the named tool.
    pub fn invoked_tool(&self, name: &str) -> bool {
        self.content.iter().any(|block| block.is_tool_invocation(name))
    }

    /// All text blocks joined in order, or `None` when the turn has no text.
    pub fn text(&self) -> Option<String> {
        let parts: Vec<&str> = self.content.iter().filter_map(ContentBlock::text).collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.concat())
        }
    }
}

/// A content block kept as raw JSON; only `type` and a few fields are interpreted.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ContentBlock(pub Value);

impl ContentBlock {
    pub fn text_block(text: impl Into<String>) -> Self {
        ContentBlock(json!({ "type": "text", "text": text.into() }))
    }

    pub fn block_type(&self) -> &str {
        self.0.get("type").and_then(Value::as_str).unwrap_or("unknown")
    }

    pub fn is_text(&self) -> bool {
        self.block_type() == "text"
    }

    pub fn text(&self) -> Option<&str> {
        if self.is_text() {
            self.0.get("text").and_then(Value::as_str)
        } else {
            None
        }
    }

    pub fn tool_name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn is_tool_invocation(&self, name: &str) -> bool {
        matches!(self.block_type(), "tool_use" | "server_tool_use") && self.tool_name() == Some(name)
    }

    /// The block serialized as a single string, for pattern scanning.
    pub fn searchable_text(&self) -> String {
        self.0.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_call() -> ContentBlock {
        ContentBlock(json!({
            "type": "server_tool_use",
            "id": "srvtoolu_01",
            "name": "web_search",
            "input": { "query": "redis eviction policies" }
        }))
    }

    #[test]
    fn parses_messages_api_response() {
        let body = json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "content": [
                { "type": "text", "text": "Let me search." },
                search_call().0,
                { "type": "web_search_tool_result", "tool_use_id": "srvtoolu_01", "content": [] },
                { "type": "text", "text": "{\"summary\": \"s\"}" }
            ],
            "stop_reason": "end_turn"
        });

        let message: ModelMessage = serde_json::from_value(body).unwrap();
        assert_eq!(
            message.block_types(),
            vec!["text", "server_tool_use", "web_search_tool_result", "text"]
        );
        assert_eq!(message.stop_reason.as_deref(), Some("end_turn"));
        assert!(message.invoked_tool("web_search"));
    }

    #[test]
    fn text_joins_all_text_blocks() {
        let message = ModelMessage::new(vec![
            ContentBlock::text_block("{\"summary\": "),
            search_call(),
            ContentBlock::text_block("\"s\"}"),
        ]);

        assert_eq!(message.text().as_deref(), Some("{\"summary\": \"s\"}"));
    }

    #[test]
    fn text_is_none_without_text_blocks() {
        let message = ModelMessage::new(vec![search_call()]);

        assert_eq!(message.text(), None);
    }

    #[test]
    fn tool_invocation_requires_matching_name() {
        let other_tool = ContentBlock(json!({ "type": "tool_use", "name": "calculator" }));
        let message = ModelMessage::new(vec![other_tool, ContentBlock::text_block("hi")]);

        assert!(!message.invoked_tool("web_search"));
    }

    #[test]
    fn text_block_mentioning_tool_is_not_an_invocation() {
        let block = ContentBlock(json!({ "type": "text", "text": "x", "name": "web_search" }));

        assert!(!block.is_tool_invocation("web_search"));
    }

    #[test]
    fn untyped_block_reports_unknown() {
        assert_eq!(ContentBlock(json!({ "foo": 1 })).block_type(), "unknown");
    }
}
