use serde_json::json;

use crate::models::domain::{ContentBlock, LearnMoreRequest, QuizRequest, Resource, ResourceType};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// A docs resource pointing at the given URL
    pub fn resource(url: &str) -> Resource {
        Resource {
            title: format!("Resource at {}", url),
            url: url.to_string(),
            description: "A helpful page".to_string(),
            resource_type: ResourceType::Docs,
        }
    }

    pub fn quiz_request() -> QuizRequest {
        QuizRequest {
            category: "databases".to_string(),
            subcategory: "redis".to_string(),
            num_questions: 5,
            difficulty: "Beginner".to_string(),
        }
    }

    pub fn learn_more_request() -> LearnMoreRequest {
        LearnMoreRequest {
            topic: "Persistence".to_string(),
            category: "databases".to_string(),
            subcategory: "redis".to_string(),
            difficulty: "Beginner".to_string(),
        }
    }

    /// The block recording a web search invocation
    pub fn search_call_block() -> ContentBlock {
        ContentBlock(json!({
            "type": "server_tool_use",
            "id": "srvtoolu_01",
            "name": "web_search",
            "input": { "query": "redis persistence documentation" }
        }))
    }

    /// A search result block listing the given URLs
    pub fn search_result_block(urls: &[&str]) -> ContentBlock {
        let results: Vec<_> = urls
            .iter()
            .map(|url| json!({ "type": "web_search_result", "url": url, "title": "result" }))
            .collect();
        ContentBlock(json!({
            "type": "web_search_tool_result",
            "tool_use_id": "srvtoolu_01",
            "content": results
        }))
    }

    /// Model text answering with one docs resource per URL
    pub fn resources_json(urls: &[&str]) -> String {
        let resources: Vec<_> = urls
            .iter()
            .map(|url| {
                json!({
                    "title": "Redis persistence",
                    "url": url,
                    "description": "Explains RDB and AOF",
                    "type": "docs"
                })
            })
            .collect();
        json!({ "summary": "Redis keeps data in memory.", "resources": resources }).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_search_blocks() {
        assert!(search_call_block().is_tool_invocation("web_search"));
        assert_eq!(
            search_result_block(&["https://a.com"]).block_type(),
            "web_search_tool_result"
        );
    }

    #[test]
    fn test_fixtures_resources_json_parses() {
        let value: serde_json::Value =
            serde_json::from_str(&resources_json(&["https://a.com", "https://b.com"])).unwrap();
        assert_eq!(value["resources"].as_array().map(Vec::len), Some(2));
    }
}
