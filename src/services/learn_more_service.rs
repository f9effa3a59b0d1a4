use std::sync::Arc;

use chrono::{Datelike, Utc};
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::{
    constants::{
        prompts::{learn_more_user_prompt, LEARN_MORE_SYSTEM_PROMPT},
        WEB_SEARCH_TOOL_NAME,
    },
    errors::{AppError, AppResult},
    models::{
        domain::{LearnMoreRequest, Resource},
        dto::response::LearnMoreResponse,
    },
    services::{
        anthropic_client::{ResearchModel, ResearchPrompt},
        liveness::LivenessProbe,
        model_output::parse_model_json,
        resource_validator::validate_resources,
        url_extraction::extract_searched_urls,
    },
};

/// Model output before any entry is trusted.
#[derive(Debug, Deserialize)]
struct RawLearnMorePayload {
    #[serde(default)]
    summary: Option<String>,
    // Absent and null both mean no resources.
    #[serde(default)]
    resources: Option<Vec<Value>>,
}

pub struct LearnMoreService {
    model: Option<Arc<dyn ResearchModel>>,
    probe: Arc<dyn LivenessProbe>,
    max_resources: usize,
}

impl LearnMoreService {
    pub fn new(
        model: Option<Arc<dyn ResearchModel>>,
        probe: Arc<dyn LivenessProbe>,
        max_resources: usize,
    ) -> Self {
        Self {
            model,
            probe,
            max_resources,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    fn model(&self) -> AppResult<&Arc<dyn ResearchModel>> {
        self.model
            .as_ref()
            .ok_or_else(|| AppError::Configuration("Learn More is not configured.".to_string()))
    }

    /// Fails fast when no model credential is configured.
    pub fn ensure_configured(&self) -> AppResult<()> {
        self.model().map(|_| ())
    }

    pub async fn learn_more(&self, request: &LearnMoreRequest) -> AppResult<LearnMoreResponse> {
        let model = self.model()?;

        log::info!(
            "Requesting learning resources for \"{}\" ({} / {})",
            request.topic,
            request.subcategory,
            request.difficulty
        );

        let prompt = ResearchPrompt {
            system: LEARN_MORE_SYSTEM_PROMPT.to_string(),
            user: learn_more_user_prompt(request, Utc::now().year()),
        };
        let message = model.research(&prompt).await?;

        let block_types = message.block_types().join(", ");
        log::info!("Model response blocks: {}", block_types);

        if !message.invoked_tool(WEB_SEARCH_TOOL_NAME) {
            log::error!("Web search was not used. Block types received: {}", block_types);
            return Err(AppError::ToolNotInvoked);
        }

        let text = message.text().ok_or_else(|| {
            log::error!("No text block found in response. Block types: {}", block_types);
            AppError::ResponseParse("Invalid response format".to_string())
        })?;

        let payload: RawLearnMorePayload = parse_model_json(&text).map_err(|e| {
            log::error!("Failed to parse learning resources ({}). Raw text: {}", e, text);
            AppError::ResponseParse("Failed to parse learning resources".to_string())
        })?;

        let candidates = trusted_resources(payload.resources.unwrap_or_default());
        log::info!("Parsed {} resources, validating URLs", candidates.len());

        let searched_urls = extract_searched_urls(&message.content);
        log::info!("Extracted {} URLs from search results", searched_urls.len());

        let mut resources =
            validate_resources(candidates, &searched_urls, self.probe.as_ref()).await;
        log::info!("{} resources passed validation", resources.len());

        if resources.is_empty() {
            log::error!("All resources failed validation for \"{}\"", request.topic);
            return Err(AppError::NoValidResources);
        }

        resources.truncate(self.max_resources);
        log::info!(
            "Returning resources: {:?}",
            resources.iter().map(|r| r.url.as_str()).collect::<Vec<_>>()
        );

        Ok(LearnMoreResponse::new(payload.summary.unwrap_or_default(), resources))
    }
}

/// Entries that do not match the resource schema are discarded.
fn trusted_resources(raw: Vec<Value>) -> Vec<Resource> {
    raw.into_iter()
        .filter_map(|value| match serde_json::from_value::<Resource>(value) {
            Ok(resource) if resource.validate().is_ok() => Some(resource),
            Ok(resource) => {
                log::warn!("Discarding invalid resource {}", resource.url);
                None
            }
            Err(e) => {
                log::warn!("Discarding malformed resource: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::domain::{ContentBlock, ModelMessage},
        services::{anthropic_client::MockResearchModel, liveness::MockLivenessProbe},
        test_utils::fixtures::{
            learn_more_request, resources_json, search_call_block, search_result_block,
        },
    };

    fn service(message: ModelMessage, probe: MockLivenessProbe) -> LearnMoreService {
        let mut model = MockResearchModel::new();
        model
            .expect_research()
            .returning(move |_| Ok(message.clone()));
        LearnMoreService::new(Some(Arc::new(model)), Arc::new(probe), 3)
    }

    fn searched_message(urls: &[&str], text: &str) -> ModelMessage {
        ModelMessage::new(vec![
            search_call_block(),
            search_result_block(urls),
            ContentBlock::text_block(text),
        ])
    }

    #[actix_web::test]
    async fn unconfigured_service_is_a_configuration_error() {
        let service = LearnMoreService::new(None, Arc::new(MockLivenessProbe::new()), 3);

        assert!(!service.is_configured());
        assert!(matches!(
            service.learn_more(&learn_more_request()).await,
            Err(AppError::Configuration(_))
        ));
    }

    #[actix_web::test]
    async fn missing_tool_invocation_is_rejected() {
        let text = resources_json(&["https://redis.io/docs/"]);
        let message = ModelMessage::new(vec![ContentBlock::text_block(text)]);
        let mut probe = MockLivenessProbe::new();
        probe.expect_is_reachable().never();

        let result = service(message, probe).learn_more(&learn_more_request()).await;
        assert!(matches!(result, Err(AppError::ToolNotInvoked)));
    }

    #[actix_web::test]
    async fn missing_text_is_invalid_format() {
        let message = ModelMessage::new(vec![search_call_block()]);

        let result = service(message, MockLivenessProbe::new())
            .learn_more(&learn_more_request())
            .await;
        match result {
            Err(AppError::ResponseParse(msg)) => assert_eq!(msg, "Invalid response format"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[actix_web::test]
    async fn unparseable_text_is_a_parse_error() {
        let message = searched_message(&[], "Sorry, I could not find anything.");

        let result = service(message, MockLivenessProbe::new())
            .learn_more(&learn_more_request())
            .await;
        match result {
            Err(err @ AppError::ResponseParse(_)) => {
                assert_eq!(err.to_string(), "Failed to parse learning resources");
                assert!(err.search_performed());
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[actix_web::test]
    async fn searched_resources_are_returned_without_probing() {
        let urls = ["https://redis.io/docs/", "https://redis.io/tutorials/"];
        let text = format!("```json\n{}\n```", resources_json(&urls));
        let mut probe = MockLivenessProbe::new();
        probe.expect_is_reachable().never();

        let response = service(searched_message(&urls, &text), probe)
            .learn_more(&learn_more_request())
            .await
            .expect("resources should validate");

        assert!(response.success);
        assert!(response.search_performed);
        assert_eq!(response.resources.len(), 2);
        assert_eq!(response.summary, "Redis keeps data in memory.");
    }

    #[actix_web::test]
    async fn unsearched_resources_fall_back_to_liveness() {
        let text = resources_json(&["https://alive.example.com/", "https://dead.example.com/"]);
        let mut probe = MockLivenessProbe::new();
        probe
            .expect_is_reachable()
            .times(2)
            .returning(|url| url.contains("alive"));

        let response = service(searched_message(&["https://other.example.com/"], &text), probe)
            .learn_more(&learn_more_request())
            .await
            .unwrap();

        assert_eq!(response.resources.len(), 1);
        assert_eq!(response.resources[0].url, "https://alive.example.com/");
    }

    #[actix_web::test]
    async fn all_resources_failing_is_an_error() {
        let text = resources_json(&[
            "https://a.example.com/",
            "https://b.example.com/",
            "https://c.example.com/",
        ]);
        let mut probe = MockLivenessProbe::new();
        probe.expect_is_reachable().times(3).returning(|_| false);

        let result = service(searched_message(&[], &text), probe)
            .learn_more(&learn_more_request())
            .await;
        assert!(matches!(result, Err(AppError::NoValidResources)));
    }

    #[actix_web::test]
    async fn null_and_missing_resources_both_mean_none_found() {
        for text in [r#"{"summary": "s", "resources": null}"#, r#"{"summary": "s"}"#] {
            let mut probe = MockLivenessProbe::new();
            probe.expect_is_reachable().never();

            let result = service(searched_message(&[], text), probe)
                .learn_more(&learn_more_request())
                .await;
            assert!(matches!(result, Err(AppError::NoValidResources)), "{}", text);
        }
    }

    #[actix_web::test]
    async fn result_is_truncated_to_the_configured_maximum() {
        let urls = [
            "https://a.com/1",
            "https://a.com/2",
            "https://a.com/3",
            "https://a.com/4",
            "https://a.com/5",
        ];
        let text = resources_json(&urls);

        let response = service(searched_message(&urls, &text), MockLivenessProbe::new())
            .learn_more(&learn_more_request())
            .await
            .unwrap();

        let returned: Vec<&str> = response.resources.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(returned, vec!["https://a.com/1", "https://a.com/2", "https://a.com/3"]);
    }

    #[test]
    fn malformed_resource_entries_are_discarded() {
        let raw = vec![
            serde_json::json!({ "title": "ok", "url": "https://a.com", "type": "docs" }),
            serde_json::json!({ "title": "bad type", "url": "https://b.com", "type": "podcast" }),
            serde_json::json!({ "title": "", "url": "https://c.com", "type": "video" }),
            serde_json::json!("just a string"),
        ];

        let resources = trusted_resources(raw);
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].url, "https://a.com");
    }
}
