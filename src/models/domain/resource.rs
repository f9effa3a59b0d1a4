use serde::{Deserialize, Serialize};
use validator::Validate;

/// A supplementary learning resource suggested by the model.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct Resource {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    #[validate(length(min = 1, max = 2048))]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Docs,
    Tutorial,
    Video,
    Article,
    Practice,
}

/// Outcome of checking one resource; consumed immediately to filter the list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub resource: Resource,
    pub valid: bool,
}

/// A validated learn-more request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LearnMoreRequest {
    pub topic: String,
    pub category: String,
    pub subcategory: String,
    pub difficulty: String,
}
