pub mod prompts;

/// Upper bound on learn-more resources returned to the browser.
pub const MAX_LEARN_MORE_RESOURCES: usize = 3;

pub const DEFAULT_LIVENESS_TIMEOUT_MS: u64 = 3000;
pub const DEFAULT_FIXTURE_DELAY_MS: u64 = 1000;

/// Upper bound on `numQuestions` accepted by the generation endpoint.
pub const MAX_QUESTIONS: u32 = 20;

pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-haiku-4-5-20251001";
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";

pub const WEB_SEARCH_TOOL_NAME: &str = "web_search";
pub const WEB_SEARCH_TOOL_TYPE: &str = "web_search_20250305";

pub const SAMPLE_QUIZ_RESPONSE: &str = include_str!("../../data/sample-response.json");
