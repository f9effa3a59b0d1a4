use crate::models::domain::LearnMoreRequest;

pub const LEARN_MORE_SYSTEM_PROMPT: &str = "You are a learning assistant for a technical quiz application. You MUST call the web_search tool before responding and you must never recommend URLs recalled from training data. Only recommend resources you found through web search. Respond with a single valid JSON object and nothing else.";

/// Builds the user turn asking for a topic summary and searched resources.
pub fn learn_more_user_prompt(request: &LearnMoreRequest, current_year: i32) -> String {
    let LearnMoreRequest {
        topic,
        category,
        subcategory,
        difficulty,
    } = request;

    format!(
        "Topic: {topic}
Category: {category}
Subcategory: {subcategory}
Difficulty Level: {difficulty}

## TASK

You MUST use web_search to find current, high-quality learning resources about this topic.

Search for:
- Official documentation for {subcategory} covering {topic}
- A well regarded tutorial or guide about {topic}

## REQUIREMENTS

- Resources must suit {difficulty} level learners
- Prefer official documentation and reputable sites
- Prefer content published between {from_year} and {current_year} where applicable

## OUTPUT FORMAT

Return only this JSON object, with no prose and no markdown:
{{
  \"summary\": \"a one to two paragraph explanation of {topic}\",
  \"resources\": [
    {{
      \"title\": \"resource title\",
      \"url\": \"complete https:// URL\",
      \"description\": \"one sentence describing what the resource offers\",
      \"type\": \"docs\"
    }}
  ]
}}

Include 2-3 resources. The type must be one of \"docs\", \"tutorial\", \"video\", \"article\" or \"practice\". Every URL must be complete and must come from your search results.",
        from_year = current_year - 2,
    )
}
