pub mod anthropic_client;
pub mod learn_more_service;
pub mod liveness;
pub mod model_output;
pub mod quiz_generator;
pub mod quiz_service;
pub mod resource_validator;
pub mod url_extraction;
