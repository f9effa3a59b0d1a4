pub mod model_message;
pub mod question;
pub mod resource;
pub use model_message::{ContentBlock, ModelMessage};
pub use question::{OptionKey, Question, QuestionType, QuizRequest};
pub use resource::{LearnMoreRequest, Resource, ResourceType, ValidationOutcome};
