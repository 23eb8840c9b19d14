//! Boundary adapters that turn free text into weather labels.

pub mod keyword_classifier;
pub mod keywords;
pub mod vision_reply;

pub use keyword_classifier::KeywordClassifier;
pub use keywords::match_keywords;
pub use vision_reply::parse_vision_reply;
