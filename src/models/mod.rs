pub mod provider;
pub mod question;
pub mod session;

pub use provider::Provider;
pub use question::{
    question_fingerprint, Choice, ParsedAnswer, Question, QuestionKind,
};
pub use session::ScanSession;
