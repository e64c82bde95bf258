pub mod annotate_service;
pub mod answer_reconciler;
pub mod llm_service;
pub mod prompt_builder;
pub mod warn_writer;

pub use annotate_service::AnnotateService;
pub use answer_reconciler::AnswerReconciler;
pub use llm_service::LlmService;
pub use prompt_builder::PromptBuilder;
pub use warn_writer::WarnWriter;
