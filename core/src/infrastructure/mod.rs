pub mod inference;
pub mod llm;
