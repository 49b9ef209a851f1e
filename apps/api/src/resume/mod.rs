// Resume ingestion: document text extraction, contact regexes, structured LLM
// extraction, and the parse endpoint.

pub mod contact;
pub mod handlers;
pub mod parser;
pub mod prompts;
pub mod text_extract;
