//! Article generation against Google Gemini.
//!
//! [`GeminiClient`] implements the desk's `Generator` seam.

pub mod client;
pub mod parse;
pub mod prompt;

pub use client::GeminiClient;
pub use parse::parse_comparison;
