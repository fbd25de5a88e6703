//! Mediator prompt, response fields, and the analysis flow tying them together.

pub mod analyze;
pub mod fields;
pub mod prompt;

pub use analyze::{Analysis, analyze, render_report};
pub use fields::{ExtractedFields, PLACEHOLDER, extract_fields};
pub use prompt::{Audience, PromptConfiguration, Tone, build_mediator_prompt};
