//! End-to-end mediation of a single statement.

use crate::error::CompletionError;
use crate::llm::client::{CompletionRequest, CompletionResult, CompletionService};

use super::fields::{ExtractedFields, extract_fields};
use super::prompt::{PromptConfiguration, build_mediator_prompt};

/// Result of mediating one statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub completion: CompletionResult,
    /// `None` when the completion held no recoverable JSON object.
    pub fields: Option<ExtractedFields>,
}

/// Build the mediator prompt, request a completion for `statement`, and
/// extract whatever structured fields the model returned.
pub async fn analyze<S: CompletionService + ?Sized>(
    service: &S,
    config: &PromptConfiguration,
    statement: &str,
    credential: Option<String>,
    model: &str,
) -> Result<Analysis, CompletionError> {
    let instruction = build_mediator_prompt(config);

    let mut request = CompletionRequest::new(instruction, statement).with_model(model);
    request.credential = credential;

    let completion = service.complete(request).await?;
    let fields = extract_fields(&completion.text);

    Ok(Analysis { completion, fields })
}

const REPORT_ROWS: [(&str, &str); 6] = [
    ("Sentiment", "sentiment"),
    ("Value tags", "value_tags"),
    ("Fallacy", "fallacy"),
    ("Rewrite", "rewrite"),
    ("Consensus", "consensus_stub"),
    ("Minority note", "minority_note"),
];

/// Render an analysis for the terminal.
///
/// Structured fields when extraction succeeded, the raw completion text otherwise.
pub fn render_report(analysis: &Analysis) -> String {
    let mut out = String::new();

    if analysis.completion.was_mocked {
        out.push_str("[mock] No completion API available; showing sample output.\n\n");
    }

    match &analysis.fields {
        Some(fields) => {
            for (label, key) in REPORT_ROWS {
                out.push_str(&format!("{:<14} {}\n", format!("{label}:"), fields.display(key)));
            }
        }
        None => {
            out.push_str("Raw output:\n");
            out.push_str(&analysis.completion.text);
            out.push('\n');
        }
    }

    out
}
