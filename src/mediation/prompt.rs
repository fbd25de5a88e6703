//! Prompt construction for the value-translation mediator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tone of the constructive rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[serde(alias = "diplomatic")]
    #[value(alias = "diplomatic")]
    Gentle,
    Direct,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Gentle => "gentle",
            Tone::Direct => "direct",
        }
    }

    /// Phrase interpolated into the instruction.
    pub fn phrase(&self) -> &'static str {
        match self {
            Tone::Gentle => "calm, empathetic, bridge-building",
            Tone::Direct => "direct, concise, firm but respectful",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gentle" | "diplomatic" => Ok(Tone::Gentle),
            "direct" => Ok(Tone::Direct),
            other => Err(format!("Unknown tone '{}' (expected gentle or direct)", other)),
        }
    }
}

/// Who the rewrite is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Citizen,
    Official,
}

impl Audience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::Citizen => "citizen",
            Audience::Official => "official",
        }
    }

    /// Phrase interpolated into the instruction.
    pub fn phrase(&self) -> &'static str {
        match self {
            Audience::Citizen => "general public, community members",
            Audience::Official => "government officials, policy professionals",
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Audience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "citizen" => Ok(Audience::Citizen),
            "official" => Ok(Audience::Official),
            other => Err(format!(
                "Unknown audience '{}' (expected citizen or official)",
                other
            )),
        }
    }
}

/// Input to the mediator prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptConfiguration {
    pub tone: Tone,
    pub audience: Audience,
    #[serde(default)]
    pub participant_profile: Option<String>,
}

impl PromptConfiguration {
    pub fn new(tone: Tone, audience: Audience) -> Self {
        Self {
            tone,
            audience,
            participant_profile: None,
        }
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.participant_profile = Some(profile.into());
        self
    }
}

/// Text used when no participant profile is supplied.
pub const PROFILE_NOT_PROVIDED: &str = "not provided";

/// Build the mediator system prompt.
///
/// Three parts (pre-input context, in-discussion behaviour, consensus
/// drafting) followed by the JSON object the model is asked to emit. The
/// schema is advisory; nothing downstream enforces it.
pub fn build_mediator_prompt(config: &PromptConfiguration) -> String {
    let tone = config.tone.phrase();
    let audience = config.audience.phrase();
    let profile = config
        .participant_profile
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(PROFILE_NOT_PROVIDED);

    format!(
        r#"You are an AI mediator that buffers conflict and makes statements policy-ready.

Pre-input context:
- Participant profile: {profile}
- Your job: reduce distortion by using the above context when summarizing.

During discussion:
- Tag sentiment and value signals (e.g., fairness, efficiency, safety).
- Quietly flag obvious fallacies (ad hominem, strawman, appeal to fear).
- Offer a constructive rewrite in {tone} tone for {audience}.

Consensus drafting:
- Produce a consensus stub that captures common ground.
- Explicitly include a minority note if present.

Output JSON only:
{{
  "sentiment": "<concerned/neutral/positive/etc>",
  "value_tags": ["fairness","efficiency","safety"],
  "fallacy": "<optional: ad_hominem/strawman/fear/none>",
  "rewrite": "<one-line constructive rewrite>",
  "consensus_stub": "<shared ground, 1 sentence>",
  "minority_note": "<acknowledge dissent if any, else 'none'>"
}}"#
    )
    .trim()
    .to_string()
}
