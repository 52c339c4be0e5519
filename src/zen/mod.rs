//! The "do nothing" meditation app: breathing cycle and generated reflections.

use std::time::Duration;

use serde::Serialize;
use serde_json::json;

use crate::ai::{GenerationOptions, TextGateway};
use crate::models::{Koan, Language};

/// Length of each breathing phase.
pub const PHASE_LENGTH: Duration = Duration::from_secs(4);

const REFLECTION_SYSTEM: &str = "You are a Zen master. Your words are sparse, profound, and focused on the beauty of silence and inactivity.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathState {
    pub phase: BreathPhase,
    /// Circle scale to animate towards
    pub scale: f32,
    /// Time left in the current phase
    pub remaining_ms: u64,
}

impl BreathPhase {
    /// Position in the repeating inhale, hold, exhale cycle after `elapsed`.
    pub fn at(elapsed: Duration) -> BreathState {
        let phase_ms = PHASE_LENGTH.as_millis() as u64;
        let into_cycle = (elapsed.as_millis() as u64) % (phase_ms * 3);
        let (phase, scale) = match into_cycle / phase_ms {
            0 => (BreathPhase::Inhale, 1.5),
            1 => (BreathPhase::Hold, 1.5),
            _ => (BreathPhase::Exhale, 1.0),
        };

        BreathState {
            phase,
            scale,
            remaining_ms: phase_ms - into_cycle % phase_ms,
        }
    }
}

/// Reflection shown when generation fails.
pub fn fallback_koan(language: Language) -> Koan {
    let text = match language {
        Language::Ar => "في السكون، يتحدث كل شيء.",
        Language::En => "In stillness, everything speaks.",
    };
    Koan {
        text: text.to_string(),
        source: "Zen".to_string(),
    }
}

fn reflection_prompt(language: Language) -> &'static str {
    match language {
        Language::Ar => "أعطني حكمة قصيرة جداً أو 'كوان' (Koan) عن السكون والعدم. اجعلها عميقة ومختصرة.",
        Language::En => "Provide a very short Zen koan or a reflection about stillness and 'doing nothing'. Keep it poetic and brief.",
    }
}

/// Ask for a short koan. Any failure, including a reply that does not match
/// the requested shape, yields the fallback.
pub async fn reflection(ai: &TextGateway, language: Language) -> Koan {
    let options = GenerationOptions {
        system_instruction: REFLECTION_SYSTEM,
        temperature: 0.8,
        response_schema: Some(json!({
            "type": "OBJECT",
            "properties": {
                "text": { "type": "STRING" },
                "source": { "type": "STRING" }
            },
            "required": ["text", "source"]
        })),
    };

    let reply = match ai.generate(reflection_prompt(language), &options).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(error = %e, "Reflection request failed, using fallback");
            return fallback_koan(language);
        }
    };

    match serde_json::from_str::<Koan>(&reply) {
        Ok(koan) => koan,
        Err(e) => {
            tracing::warn!(error = %e, "Reflection reply was not a koan, using fallback");
            fallback_koan(language)
        }
    }
}
