//! Fixed instructions sent with every analysis request.

pub const SYMPTOM_SYSTEM_PROMPT: &str =
    "You are a cautious medical triage assistant. You are not a doctor and you never give a \
     definitive diagnosis. When you are uncertain, or when symptoms could be serious, you \
     recommend professional medical care. You always answer with a single JSON object and \
     nothing else.";

pub const IMAGE_SYSTEM_PROMPT: &str =
    "You describe photographs in neutral, observational language. You do not diagnose, you \
     do not name diseases with certainty, and you do not give medical advice beyond general \
     guidance to consult a healthcare professional. You always answer with a single JSON object.";

const IMAGE_INSTRUCTIONS: &str = r#"Describe the visible features of this image in neutral terms. Do not diagnose and do not provide medical advice.

Respond with JSON only, using exactly these keys:
{
  "features": "objective description of what is visible (color, shape, size, texture, location)",
  "possible_categories": ["up to 3 short, general, non-diagnostic category labels"],
  "general_advice": "general guidance, including when to consult a healthcare professional"
}"#;

/// Embeds the user's description verbatim.
pub fn symptom_prompt(symptoms: &str) -> String {
    format!(
        r#"A user describes the following symptoms:

"{symptoms}"

Assess them conservatively and respond with JSON only, using exactly these keys:
{{
  "diagnoses": ["up to 3 short names of possible conditions, most likely first"],
  "urgency": "one of: self-care, see-doctor-soon, urgent",
  "nextSteps": "clear, practical next steps for the user",
  "explanation": "brief explanation of the reasoning in plain language",
  "confidence": 0-100 integer
}}

If you are unsure, choose the more cautious urgency and recommend seeing a healthcare professional."#
    )
}

pub fn image_prompt() -> &'static str {
    IMAGE_INSTRUCTIONS
}
