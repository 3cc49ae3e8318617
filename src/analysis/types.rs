use serde::{Deserialize, Deserializer, Serialize};

/// How soon the user should get care. Drives the color of the banner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Urgency {
    SelfCare,
    SeeDoctorSoon,
    Urgent,
}

impl Urgency {
    pub fn headline(&self) -> &'static str {
        match self {
            Urgency::SelfCare => "Self-care is likely appropriate",
            Urgency::SeeDoctorSoon => "See a doctor soon",
            Urgency::Urgent => "Seek urgent care now",
        }
    }
}

/// Result of analyzing a free-text symptom description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SymptomAnalysis {
    pub diagnoses: Vec<String>,
    pub urgency: Urgency,
    pub next_steps: String,
    pub explanation: String,
    #[serde(
        default,
        deserialize_with = "deserialize_confidence",
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence: Option<u8>,
}

/// Rich photo assessment the result screen knows how to render.
///
/// The image call does not produce this shape; it returns
/// [`ImageDescriptionAnalysis`]. Kept so both shapes stay validated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisionAnalysis {
    pub condition: String,
    pub description: String,
    pub urgency: Urgency,
    pub recommendations: Vec<String>,
    pub when_to_seek_care: String,
    #[serde(
        default,
        deserialize_with = "deserialize_confidence",
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence: Option<u8>,
}

/// Neutral, non-diagnostic description of a photo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageDescriptionAnalysis {
    pub features: String,
    pub possible_categories: Vec<String>,
    pub general_advice: String,
}

/// Post-deserialization checks serde cannot express.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("`{}` is empty", field));
    }
    Ok(())
}

fn require_entries(field: &str, values: &[String]) -> Result<(), String> {
    if values.is_empty() {
        return Err(format!("`{}` is empty", field));
    }
    if values.iter().any(|v| v.trim().is_empty()) {
        return Err(format!("`{}` contains an empty entry", field));
    }
    Ok(())
}

impl Validate for SymptomAnalysis {
    fn validate(&self) -> Result<(), String> {
        require_entries("diagnoses", &self.diagnoses)?;
        require_text("nextSteps", &self.next_steps)?;
        require_text("explanation", &self.explanation)
    }
}

impl Validate for VisionAnalysis {
    fn validate(&self) -> Result<(), String> {
        require_text("condition", &self.condition)?;
        require_text("description", &self.description)?;
        require_entries("recommendations", &self.recommendations)?;
        require_text("whenToSeekCare", &self.when_to_seek_care)
    }
}

impl Validate for ImageDescriptionAnalysis {
    fn validate(&self) -> Result<(), String> {
        require_text("features", &self.features)?;
        require_text("general_advice", &self.general_advice)
    }
}

/// Confidence is advisory: an integer in 0..=100 is kept as-is, anything
/// else is dropped instead of failing the whole analysis.
fn deserialize_confidence<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let confidence = value
        .as_u64()
        .filter(|c| *c <= 100)
        .and_then(|c| u8::try_from(c).ok());
    if confidence.is_none() && !value.is_null() {
        log::warn!("Ignoring unusable confidence value {}", value);
    }
    Ok(confidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn symptom_json() -> serde_json::Value {
        json!({
            "diagnoses": ["Tension headache", "Migraine"],
            "urgency": "see-doctor-soon",
            "nextSteps": "Book an appointment this week.",
            "explanation": "Recurring headaches with light sensitivity.",
            "confidence": 62
        })
    }

    #[test]
    fn urgency_uses_kebab_case_on_the_wire() {
        assert_eq!(serde_json::to_value(Urgency::SelfCare).unwrap(), json!("self-care"));
        assert_eq!(
            serde_json::from_value::<Urgency>(json!("see-doctor-soon")).unwrap(),
            Urgency::SeeDoctorSoon
        );
        assert!(serde_json::from_value::<Urgency>(json!("emergency")).is_err());
    }

    #[test]
    fn symptom_analysis_reads_camel_case_keys() {
        let analysis: SymptomAnalysis = serde_json::from_value(symptom_json()).unwrap();
        assert_eq!(analysis.diagnoses, vec!["Tension headache", "Migraine"]);
        assert_eq!(analysis.next_steps, "Book an appointment this week.");
        assert_eq!(analysis.confidence, Some(62));
        assert!(analysis.validate().is_ok());
    }

    #[test]
    fn confidence_is_optional_and_never_fatal() {
        let mut value = symptom_json();
        value.as_object_mut().unwrap().remove("confidence");
        let analysis: SymptomAnalysis = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(analysis.confidence, None);
        assert!(analysis.validate().is_ok());

        for unusable in [json!("80"), json!(72.6), json!(140), json!(-1), json!(null)] {
            value["confidence"] = unusable;
            let analysis: SymptomAnalysis = serde_json::from_value(value.clone()).unwrap();
            assert_eq!(analysis.confidence, None);
        }
    }

    #[test]
    fn missing_confidence_is_not_serialized() {
        let mut value = symptom_json();
        value.as_object_mut().unwrap().remove("confidence");
        let analysis: SymptomAnalysis = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&analysis).unwrap(), value);
    }

    #[test]
    fn symptom_validation_rejects_blank_fields() {
        let mut analysis: SymptomAnalysis = serde_json::from_value(symptom_json()).unwrap();
        analysis.diagnoses.clear();
        assert_eq!(analysis.validate().unwrap_err(), "`diagnoses` is empty");

        let mut analysis: SymptomAnalysis = serde_json::from_value(symptom_json()).unwrap();
        analysis.explanation = "  ".to_string();
        assert_eq!(analysis.validate().unwrap_err(), "`explanation` is empty");
    }

    #[test]
    fn vision_analysis_validates_its_own_fields() {
        let vision: VisionAnalysis = serde_json::from_value(json!({
            "condition": "Minor abrasion",
            "description": "Superficial scrape on the forearm.",
            "urgency": "self-care",
            "recommendations": ["Clean with water", "Cover with a bandage"],
            "whenToSeekCare": "If redness spreads or fever develops.",
            "confidence": 70
        }))
        .unwrap();
        assert!(vision.validate().is_ok());

        let empty = VisionAnalysis {
            recommendations: vec![],
            ..vision
        };
        assert_eq!(empty.validate().unwrap_err(), "`recommendations` is empty");
    }

    #[test]
    fn image_description_allows_empty_category_list() {
        let description: ImageDescriptionAnalysis = serde_json::from_value(json!({
            "features": "Small raised area",
            "possible_categories": [],
            "general_advice": "Monitor for changes."
        }))
        .unwrap();
        assert!(description.validate().is_ok());
    }
}
