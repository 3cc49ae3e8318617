//! Fixed results returned when no API key is configured.

use super::types::{ImageDescriptionAnalysis, SymptomAnalysis, Urgency};

pub fn canned_symptom_analysis() -> SymptomAnalysis {
    SymptomAnalysis {
        diagnoses: vec![
            "Common cold".to_string(),
            "Viral upper respiratory infection".to_string(),
            "Seasonal allergies".to_string(),
        ],
        urgency: Urgency::SelfCare,
        next_steps: "Rest, drink plenty of fluids, and consider over-the-counter remedies for \
                     symptom relief. See a doctor if symptoms worsen or last more than 7-10 days."
            .to_string(),
        explanation: "Your symptoms are consistent with a common viral infection, which usually \
                      resolves on its own with rest and supportive care."
            .to_string(),
        confidence: Some(75),
    }
}

pub fn canned_image_analysis() -> ImageDescriptionAnalysis {
    ImageDescriptionAnalysis {
        features: "The image shows an area with visible characteristics such as changes in \
                   color and texture compared to the surrounding region."
            .to_string(),
        possible_categories: vec![
            "Skin discoloration".to_string(),
            "Surface irritation".to_string(),
            "Texture change".to_string(),
        ],
        general_advice: "Keep the area clean and monitor it for changes. Consult a healthcare \
                         professional for a proper evaluation, especially if it grows, bleeds, \
                         or becomes painful."
            .to_string(),
    }
}
