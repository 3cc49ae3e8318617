//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use std::path::Path;

use crate::analysis::{
    Assessment, ClientMode, ImageDescriptionAnalysis, SymptomAnalysis, Urgency,
};
use crate::config::AppConfig;

const BAR_WIDTH: usize = 20;

fn urgency_banner(urgency: Urgency) -> ColoredString {
    let text = format!(" {} ", urgency.headline().to_uppercase());
    match urgency {
        Urgency::SelfCare => text.black().on_green().bold(),
        Urgency::SeeDoctorSoon => text.black().on_yellow().bold(),
        Urgency::Urgent => text.white().on_red().bold(),
    }
}

/// `[########------------] 40%`
pub fn confidence_bar(confidence: u8) -> String {
    let filled = (confidence.min(100) as usize * BAR_WIDTH + 50) / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        confidence
    )
}

fn print_canned_notice(mode: ClientMode) {
    if mode == ClientMode::Canned {
        println!(
            "{}",
            "Demo mode: no API key configured, showing a sample result.".dimmed()
        );
        println!();
    }
}

pub fn print_symptom_assessment(assessment: &Assessment<SymptomAnalysis>) {
    let analysis = &assessment.result;
    print_canned_notice(assessment.mode);

    println!("{}", urgency_banner(analysis.urgency));
    println!();

    println!("{}", "Possible conditions".bold());
    for (i, diagnosis) in analysis.diagnoses.iter().enumerate() {
        println!("  {}. {}", i + 1, diagnosis);
    }
    println!();

    println!("{}", "Next steps".bold());
    println!("  {}", analysis.next_steps);
    println!();

    println!("{}", "Why".bold());
    println!("  {}", analysis.explanation);
    println!();

    match analysis.confidence {
        Some(confidence) => println!("{}: {}", "Confidence".bold(), confidence_bar(confidence)),
        None => println!("{}: {}", "Confidence".bold(), "not reported".dimmed()),
    }
    print_disclaimer();
}

pub fn print_image_assessment(assessment: &Assessment<ImageDescriptionAnalysis>) {
    let analysis = &assessment.result;
    print_canned_notice(assessment.mode);

    println!("{}", "What is visible".bold());
    println!("  {}", analysis.features);
    println!();

    if !analysis.possible_categories.is_empty() {
        println!("{}", "Possible categories".bold());
        for category in &analysis.possible_categories {
            println!("  - {}", category);
        }
        println!();
    }

    println!("{}", "General advice".bold());
    println!("  {}", analysis.general_advice);
    print_disclaimer();
}

pub fn print_config(config_dir: &Path, config: &AppConfig, mode: ClientMode) {
    let mode_label = match mode {
        ClientMode::Live => "live".green(),
        ClientMode::Canned => "canned (no API key)".yellow(),
    };

    println!("{}: {}", "Config".bold(), config_dir.join("config.json").display());
    println!("{}: {}", "Mode".bold(), mode_label);
    println!("{}: {}", "Model".bold(), config.openai_model);
    println!("{}: {}", "Endpoint".bold(), config.api_base_url);
}

fn print_disclaimer() {
    println!();
    println!(
        "{}",
        "This is not a medical diagnosis. If you feel very unwell, contact emergency services."
            .dimmed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_bar_scales_to_width() {
        assert_eq!(confidence_bar(0), format!("[{}] 0%", "-".repeat(20)));
        assert_eq!(confidence_bar(100), format!("[{}] 100%", "#".repeat(20)));
        assert_eq!(confidence_bar(75), format!("[{}{}] 75%", "#".repeat(15), "-".repeat(5)));
    }
}
