//! Subcommand handlers: load inputs, drive the client, write outputs.

use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result, anyhow};

use fitcoach_client::GenerationClient;
use fitcoach_core::{CoachConfig, Plan, UserProfile, narrate};

use crate::cli::Section;

/// Loads configuration, applying the CLI API key override.
pub fn load_config(path: Option<&Path>, api_key: Option<String>) -> Result<CoachConfig> {
    let mut config = match path {
        Some(path) => CoachConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => CoachConfig::default(),
    };
    if api_key.is_some() {
        config.api_key = api_key;
    }
    Ok(config)
}

/// Generates a plan from a profile TOML file and writes it as JSON.
pub async fn handle_plan(config: CoachConfig, profile: &Path, output: &Path) -> Result<()> {
    let raw = fs::read_to_string(profile)
        .with_context(|| format!("failed to read profile {}", profile.display()))?;
    let profile: UserProfile = toml::de::from_str(&raw).context("invalid profile file")?;

    let client = GenerationClient::new(config)?;
    tracing::info!("generating plan for {}", profile.name);
    let plan = client.generate_plan(&profile).await?;

    fs::write(output, serde_json::to_string_pretty(&plan)?)?;
    tracing::info!("plan written to {}", output.display());
    Ok(())
}

/// Narrates arbitrary text into a WAV file.
pub async fn handle_speak(config: CoachConfig, text: &str, output: &Path) -> Result<()> {
    let client = GenerationClient::new(config)?;
    let clip = client.synthesize_speech(text).await?;
    fs::write(output, clip.wav_bytes())?;
    tracing::info!(
        "{:.1}s of narration written to {}",
        clip.duration_secs(),
        output.display()
    );
    Ok(())
}

/// Narrates a section (or single day) of a saved plan.
pub async fn handle_read_plan(
    config: CoachConfig,
    plan_path: &Path,
    day: Option<&str>,
    section: Section,
    output: &Path,
) -> Result<()> {
    let raw = fs::read_to_string(plan_path)
        .with_context(|| format!("failed to read plan {}", plan_path.display()))?;
    let plan: Plan = serde_json::from_str(&raw).context("invalid plan file")?;

    let text = narration_text(&plan, day, section)?;
    handle_speak(config, &text, output).await
}

/// Generates an illustration and writes the PNG bytes.
pub async fn handle_illustrate(config: CoachConfig, prompt: &str, output: &Path) -> Result<()> {
    let client = GenerationClient::new(config)?;
    let image = client.illustrate(prompt).await?;
    fs::write(output, image.to_bytes()?)?;
    tracing::info!("illustration written to {}", output.display());
    Ok(())
}

/// Builds the narration text for the requested plan slice.
fn narration_text(plan: &Plan, day: Option<&str>, section: Section) -> Result<String> {
    match (section, day) {
        (Section::Workout, Some(day)) => plan
            .workout_plan
            .daily_routine
            .iter()
            .find(|entry| entry.day.eq_ignore_ascii_case(day))
            .map(narrate::workout_day)
            .ok_or_else(|| anyhow!("no workout entry for day {day}")),
        (Section::Workout, None) => Ok(narrate::full_workout(&plan.workout_plan)),
        (Section::Diet, Some(day)) => plan
            .diet_plan
            .meal_plan
            .iter()
            .find(|entry| entry.day.eq_ignore_ascii_case(day))
            .map(narrate::meal_day)
            .ok_or_else(|| anyhow!("no diet entry for day {day}")),
        (Section::Diet, None) => Ok(narrate::full_diet(&plan.diet_plan)),
        (Section::Tips, _) => Ok(narrate::tips(&plan.ai_tips)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitcoach_core::{
        AiTips, DailyMeals, DietPlan, Exercise, Meal, MealDay, WorkoutDay, WorkoutPlan,
    };

    fn sample_plan() -> Plan {
        let meal = |name: &str| Meal {
            name: name.to_owned(),
            calories: 400.0,
        };
        Plan {
            workout_plan: WorkoutPlan {
                daily_routine: vec![WorkoutDay {
                    day: "Monday".to_owned(),
                    focus: "Upper Body".to_owned(),
                    exercises: vec![Exercise {
                        name: "Push Up".to_owned(),
                        sets: "3".to_owned(),
                        reps: "10".to_owned(),
                        rest: "60s".to_owned(),
                    }],
                }],
            },
            diet_plan: DietPlan {
                meal_plan: vec![MealDay {
                    day: "Monday".to_owned(),
                    meals: DailyMeals {
                        breakfast: meal("Oatmeal"),
                        lunch: meal("Salad"),
                        dinner: meal("Fish"),
                        snacks: meal("Nuts"),
                    },
                }],
            },
            ai_tips: AiTips {
                lifestyle_tips: vec!["Hydrate".to_owned()],
                motivation: "Go".to_owned(),
            },
        }
    }

    #[test]
    fn test_narration_text_for_known_day() {
        let text = narration_text(&sample_plan(), Some("monday"), Section::Workout)
            .expect("Known day should narrate");
        assert!(text.starts_with("Workout for Monday"));
    }

    #[test]
    fn test_narration_text_for_unknown_day_fails() {
        let result = narration_text(&sample_plan(), Some("Friday"), Section::Workout);
        assert!(result.is_err());
    }

    #[test]
    fn test_narration_text_tips_ignores_day() {
        let text = narration_text(&sample_plan(), Some("Friday"), Section::Tips)
            .expect("Tips narration should build");
        assert!(text.contains("Hydrate"));
    }

    #[test]
    fn test_load_config_missing_file_fails() {
        let result = load_config(Some(Path::new("/nonexistent/coach.toml")), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_api_key_override() {
        let config =
            load_config(None, Some("override".to_owned())).expect("Default config should load");
        assert_eq!(config.api_key.as_deref(), Some("override"));
    }
}
