use core::fmt;

use serde::{Deserialize, Serialize};

/// One of the three generation tasks, each with its own provider list
/// and payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Schema-constrained JSON fitness plan generation.
    Plan,
    /// Text-to-speech synthesis returning raw PCM audio.
    Speech,
    /// Image synthesis returning base64-encoded image bytes.
    Image,
}

impl fmt::Display for Capability {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Plan => "plan generation",
            Self::Speech => "speech synthesis",
            Self::Image => "image generation",
        };
        formatter.write_str(name)
    }
}

/// User profile collected by the form wizard; the immutable payload of
/// a plan generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name of the user.
    pub name: String,
    /// Age in years.
    pub age: u8,
    /// Self-described gender.
    pub gender: String,
    /// Height in centimeters.
    pub height_cm: u16,
    /// Weight in kilograms.
    pub weight_kg: u16,
    /// Primary fitness goal (e.g. "Weight Loss", "Muscle Gain").
    pub fitness_goal: String,
    /// Experience level (e.g. "Beginner", "Intermediate").
    pub fitness_level: String,
    /// Where workouts take place (e.g. "Home", "Gym").
    pub workout_location: String,
    /// Dietary preference (e.g. "Vegetarian", "No Preference").
    pub dietary_preference: String,
    /// Free-text medical history or "None".
    #[serde(default)]
    pub medical_history: String,
}

/// A complete generated plan. Read-only display data: replaced
/// wholesale on regeneration, discarded wholesale on clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Workout section of the plan.
    pub workout_plan: WorkoutPlan,
    /// Diet section of the plan.
    pub diet_plan: DietPlan,
    /// Lifestyle tips and motivation.
    pub ai_tips: AiTips,
}

/// Workout section: one entry per day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlan {
    /// Ordered list of daily routines.
    pub daily_routine: Vec<WorkoutDay>,
}

/// A single day's workout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutDay {
    /// Day label (e.g. "Monday").
    pub day: String,
    /// Training focus for the day (e.g. "Upper Body").
    pub focus: String,
    /// Ordered list of exercises.
    pub exercises: Vec<Exercise>,
}

/// One exercise within a workout day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise name.
    pub name: String,
    /// Set count, as produced by the model (e.g. "3").
    pub sets: String,
    /// Rep specification (e.g. "8-12").
    pub reps: String,
    /// Rest duration between sets (e.g. "60s").
    pub rest: String,
}

/// Diet section: one entry per day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietPlan {
    /// Ordered list of daily meal plans.
    pub meal_plan: Vec<MealDay>,
}

/// A single day's meals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealDay {
    /// Day label (e.g. "Monday").
    pub day: String,
    /// The four named meal slots for the day.
    pub meals: DailyMeals,
}

/// The four required meal slots of a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyMeals {
    /// Morning meal.
    pub breakfast: Meal,
    /// Midday meal.
    pub lunch: Meal,
    /// Evening meal.
    pub dinner: Meal,
    /// Snacks for the day.
    pub snacks: Meal,
}

/// A named meal with its calorie count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    /// Meal name.
    pub name: String,
    /// Approximate calorie count.
    pub calories: f64,
}

/// Lifestyle tips section of the plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiTips {
    /// Practical lifestyle tips.
    pub lifestyle_tips: Vec<String>,
    /// One motivational quote.
    pub motivation: String,
}
