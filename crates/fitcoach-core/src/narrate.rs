//! Builds the narration text the speech capability reads aloud.

use crate::types::{AiTips, DietPlan, MealDay, WorkoutDay, WorkoutPlan};

/// Narration for a single workout day: focus plus each exercise with
/// its set and rep counts.
pub fn workout_day(day: &WorkoutDay) -> String {
    let exercises = day
        .exercises
        .iter()
        .map(|exercise| {
            format!(
                "{}: {} sets of {}",
                exercise.name, exercise.sets, exercise.reps
            )
        })
        .collect::<Vec<_>>()
        .join(". ");
    format!("Workout for {}: {}. {exercises}", day.day, day.focus)
}

/// Narration for a single diet day: each meal slot with its dish.
pub fn meal_day(day: &MealDay) -> String {
    let meals = &day.meals;
    format!(
        "Diet for {}: breakfast: {}. lunch: {}. dinner: {}. snacks: {}.",
        day.day, meals.breakfast.name, meals.lunch.name, meals.dinner.name, meals.snacks.name
    )
}

/// Narration for the whole workout section, one sentence per day.
pub fn full_workout(plan: &WorkoutPlan) -> String {
    let mut text = String::from("Here is your workout plan.");
    for day in &plan.daily_routine {
        let names = day
            .exercises
            .iter()
            .map(|exercise| exercise.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        text.push_str(&format!(" {}, {}: {names}.", day.day, day.focus));
    }
    text
}

/// Narration for the whole diet section, one sentence per day.
pub fn full_diet(plan: &DietPlan) -> String {
    let mut text = String::from("Here is your diet plan.");
    for day in &plan.meal_plan {
        let meals = &day.meals;
        text.push_str(&format!(
            " {}: breakfast: {}, lunch: {}, dinner: {}, snacks: {}.",
            day.day, meals.breakfast.name, meals.lunch.name, meals.dinner.name, meals.snacks.name
        ));
    }
    text
}

/// Narration for the tips section, ending with the motivation line.
pub fn tips(tips: &AiTips) -> String {
    format!(
        "Here are your tips. {}. And for motivation: {}",
        tips.lifestyle_tips.join(". "),
        tips.motivation
    )
}
