//! Prompt construction for the plan and speech capabilities.

use fitcoach_core::UserProfile;

/// Tone instruction prepended to every narration request.
pub const SPEECH_PREAMBLE: &str = "Say with a friendly and encouraging tone: ";

/// Fixed user turn for plan requests; the profile rides in the system
/// instruction.
pub const PLAN_USER_TURN: &str = "Generate the fitness plan in strict JSON format now.";

/// Builds the plan system prompt from the user profile.
pub fn plan_system_prompt(profile: &UserProfile) -> String {
    format!(
        "You are an AI fitness coach. Create a valid JSON fitness plan.\n\n\
         User: {name}, {age}y, {gender}, {height}cm, {weight}kg\n\
         Goal: {goal} | Level: {level} | Location: {location}\n\
         Diet: {diet} | Medical: {medical}\n\n\
         IMPORTANT: Return ONLY valid JSON. No markdown, no explanations, no code blocks.\n\n\
         Requirements:\n\
         - 7 days: each with 4-5 exercises (name, sets, reps, rest time)\n\
         - 7 days: meals with breakfast, lunch, dinner, snacks (name and calories only)\n\
         - 5 practical lifestyle tips\n\
         - 1 motivational quote\n\n\
         Keep all text short and professional. Ensure all strings are properly escaped.",
        name = profile.name,
        age = profile.age,
        gender = profile.gender,
        height = profile.height_cm,
        weight = profile.weight_kg,
        goal = profile.fitness_goal,
        level = profile.fitness_level,
        location = profile.workout_location,
        diet = profile.dietary_preference,
        medical = profile.medical_history,
    )
}
