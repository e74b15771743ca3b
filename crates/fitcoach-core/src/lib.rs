//! Core types for the fitness-coach generation client.
//!
//! This crate provides the shared data model (user profile, generated
//! plan), the error taxonomy that drives provider fallback, the
//! configuration layer, and narration text builders used by the speech
//! capability.
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        reason = "Allow for tests"
    )
)]

/// Configuration types and loading.
pub mod config;
/// Error types and result definitions.
pub mod error;
/// Narration text builders for the speech capability.
pub mod narrate;
/// Core data types for profiles, plans, and capabilities.
pub mod types;

pub use config::{CoachConfig, GenerationConfig, ModelConfig, RetryConfig};
pub use error::{Error, Result};
pub use types::{
    AiTips, Capability, DailyMeals, DietPlan, Exercise, Meal, MealDay, Plan, UserProfile,
    WorkoutDay, WorkoutPlan,
};
