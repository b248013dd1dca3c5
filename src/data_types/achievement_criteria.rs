use diesel_derive_enum::DbEnum;
use rocket_okapi::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(DbEnum, Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[ExistingTypePath = "crate::schema::sql_types::AchievementCriteria"]
#[serde(rename_all = "snake_case")]
pub enum AchievementCriteria {
  Plays,
  ScoresSubmitted,
  HighScore,
  ReviewsWritten,
  ChatMessages,
}
