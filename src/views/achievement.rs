use crate::data_types::AchievementCriteria;
use crate::models::{Achievement, UserAchievement};
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize, JsonSchema)]
#[serde(rename = "Achievement")]
pub struct AchievementView {
  pub id: Uuid,
  pub name: String,
  pub description: String,
  pub icon: Option<String>,
  pub criteria: AchievementCriteria,
  pub threshold: i64,
  pub game_id: Option<Uuid>,
  pub points: i64,
  pub active: bool,
}

impl From<Achievement> for AchievementView {
  fn from(achievement: Achievement) -> Self {
    AchievementView {
      id: achievement.id,
      name: achievement.name,
      description: achievement.description,
      icon: achievement.icon,
      criteria: achievement.criteria,
      threshold: achievement.threshold,
      game_id: achievement.game_id,
      points: achievement.points,
      active: achievement.active,
    }
  }
}

#[derive(Serialize, JsonSchema)]
#[serde(rename = "EarnedAchievement")]
pub struct EarnedAchievementView {
  pub achievement: AchievementView,
  pub earned_at: chrono::NaiveDateTime,
}

impl From<(UserAchievement, Achievement)> for EarnedAchievementView {
  fn from((earned, achievement): (UserAchievement, Achievement)) -> Self {
    EarnedAchievementView {
      achievement: achievement.into(),
      earned_at: earned.earned_at,
    }
  }
}
