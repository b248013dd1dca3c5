use super::{AchievementView, PublicUserView};
use crate::leaderboard::Standing;
use crate::models::{GameScore, User};
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize, JsonSchema)]
#[serde(rename = "Score")]
pub struct ScoreView {
  pub id: Uuid,
  pub game_id: Uuid,
  pub score: i64,
  pub created_at: chrono::NaiveDateTime,
}

impl From<GameScore> for ScoreView {
  fn from(score: GameScore) -> Self {
    ScoreView {
      id: score.id,
      game_id: score.game_id,
      score: score.score,
      created_at: score.created_at,
    }
  }
}

#[derive(Serialize, JsonSchema)]
#[serde(rename = "ScoreSubmission")]
pub struct ScoreSubmissionView {
  pub score: ScoreView,
  pub rank: Option<i64>,
  pub achievements: Vec<AchievementView>,
}

#[derive(Serialize, JsonSchema)]
#[serde(rename = "BestScore")]
pub struct BestScoreView {
  pub game_id: Uuid,
  pub game_title: String,
  pub game_slug: String,
  pub score: i64,
}

#[derive(Serialize, JsonSchema)]
#[serde(rename = "LeaderboardEntry")]
pub struct LeaderboardEntryView {
  pub rank: i64,
  pub score: i64,
  pub user: Option<PublicUserView>,
}

#[derive(Serialize, JsonSchema)]
#[serde(rename = "Leaderboard")]
pub struct LeaderboardView {
  pub game_id: Uuid,
  pub entries: Vec<LeaderboardEntryView>,
}

impl LeaderboardView {
  pub fn new(game_id: Uuid, standings: Vec<Standing>, users: &[User]) -> Self {
    let entries = standings
      .into_iter()
      .map(|standing| LeaderboardEntryView {
        rank: standing.rank,
        score: standing.score,
        user: users
          .iter()
          .find(|user| user.id == standing.user_id)
          .map(PublicUserView::from),
      })
      .collect();

    LeaderboardView { game_id, entries }
  }
}
