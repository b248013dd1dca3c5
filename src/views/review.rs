use super::PublicUserView;
use crate::models::{GameReview, User};
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize, JsonSchema)]
#[serde(rename = "Review")]
pub struct ReviewView {
  pub id: Uuid,
  pub game_id: Uuid,
  pub rating: i16,
  pub body: String,
  pub author: Option<PublicUserView>,
  pub created_at: chrono::NaiveDateTime,
  pub updated_at: chrono::NaiveDateTime,
}

impl ReviewView {
  pub fn new(review: GameReview, author: Option<User>) -> Self {
    ReviewView {
      id: review.id,
      game_id: review.game_id,
      rating: review.rating,
      body: review.body,
      author: author.map(Into::into),
      created_at: review.created_at,
      updated_at: review.updated_at,
    }
  }
}

impl From<GameReview> for ReviewView {
  fn from(review: GameReview) -> Self {
    ReviewView::new(review, None)
  }
}
