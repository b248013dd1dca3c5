use super::{AchievementView, CategoryView, RatingSummary};
use crate::data_types::GameSource;
use crate::models::{Game, GameCategory};
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize, JsonSchema)]
#[serde(rename = "Game")]
pub struct GameView {
  pub id: Uuid,
  pub title: String,
  pub slug: String,
  pub description: String,
  pub category_id: Option<Uuid>,
  pub thumbnail_url: Option<String>,
  pub embed_url: String,
  pub source: GameSource,
  pub featured: bool,
  pub published: bool,
  pub play_count: i64,
  pub created_at: chrono::NaiveDateTime,
}

impl From<Game> for GameView {
  fn from(game: Game) -> Self {
    GameView {
      id: game.id,
      title: game.title,
      slug: game.slug,
      description: game.description,
      category_id: game.category_id,
      thumbnail_url: game.thumbnail_url,
      embed_url: game.embed_url,
      source: game.source,
      featured: game.featured,
      published: game.published,
      play_count: game.play_count,
      created_at: game.created_at,
    }
  }
}

#[derive(Serialize, JsonSchema)]
#[serde(rename = "GameDetail")]
pub struct GameDetailView {
  #[serde(flatten)]
  pub game: GameView,
  pub instructions: String,
  pub category: Option<CategoryView>,
  pub rating: RatingSummary,
}

impl GameDetailView {
  pub fn new(game: Game, category: Option<GameCategory>, rating: RatingSummary) -> Self {
    let instructions = game.instructions.clone();

    GameDetailView {
      game: game.into(),
      instructions,
      category: category.map(Into::into),
      rating,
    }
  }
}

#[derive(Serialize, JsonSchema)]
#[serde(rename = "Play")]
pub struct PlayView {
  pub play_count: i64,
  pub achievements: Vec<AchievementView>,
}

#[derive(Serialize, JsonSchema)]
#[serde(rename = "ThumbnailUpload")]
pub struct ThumbnailUploadView {
  pub upload_url: String,
  pub thumbnail_url: String,
}
