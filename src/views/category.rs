use crate::models::GameCategory;
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize, JsonSchema)]
#[serde(rename = "Category")]
pub struct CategoryView {
  pub id: Uuid,
  pub name: String,
  pub slug: String,
  pub description: String,
  pub icon: Option<String>,
  pub position: i32,
}

impl From<GameCategory> for CategoryView {
  fn from(category: GameCategory) -> Self {
    CategoryView {
      id: category.id,
      name: category.name,
      slug: category.slug,
      description: category.description,
      icon: category.icon,
      position: category.position,
    }
  }
}
