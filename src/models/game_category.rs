use crate::schema::game_categories;
use derive_builder::Builder;
use diesel::dsl::{Find, FindBy};
use diesel::helper_types::{Asc, Order};
use diesel::prelude::*;
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

#[derive(Builder, Queryable, Identifiable, Clone, Serialize, JsonSchema)]
#[builder(
  derive(AsChangeset, Insertable),
  pattern = "owned",
  name = "GameCategoryChangeset"
)]
#[builder_struct_attr(diesel(table_name = game_categories))]
#[diesel(table_name = game_categories)]
pub struct GameCategory {
  pub id: Uuid,
  pub name: String,
  pub slug: String,
  pub description: String,
  pub icon: Option<String>,
  pub position: i32,
  pub created_at: chrono::NaiveDateTime,
  pub updated_at: chrono::NaiveDateTime,
}

impl GameCategory {
  pub fn find_by_id(id: &Uuid) -> Find<game_categories::table, Uuid> {
    game_categories::table.find(*id)
  }

  pub fn find_by_slug(slug: &str) -> FindBy<game_categories::table, game_categories::slug, String> {
    game_categories::table.filter(game_categories::slug.eq(slug.to_string()))
  }

  pub fn ordered() -> Order<
    game_categories::table,
    (Asc<game_categories::position>, Asc<game_categories::name>),
  > {
    game_categories::table.order((
      game_categories::position.asc(),
      game_categories::name.asc(),
    ))
  }
}
