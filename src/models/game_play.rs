use crate::schema::game_plays;
use derive_builder::Builder;
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Builder, Queryable, Identifiable, Clone)]
#[builder(
  derive(AsChangeset, Insertable),
  pattern = "owned",
  name = "GamePlayChangeset"
)]
#[builder_struct_attr(diesel(table_name = game_plays))]
pub struct GamePlay {
  pub id: Uuid,
  pub user_id: Uuid,
  pub game_id: Uuid,
  pub created_at: chrono::NaiveDateTime,
}
