use crate::schema::game_scores;
use derive_builder::Builder;
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Builder, Queryable, Identifiable, Clone)]
#[builder(
  derive(AsChangeset, Insertable),
  pattern = "owned",
  name = "GameScoreChangeset"
)]
#[builder_struct_attr(diesel(table_name = game_scores))]
pub struct GameScore {
  pub id: Uuid,
  pub user_id: Uuid,
  pub game_id: Uuid,
  pub score: i64,
  pub created_at: chrono::NaiveDateTime,
}

impl GameScore {
  /// Best score per user for a game, unordered.
  pub fn best_per_user(game_id: &Uuid, conn: &mut PgConnection) -> QueryResult<Vec<(Uuid, i64)>> {
    let rows = game_scores::table
      .filter(game_scores::game_id.eq(*game_id))
      .group_by(game_scores::user_id)
      .select((game_scores::user_id, diesel::dsl::max(game_scores::score)))
      .load::<(Uuid, Option<i64>)>(conn)?;

    Ok(
      rows
        .into_iter()
        .filter_map(|(user_id, best)| best.map(|best| (user_id, best)))
        .collect(),
    )
  }

  /// Best score per game for a user.
  pub fn best_per_game(user_id: &Uuid, conn: &mut PgConnection) -> QueryResult<Vec<(Uuid, i64)>> {
    let rows = game_scores::table
      .filter(game_scores::user_id.eq(*user_id))
      .group_by(game_scores::game_id)
      .select((game_scores::game_id, diesel::dsl::max(game_scores::score)))
      .load::<(Uuid, Option<i64>)>(conn)?;

    Ok(
      rows
        .into_iter()
        .filter_map(|(game_id, best)| best.map(|best| (game_id, best)))
        .collect(),
    )
  }
}
