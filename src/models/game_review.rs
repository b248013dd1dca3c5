use crate::schema::game_reviews;
use derive_builder::Builder;
use diesel::dsl::{And, Eq, Filter};
use diesel::helper_types::{Desc, Order};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Builder, Queryable, Identifiable, Clone)]
#[builder(
  derive(AsChangeset, Insertable),
  pattern = "owned",
  name = "GameReviewChangeset"
)]
#[builder_struct_attr(diesel(table_name = game_reviews))]
pub struct GameReview {
  pub id: Uuid,
  pub user_id: Uuid,
  pub game_id: Uuid,
  pub rating: i16,
  pub body: String,
  pub created_at: chrono::NaiveDateTime,
  pub updated_at: chrono::NaiveDateTime,
}

#[allow(clippy::type_complexity)]
impl GameReview {
  pub fn find_for_user(
    user_id: &Uuid,
    game_id: &Uuid,
  ) -> Filter<
    game_reviews::table,
    And<Eq<game_reviews::user_id, Uuid>, Eq<game_reviews::game_id, Uuid>>,
  > {
    game_reviews::table.filter(
      game_reviews::user_id
        .eq(*user_id)
        .and(game_reviews::game_id.eq(*game_id)),
    )
  }

  pub fn filter_by_game_id(
    game_id: &Uuid,
  ) -> Order<
    Filter<game_reviews::table, Eq<game_reviews::game_id, Uuid>>,
    Desc<game_reviews::updated_at>,
  > {
    game_reviews::table
      .filter(game_reviews::game_id.eq(*game_id))
      .order(game_reviews::updated_at.desc())
  }

  pub fn ratings_for_game(game_id: &Uuid, conn: &mut PgConnection) -> QueryResult<Vec<i16>> {
    game_reviews::table
      .filter(game_reviews::game_id.eq(*game_id))
      .select(game_reviews::rating)
      .load(conn)
  }

  /// Inserts the review, or replaces rating and body of the existing one.
  pub fn upsert(
    user_id: &Uuid,
    game_id: &Uuid,
    rating: i16,
    body: String,
    conn: &mut PgConnection,
  ) -> QueryResult<GameReview> {
    diesel::insert_into(game_reviews::table)
      .values((
        game_reviews::user_id.eq(*user_id),
        game_reviews::game_id.eq(*game_id),
        game_reviews::rating.eq(rating),
        game_reviews::body.eq(body.clone()),
      ))
      .on_conflict((game_reviews::user_id, game_reviews::game_id))
      .do_update()
      .set((
        game_reviews::rating.eq(rating),
        game_reviews::body.eq(body),
      ))
      .get_result(conn)
  }
}
