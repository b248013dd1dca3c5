use crate::models::Achievement;
use crate::schema::{achievements, user_achievements};
use derive_builder::Builder;
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Builder, Queryable, Identifiable, Clone)]
#[builder(
  derive(AsChangeset, Insertable),
  pattern = "owned",
  name = "UserAchievementChangeset"
)]
#[builder_struct_attr(diesel(table_name = user_achievements))]
pub struct UserAchievement {
  pub id: Uuid,
  pub user_id: Uuid,
  pub achievement_id: Uuid,
  pub earned_at: chrono::NaiveDateTime,
}

impl UserAchievement {
  /// Returns `None` when the user already holds the achievement.
  pub fn grant(
    user_id: &Uuid,
    achievement_id: &Uuid,
    conn: &mut PgConnection,
  ) -> QueryResult<Option<UserAchievement>> {
    diesel::insert_into(user_achievements::table)
      .values((
        user_achievements::user_id.eq(*user_id),
        user_achievements::achievement_id.eq(*achievement_id),
      ))
      .on_conflict_do_nothing()
      .get_result(conn)
      .optional()
  }

  pub fn earned_by_user(
    user_id: &Uuid,
    conn: &mut PgConnection,
  ) -> QueryResult<Vec<(UserAchievement, Achievement)>> {
    user_achievements::table
      .inner_join(achievements::table)
      .filter(user_achievements::user_id.eq(*user_id))
      .order(user_achievements::earned_at.desc())
      .load(conn)
  }
}
