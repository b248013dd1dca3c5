use crate::data_types::AchievementCriteria;
use crate::schema::{achievements, user_achievements};
use derive_builder::Builder;
use diesel::dsl::{Eq, Filter, Find};
use diesel::helper_types::{Asc, Order};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Builder, Queryable, Identifiable, Clone, Debug)]
#[builder(
  derive(AsChangeset, Insertable),
  pattern = "owned",
  name = "AchievementChangeset"
)]
#[builder_struct_attr(diesel(table_name = achievements))]
pub struct Achievement {
  pub id: Uuid,
  pub name: String,
  pub description: String,
  pub icon: Option<String>,
  pub criteria: AchievementCriteria,
  pub threshold: i64,
  pub game_id: Option<Uuid>,
  pub points: i64,
  pub active: bool,
  pub created_at: chrono::NaiveDateTime,
  pub updated_at: chrono::NaiveDateTime,
}

#[allow(clippy::type_complexity)]
impl Achievement {
  pub fn find_by_id(id: &Uuid) -> Find<achievements::table, Uuid> {
    achievements::table.find(*id)
  }

  pub fn filter_active() -> Order<
    Filter<achievements::table, Eq<achievements::active, bool>>,
    Asc<achievements::threshold>,
  > {
    achievements::table
      .filter(achievements::active.eq(true))
      .order(achievements::threshold.asc())
  }

  /// Active achievements of the given criteria the user has not earned yet.
  pub fn unearned_for_user(
    user_id: &Uuid,
    criteria: AchievementCriteria,
    conn: &mut PgConnection,
  ) -> QueryResult<Vec<Achievement>> {
    let earned = user_achievements::table
      .filter(user_achievements::user_id.eq(*user_id))
      .select(user_achievements::achievement_id);

    achievements::table
      .filter(achievements::active.eq(true))
      .filter(achievements::criteria.eq(criteria))
      .filter(achievements::id.ne_all(earned))
      .load(conn)
  }
}
