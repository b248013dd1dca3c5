use crate::schema::user_points;
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Identifiable, Clone, Debug)]
#[diesel(table_name = user_points)]
pub struct UserPoints {
  pub id: Uuid,
  pub user_id: Uuid,
  pub available_points: i64,
  pub total_earned: i64,
  pub total_spent: i64,
  pub created_at: chrono::NaiveDateTime,
  pub updated_at: chrono::NaiveDateTime,
}

impl UserPoints {
  pub fn find_for_user(user_id: &Uuid, conn: &mut PgConnection) -> QueryResult<Option<UserPoints>> {
    user_points::table
      .filter(user_points::user_id.eq(*user_id))
      .first(conn)
      .optional()
  }

  /// Locks the user's row until the surrounding transaction ends, creating it when missing.
  pub fn lock_for_user(user_id: &Uuid, conn: &mut PgConnection) -> QueryResult<UserPoints> {
    diesel::insert_into(user_points::table)
      .values(user_points::user_id.eq(*user_id))
      .on_conflict(user_points::user_id)
      .do_nothing()
      .execute(conn)?;

    user_points::table
      .filter(user_points::user_id.eq(*user_id))
      .for_update()
      .get_result(conn)
  }

  pub fn store(
    &self,
    available_points: i64,
    total_earned: i64,
    total_spent: i64,
    conn: &mut PgConnection,
  ) -> QueryResult<UserPoints> {
    diesel::update(self)
      .set((
        user_points::available_points.eq(available_points),
        user_points::total_earned.eq(total_earned),
        user_points::total_spent.eq(total_spent),
      ))
      .get_result(conn)
  }
}
