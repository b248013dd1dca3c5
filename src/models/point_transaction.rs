use crate::schema::point_transactions;
use derive_builder::Builder;
use diesel::dsl::{Eq, Filter};
use diesel::helper_types::{Desc, Limit, Order};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Builder, Queryable, Identifiable, Clone, Debug)]
#[builder(
  derive(AsChangeset, Insertable),
  pattern = "owned",
  name = "PointTransactionChangeset"
)]
#[builder_struct_attr(diesel(table_name = point_transactions))]
pub struct PointTransaction {
  pub id: Uuid,
  pub user_id: Uuid,
  pub amount: i64,
  pub reason: String,
  pub reference_id: Option<Uuid>,
  pub created_at: chrono::NaiveDateTime,
}

#[allow(clippy::type_complexity)]
impl PointTransaction {
  pub fn recent_for_user(
    user_id: &Uuid,
    limit: i64,
  ) -> Limit<
    Order<
      Filter<point_transactions::table, Eq<point_transactions::user_id, Uuid>>,
      Desc<point_transactions::created_at>,
    >,
  > {
    point_transactions::table
      .filter(point_transactions::user_id.eq(*user_id))
      .order(point_transactions::created_at.desc())
      .limit(limit)
  }
}
