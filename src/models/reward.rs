use crate::data_types::RewardKind;
use crate::schema::rewards;
use derive_builder::Builder;
use diesel::dsl::{And, Eq, Filter, Find};
use diesel::helper_types::{Asc, Order};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Builder, Queryable, Identifiable, Clone, Debug)]
#[builder(
  derive(AsChangeset, Insertable),
  pattern = "owned",
  name = "RewardChangeset"
)]
#[builder_struct_attr(diesel(table_name = rewards))]
pub struct Reward {
  pub id: Uuid,
  pub name: String,
  pub description: String,
  pub kind: RewardKind,
  pub cost: i64,
  pub image_url: Option<String>,
  pub available: bool,
  pub created_at: chrono::NaiveDateTime,
  pub updated_at: chrono::NaiveDateTime,
}

#[allow(clippy::type_complexity)]
impl Reward {
  pub fn find_by_id(id: &Uuid) -> Find<rewards::table, Uuid> {
    rewards::table.find(*id)
  }

  pub fn filter_available() -> Order<
    Filter<rewards::table, Eq<rewards::available, bool>>,
    (Asc<rewards::cost>, Asc<rewards::name>),
  > {
    rewards::table
      .filter(rewards::available.eq(true))
      .order((rewards::cost.asc(), rewards::name.asc()))
  }

  pub fn find_available(
    id: &Uuid,
  ) -> Filter<rewards::table, And<Eq<rewards::id, Uuid>, Eq<rewards::available, bool>>> {
    rewards::table.filter(rewards::id.eq(*id).and(rewards::available.eq(true)))
  }
}
