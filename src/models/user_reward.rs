use crate::data_types::RewardKind;
use crate::models::Reward;
use crate::schema::{rewards, user_rewards};
use derive_builder::Builder;
use diesel::dsl::{And, Eq, Filter};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Builder, Queryable, Identifiable, Clone)]
#[builder(
  derive(AsChangeset, Insertable),
  pattern = "owned",
  name = "UserRewardChangeset"
)]
#[builder_struct_attr(diesel(table_name = user_rewards))]
pub struct UserReward {
  pub id: Uuid,
  pub user_id: Uuid,
  pub reward_id: Uuid,
  pub equipped: bool,
  pub purchased_at: chrono::NaiveDateTime,
}

#[allow(clippy::type_complexity)]
impl UserReward {
  pub fn find_for_user(
    user_id: &Uuid,
    reward_id: &Uuid,
  ) -> Filter<
    user_rewards::table,
    And<Eq<user_rewards::user_id, Uuid>, Eq<user_rewards::reward_id, Uuid>>,
  > {
    user_rewards::table.filter(
      user_rewards::user_id
        .eq(*user_id)
        .and(user_rewards::reward_id.eq(*reward_id)),
    )
  }

  pub fn owned_by_user(
    user_id: &Uuid,
    conn: &mut PgConnection,
  ) -> QueryResult<Vec<(UserReward, Reward)>> {
    user_rewards::table
      .inner_join(rewards::table)
      .filter(user_rewards::user_id.eq(*user_id))
      .order(user_rewards::purchased_at.desc())
      .load(conn)
  }

  /// Equips the reward and unequips every other owned reward of the same kind.
  pub fn equip(
    user_id: &Uuid,
    reward_id: &Uuid,
    kind: RewardKind,
    conn: &mut PgConnection,
  ) -> QueryResult<UserReward> {
    conn.transaction(|conn| {
      let same_kind = rewards::table
        .filter(rewards::kind.eq(kind))
        .select(rewards::id);

      diesel::update(
        user_rewards::table
          .filter(user_rewards::user_id.eq(*user_id))
          .filter(user_rewards::reward_id.eq_any(same_kind)),
      )
      .set(user_rewards::equipped.eq(false))
      .execute(conn)?;

      diesel::update(UserReward::find_for_user(user_id, reward_id))
        .set(user_rewards::equipped.eq(true))
        .get_result(conn)
    })
  }
}
