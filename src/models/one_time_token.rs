use crate::schema::one_time_tokens;
use chrono::{Duration, NaiveDateTime, Utc};
use derive_builder::Builder;
use diesel::pg::Pg;
use diesel::prelude::*;
use rand::distributions::{Alphanumeric, DistString};
use uuid::Uuid;

pub const RESET_PASSWORD_SCOPE: &str = "reset_password";

const TOKEN_LENGTH: usize = 16;
const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Builder, Queryable, Identifiable, Clone)]
#[builder(
  derive(AsChangeset, Insertable),
  pattern = "owned",
  name = "OneTimeTokenChangeset"
)]
#[builder_struct_attr(diesel(table_name = one_time_tokens))]
pub struct OneTimeToken {
  pub id: Uuid,
  pub user_id: Option<Uuid>,
  pub value: String,
  pub scope: String,
  pub used_at: Option<NaiveDateTime>,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

impl OneTimeToken {
  /// Unused tokens of `scope` that belong to a user and were issued within the last day.
  pub fn find_redeemable(value: &str, scope: &str) -> one_time_tokens::BoxedQuery<'static, Pg> {
    let issued_after = Utc::now().naive_utc() - Duration::hours(TOKEN_TTL_HOURS);

    one_time_tokens::table
      .filter(one_time_tokens::value.eq(value.to_string()))
      .filter(one_time_tokens::scope.eq(scope.to_string()))
      .filter(one_time_tokens::user_id.is_not_null())
      .filter(one_time_tokens::used_at.is_null())
      .filter(one_time_tokens::created_at.gt(issued_after))
      .into_boxed()
  }

  pub fn issue(user_id: &Uuid, scope: &str, conn: &mut PgConnection) -> QueryResult<OneTimeToken> {
    let value = Alphanumeric.sample_string(&mut rand::thread_rng(), TOKEN_LENGTH);

    diesel::insert_into(one_time_tokens::table)
      .values(
        OneTimeTokenChangeset::default()
          .value(value)
          .scope(scope.to_owned())
          .user_id(Some(*user_id)),
      )
      .get_result(conn)
  }

  /// Marks the token used. Fails with `NotFound` when another request
  /// redeemed it first, so the enclosing transaction rolls back.
  pub fn redeem(&self, conn: &mut PgConnection) -> QueryResult<()> {
    let updated = diesel::update(
      one_time_tokens::table
        .find(self.id)
        .filter(one_time_tokens::used_at.is_null()),
    )
    .set(one_time_tokens::used_at.eq(Some(Utc::now().naive_utc())))
    .execute(conn)?;

    single_use(updated)
  }
}

fn single_use(updated: usize) -> QueryResult<()> {
  match updated {
    0 => Err(diesel::result::Error::NotFound),
    _ => Ok(()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn second_redemption_is_not_found() {
    assert!(single_use(1).is_ok());
    assert!(matches!(single_use(0), Err(diesel::result::Error::NotFound)));
  }
}
