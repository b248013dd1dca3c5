//! Points ledger.
//!
//! Every mutation of a user's balance goes through [`apply`], which runs while
//! the user's `user_points` row is locked and appends a `point_transactions`
//! entry in the same database transaction.

use crate::models::{PointTransaction, Reward, UserPoints, UserReward};
use crate::response::MutationError;
use crate::schema::{point_transactions, user_rewards};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
  SignupBonus,
  Achievement,
  RewardPurchase,
  AdminAdjustment,
}

serde_plain::derive_display_from_serialize!(Reason);

#[derive(Error, Debug)]
pub enum LedgerError {
  #[error("insufficient points: {available} available, {required} required")]
  InsufficientPoints { available: i64, required: i64 },
  #[error("invalid amount: {0}")]
  InvalidAmount(i64),
  #[error("reward already owned")]
  AlreadyOwned,
  #[error(transparent)]
  Database(#[from] diesel::result::Error),
}

impl From<LedgerError> for MutationError {
  fn from(error: LedgerError) -> Self {
    match error {
      LedgerError::InsufficientPoints { .. } => MutationError::field("points", "insufficient_points"),
      LedgerError::InvalidAmount(_) => MutationError::field("amount", "invalid"),
      LedgerError::AlreadyOwned => MutationError::field("reward_id", "already_owned"),
      LedgerError::Database(error) => error.into(),
    }
  }
}

/// In-memory view of a points row; `available == earned - spent` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Balance {
  pub available: i64,
  pub earned: i64,
  pub spent: i64,
}

impl Balance {
  pub fn credit(self, amount: i64) -> Result<Balance, LedgerError> {
    if amount < 0 {
      return Err(LedgerError::InvalidAmount(amount));
    }

    Ok(Balance {
      available: self.available + amount,
      earned: self.earned + amount,
      spent: self.spent,
    })
  }

  pub fn debit(self, amount: i64) -> Result<Balance, LedgerError> {
    if amount < 0 {
      return Err(LedgerError::InvalidAmount(amount));
    }

    if self.available < amount {
      return Err(LedgerError::InsufficientPoints {
        available: self.available,
        required: amount,
      });
    }

    Ok(Balance {
      available: self.available - amount,
      earned: self.earned,
      spent: self.spent + amount,
    })
  }

  /// Positive amounts credit, negative amounts debit.
  pub fn apply(self, amount: i64) -> Result<Balance, LedgerError> {
    if amount >= 0 {
      self.credit(amount)
    } else {
      self.debit(-amount)
    }
  }
}

impl From<&UserPoints> for Balance {
  fn from(points: &UserPoints) -> Self {
    Balance {
      available: points.available_points,
      earned: points.total_earned,
      spent: points.total_spent,
    }
  }
}

/// Must run inside a transaction; the row lock is held until it commits.
pub fn apply(
  conn: &mut PgConnection,
  user_id: &Uuid,
  amount: i64,
  reason: Reason,
  reference_id: Option<Uuid>,
) -> Result<UserPoints, LedgerError> {
  let points = UserPoints::lock_for_user(user_id, conn)?;
  let balance = Balance::from(&points).apply(amount)?;

  if amount == 0 {
    return Ok(points);
  }

  let points = points.store(balance.available, balance.earned, balance.spent, conn)?;

  diesel::insert_into(point_transactions::table)
    .values((
      point_transactions::user_id.eq(*user_id),
      point_transactions::amount.eq(amount),
      point_transactions::reason.eq(reason.to_string()),
      point_transactions::reference_id.eq(reference_id),
    ))
    .execute(conn)?;

  Ok(points)
}

pub fn credit(
  conn: &mut PgConnection,
  user_id: &Uuid,
  amount: i64,
  reason: Reason,
  reference_id: Option<Uuid>,
) -> Result<UserPoints, LedgerError> {
  if amount < 0 {
    return Err(LedgerError::InvalidAmount(amount));
  }

  conn.transaction(|conn| apply(conn, user_id, amount, reason, reference_id))
}

pub fn adjust(
  conn: &mut PgConnection,
  user_id: &Uuid,
  amount: i64,
  reason: Reason,
) -> Result<UserPoints, LedgerError> {
  conn.transaction(|conn| apply(conn, user_id, amount, reason, None))
}

pub fn balance(conn: &mut PgConnection, user_id: &Uuid) -> QueryResult<Balance> {
  Ok(
    UserPoints::find_for_user(user_id, conn)?
      .map(|points| Balance::from(&points))
      .unwrap_or_default(),
  )
}

pub fn recent_transactions(
  conn: &mut PgConnection,
  user_id: &Uuid,
  limit: i64,
) -> QueryResult<Vec<PointTransaction>> {
  PointTransaction::recent_for_user(user_id, limit).load(conn)
}

/// Debits the reward's cost and records ownership atomically.
pub fn purchase_reward(
  conn: &mut PgConnection,
  user_id: &Uuid,
  reward: &Reward,
) -> Result<(UserReward, UserPoints), LedgerError> {
  conn.transaction(|conn| {
    let points = UserPoints::lock_for_user(user_id, conn)?;

    let owned = UserReward::find_for_user(user_id, &reward.id)
      .first::<UserReward>(conn)
      .optional()?;

    if owned.is_some() {
      return Err(LedgerError::AlreadyOwned);
    }

    Balance::from(&points).debit(reward.cost)?;

    let points = apply(
      conn,
      user_id,
      -reward.cost,
      Reason::RewardPurchase,
      Some(reward.id),
    )?;

    let user_reward = diesel::insert_into(user_rewards::table)
      .values((
        user_rewards::user_id.eq(*user_id),
        user_rewards::reward_id.eq(reward.id),
      ))
      .get_result::<UserReward>(conn)?;

    Ok((user_reward, points))
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn balance(available: i64, earned: i64, spent: i64) -> Balance {
    Balance {
      available,
      earned,
      spent,
    }
  }

  #[test]
  fn credit_adds_to_available_and_earned() {
    let result = balance(10, 30, 20).credit(15).unwrap();
    assert_eq!(result, balance(25, 45, 20));
  }

  #[test]
  fn debit_moves_points_to_spent() {
    let result = balance(50, 50, 0).debit(30).unwrap();
    assert_eq!(result, balance(20, 50, 30));
    assert_eq!(result.available, result.earned - result.spent);
  }

  #[test]
  fn debit_of_exact_balance_leaves_zero() {
    let result = balance(30, 30, 0).debit(30).unwrap();
    assert_eq!(result.available, 0);
  }

  #[test]
  fn debit_never_overdraws() {
    match balance(5, 5, 0).debit(6) {
      Err(LedgerError::InsufficientPoints {
        available,
        required,
      }) => {
        assert_eq!(available, 5);
        assert_eq!(required, 6);
      }
      other => panic!("unexpected result: {:?}", other),
    }
  }

  #[test]
  fn negative_amounts_are_rejected() {
    assert!(matches!(
      balance(5, 5, 0).credit(-1),
      Err(LedgerError::InvalidAmount(-1))
    ));
    assert!(matches!(
      balance(5, 5, 0).debit(-1),
      Err(LedgerError::InvalidAmount(-1))
    ));
  }

  #[test]
  fn apply_dispatches_on_sign() {
    assert_eq!(balance(5, 5, 0).apply(5).unwrap(), balance(10, 10, 0));
    assert_eq!(balance(5, 5, 0).apply(-5).unwrap(), balance(0, 5, 5));
    assert_eq!(balance(5, 5, 0).apply(0).unwrap(), balance(5, 5, 0));
  }

  #[test]
  fn reasons_are_stored_in_snake_case() {
    assert_eq!(Reason::RewardPurchase.to_string(), "reward_purchase");
    assert_eq!(Reason::SignupBonus.to_string(), "signup_bonus");
  }

  #[test]
  fn ledger_errors_become_field_errors() {
    let error: MutationError = LedgerError::InsufficientPoints {
      available: 1,
      required: 2,
    }
    .into();

    match error {
      MutationError::ValidationErrors(errors) => {
        assert_eq!(errors.field_errors()["points"][0].code, "insufficient_points");
      }
      other => panic!("unexpected error: {:?}", other),
    }
  }
}
