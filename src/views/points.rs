use crate::ledger::Balance;
use crate::models::{PointTransaction, UserPoints};
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize, JsonSchema)]
#[serde(rename = "Points")]
pub struct PointsView {
  pub available_points: i64,
  pub total_earned: i64,
  pub total_spent: i64,
}

impl From<Balance> for PointsView {
  fn from(balance: Balance) -> Self {
    PointsView {
      available_points: balance.available,
      total_earned: balance.earned,
      total_spent: balance.spent,
    }
  }
}

impl From<UserPoints> for PointsView {
  fn from(points: UserPoints) -> Self {
    Balance::from(&points).into()
  }
}

#[derive(Serialize, JsonSchema)]
#[serde(rename = "PointTransaction")]
pub struct PointTransactionView {
  pub id: Uuid,
  pub amount: i64,
  pub reason: String,
  pub reference_id: Option<Uuid>,
  pub created_at: chrono::NaiveDateTime,
}

impl From<PointTransaction> for PointTransactionView {
  fn from(transaction: PointTransaction) -> Self {
    PointTransactionView {
      id: transaction.id,
      amount: transaction.amount,
      reason: transaction.reason,
      reference_id: transaction.reference_id,
      created_at: transaction.created_at,
    }
  }
}

#[derive(Serialize, JsonSchema)]
#[serde(rename = "PointsHistory")]
pub struct PointsHistoryView {
  pub balance: PointsView,
  pub transactions: Vec<PointTransactionView>,
}
