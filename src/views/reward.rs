use super::PointsView;
use crate::data_types::RewardKind;
use crate::models::{Reward, UserReward};
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize, JsonSchema)]
#[serde(rename = "Reward")]
pub struct RewardView {
  pub id: Uuid,
  pub name: String,
  pub description: String,
  pub kind: RewardKind,
  pub cost: i64,
  pub image_url: Option<String>,
  pub available: bool,
}

impl From<Reward> for RewardView {
  fn from(reward: Reward) -> Self {
    RewardView {
      id: reward.id,
      name: reward.name,
      description: reward.description,
      kind: reward.kind,
      cost: reward.cost,
      image_url: reward.image_url,
      available: reward.available,
    }
  }
}

#[derive(Serialize, JsonSchema)]
#[serde(rename = "OwnedReward")]
pub struct OwnedRewardView {
  pub reward: RewardView,
  pub equipped: bool,
  pub purchased_at: chrono::NaiveDateTime,
}

impl From<(UserReward, Reward)> for OwnedRewardView {
  fn from((owned, reward): (UserReward, Reward)) -> Self {
    OwnedRewardView {
      reward: reward.into(),
      equipped: owned.equipped,
      purchased_at: owned.purchased_at,
    }
  }
}

#[derive(Serialize, JsonSchema)]
#[serde(rename = "Purchase")]
pub struct PurchaseView {
  pub reward: OwnedRewardView,
  pub points: PointsView,
}
