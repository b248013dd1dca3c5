use crate::guards::{Auth, DbConn, Jwt};
use crate::ledger::{self, LedgerError};
use crate::models::{Reward, User, UserReward};
use crate::response::{MutationResponse, QueryResponse, Response};
use crate::views::{OwnedRewardView, PurchaseView, RewardView};
use diesel::prelude::*;
use rocket_okapi::openapi;
use uuid::Uuid;

#[openapi(tag = "Arcadia")]
#[get("/rewards")]
pub async fn list(db_conn: DbConn) -> QueryResponse<Vec<RewardView>> {
  let rewards = db_conn
    .run(|conn| Reward::filter_available().load::<Reward>(conn))
    .await?;

  Response::success(rewards.into_iter().map(RewardView::from).collect())
}

#[openapi(tag = "Arcadia")]
#[post("/rewards/<id>/purchase")]
pub async fn purchase(
  id: Uuid,
  auth: Auth<Jwt<User>>,
  db_conn: DbConn,
) -> MutationResponse<PurchaseView> {
  let user_id = auth.into_deep_inner().id;

  let (user_reward, reward, points) = db_conn
    .run(move |conn| {
      let reward = Reward::find_available(&id).first::<Reward>(conn)?;
      let (user_reward, points) = ledger::purchase_reward(conn, &user_id, &reward)?;

      Ok::<_, LedgerError>((user_reward, reward, points))
    })
    .await?;

  log::info!(
    "user {} bought reward {} for {} points",
    user_id,
    reward.id,
    reward.cost
  );

  Response::success(PurchaseView {
    reward: (user_reward, reward).into(),
    points: points.into(),
  })
}

#[openapi(tag = "Arcadia")]
#[get("/me/rewards")]
pub async fn list_mine(auth: Auth<Jwt<User>>, db_conn: DbConn) -> QueryResponse<Vec<OwnedRewardView>> {
  let user_id = auth.into_deep_inner().id;

  let owned = db_conn
    .run(move |conn| UserReward::owned_by_user(&user_id, conn))
    .await?;

  Response::success(owned.into_iter().map(OwnedRewardView::from).collect())
}

/// Equips an owned reward, unequipping any other of the same kind.
#[openapi(tag = "Arcadia")]
#[put("/me/rewards/<id>/equip")]
pub async fn equip(
  id: Uuid,
  auth: Auth<Jwt<User>>,
  db_conn: DbConn,
) -> MutationResponse<OwnedRewardView> {
  let user_id = auth.into_deep_inner().id;

  let (user_reward, reward) = db_conn
    .run(move |conn| {
      let reward = Reward::find_by_id(&id).first::<Reward>(conn)?;
      let user_reward = UserReward::equip(&user_id, &id, reward.kind, conn)?;

      Ok::<_, diesel::result::Error>((user_reward, reward))
    })
    .await?;

  Response::success((user_reward, reward).into())
}
