use crate::guards::{Auth, DbConn, Jwt};
use crate::models::{Achievement, User, UserAchievement};
use crate::response::{QueryResponse, Response};
use crate::views::{AchievementView, EarnedAchievementView};
use diesel::prelude::*;
use rocket_okapi::openapi;

#[openapi(tag = "Arcadia")]
#[get("/achievements")]
pub async fn list(db_conn: DbConn) -> QueryResponse<Vec<AchievementView>> {
  let achievements = db_conn
    .run(|conn| Achievement::filter_active().load::<Achievement>(conn))
    .await?;

  Response::success(achievements.into_iter().map(AchievementView::from).collect())
}

#[openapi(tag = "Arcadia")]
#[get("/me/achievements")]
pub async fn list_mine(
  auth: Auth<Jwt<User>>,
  db_conn: DbConn,
) -> QueryResponse<Vec<EarnedAchievementView>> {
  let user_id = auth.into_deep_inner().id;

  let earned = db_conn
    .run(move |conn| UserAchievement::earned_by_user(&user_id, conn))
    .await?;

  Response::success(earned.into_iter().map(EarnedAchievementView::from).collect())
}
