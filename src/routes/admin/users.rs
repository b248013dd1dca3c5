use crate::guards::{Admin, Auth, DbConn, Jwt};
use crate::ledger::{self, Balance, LedgerError, Reason};
use crate::models::{User, UserPoints};
use crate::pagination::{Paginate, PaginatedResult};
use crate::response::{MutationResponse, QueryResponse, Response};
use crate::schema::{user_points, users};
use crate::views::{PointsView, UserView};
use diesel::prelude::*;
use rocket::serde::json::Json;
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Deserialize, JsonSchema)]
pub struct UpdateAdminRequest {
  is_admin: bool,
}

#[derive(Deserialize, JsonSchema)]
pub struct AdjustPointsRequest {
  amount: i64,
}

#[openapi(tag = "Arcadia")]
#[get("/admin/users?<page>")]
pub async fn list(
  page: Option<i64>,
  _auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> QueryResponse<PaginatedResult<UserView>> {
  let page = page.unwrap_or(1);

  let (users, balances) = db_conn
    .run(move |conn| {
      let users = User::newest_first()
        .paginate(page)
        .load_and_count_pages::<User>(conn)?;

      let ids: Vec<Uuid> = users.records.iter().map(|user| user.id).collect();

      let balances = user_points::table
        .filter(user_points::user_id.eq_any(ids))
        .load::<UserPoints>(conn)?
        .into_iter()
        .map(|points| (points.user_id, Balance::from(&points)))
        .collect::<HashMap<_, _>>();

      Ok::<_, diesel::result::Error>((users, balances))
    })
    .await?;

  let views = users
    .records
    .iter()
    .cloned()
    .map(|user| {
      let balance = balances.get(&user.id).copied().unwrap_or_default();
      UserView::new(user, balance)
    })
    .collect();

  Response::success(users.records(views))
}

#[openapi(tag = "Arcadia")]
#[put("/admin/users/<id>/admin", data = "<request>")]
pub async fn update_admin(
  id: Uuid,
  request: Json<UpdateAdminRequest>,
  auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> MutationResponse<UserView> {
  let admin = auth.into_deep_inner().0;

  if admin.id == id && !request.is_admin {
    return Response::field_error("is_admin", "self");
  }

  let is_admin = request.is_admin;

  let (user, balance) = db_conn
    .run(move |conn| {
      let user = diesel::update(User::find_by_id(&id))
        .set(users::is_admin.eq(is_admin))
        .get_result::<User>(conn)?;

      let balance = ledger::balance(conn, &user.id)?;

      Ok::<_, diesel::result::Error>((user, balance))
    })
    .await?;

  log::info!("admin {} set is_admin={} on user {}", admin.id, is_admin, id);

  Response::success(UserView::new(user, balance))
}

/// Positive amounts credit the user, negative amounts debit without overdrawing.
#[openapi(tag = "Arcadia")]
#[post("/admin/users/<id>/points", data = "<request>")]
pub async fn adjust_points(
  id: Uuid,
  request: Json<AdjustPointsRequest>,
  auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> MutationResponse<PointsView> {
  let amount = request.amount;

  if amount == 0 {
    return Response::field_error("amount", "invalid");
  }

  let admin = auth.into_deep_inner().0;

  let points = db_conn
    .run(move |conn| {
      let user = User::find_by_id(&id).first::<User>(conn)?;
      let points = ledger::adjust(conn, &user.id, amount, Reason::AdminAdjustment)?;

      Ok::<_, LedgerError>(points)
    })
    .await?;

  log::info!("admin {} adjusted points of user {} by {}", admin.id, id, amount);

  Response::success(points.into())
}
