use crate::data_types::RewardKind;
use crate::guards::{Admin, Auth, DbConn, Jwt};
use crate::models::{Reward, RewardChangeset};
use crate::response::{MutationResponse, QueryResponse, Response, StatusResponse};
use crate::schema::rewards;
use crate::views::RewardView;
use diesel::prelude::*;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

fn default_available() -> bool {
  true
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct RewardRequest {
  #[validate(length(min = 1, max = 100))]
  name: String,
  #[serde(default)]
  description: String,
  kind: RewardKind,
  #[validate(range(min = 0))]
  cost: i64,
  #[validate(url)]
  image_url: Option<String>,
  #[serde(default = "default_available")]
  available: bool,
}

impl RewardRequest {
  fn changeset(&self) -> RewardChangeset {
    RewardChangeset::default()
      .name(self.name.trim().to_string())
      .description(self.description.clone())
      .kind(self.kind)
      .cost(self.cost)
      .image_url(self.image_url.clone())
      .available(self.available)
  }
}

#[openapi(tag = "Arcadia")]
#[get("/admin/rewards")]
pub async fn list(_auth: Auth<Jwt<Admin>>, db_conn: DbConn) -> QueryResponse<Vec<RewardView>> {
  let rewards = db_conn
    .run(|conn| {
      rewards::table
        .order((rewards::kind.asc(), rewards::cost.asc()))
        .load::<Reward>(conn)
    })
    .await?;

  Response::success(rewards.into_iter().map(RewardView::from).collect())
}

#[openapi(tag = "Arcadia")]
#[post("/admin/rewards", data = "<reward>")]
pub async fn create(
  reward: Json<RewardRequest>,
  _auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> MutationResponse<RewardView> {
  if let Err(errors) = reward.validate() {
    return Response::validation_error(errors);
  }

  let changeset = reward.changeset();

  let reward = db_conn
    .run(move |conn| {
      diesel::insert_into(rewards::table)
        .values(changeset)
        .get_result::<Reward>(conn)
    })
    .await?;

  Response::success(reward.into())
}

/// Price changes apply to future purchases only.
#[openapi(tag = "Arcadia")]
#[put("/admin/rewards/<id>", data = "<reward>")]
pub async fn update(
  id: Uuid,
  reward: Json<RewardRequest>,
  _auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> MutationResponse<RewardView> {
  if let Err(errors) = reward.validate() {
    return Response::validation_error(errors);
  }

  let changeset = reward.changeset();

  let reward = db_conn
    .run(move |conn| {
      diesel::update(Reward::find_by_id(&id))
        .set(changeset)
        .get_result::<Reward>(conn)
    })
    .await?;

  Response::success(reward.into())
}

#[openapi(tag = "Arcadia")]
#[delete("/admin/rewards/<id>")]
pub async fn delete(
  id: Uuid,
  _auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> MutationResponse<StatusResponse> {
  let deleted = db_conn
    .run(move |conn| diesel::delete(Reward::find_by_id(&id)).execute(conn))
    .await?;

  if deleted == 0 {
    return Response::mutation_error(Status::NotFound);
  }

  Response::status(Status::NoContent)
}
