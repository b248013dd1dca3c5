use crate::data_types::AchievementCriteria;
use crate::guards::{Admin, Auth, DbConn, Jwt};
use crate::models::{Achievement, AchievementChangeset};
use crate::response::{MutationError, MutationResponse, QueryResponse, Response, StatusResponse};
use crate::schema::achievements;
use crate::views::AchievementView;
use diesel::prelude::*;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

const ACHIEVEMENT_CONSTRAINTS: &[(&str, &str)] = &[("achievements_game_id_fkey", "game_id")];

fn default_active() -> bool {
  true
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct AchievementRequest {
  #[validate(length(min = 1, max = 100))]
  name: String,
  #[serde(default)]
  description: String,
  icon: Option<String>,
  criteria: AchievementCriteria,
  #[validate(range(min = 1))]
  threshold: i64,
  game_id: Option<Uuid>,
  #[validate(range(min = 0))]
  points: i64,
  #[serde(default = "default_active")]
  active: bool,
}

impl AchievementRequest {
  fn changeset(&self) -> AchievementChangeset {
    AchievementChangeset::default()
      .name(self.name.trim().to_string())
      .description(self.description.clone())
      .icon(self.icon.clone())
      .criteria(self.criteria)
      .threshold(self.threshold)
      .game_id(self.game_id)
      .points(self.points)
      .active(self.active)
  }
}

#[openapi(tag = "Arcadia")]
#[get("/admin/achievements")]
pub async fn list(_auth: Auth<Jwt<Admin>>, db_conn: DbConn) -> QueryResponse<Vec<AchievementView>> {
  let achievements = db_conn
    .run(|conn| {
      achievements::table
        .order((achievements::criteria.asc(), achievements::threshold.asc()))
        .load::<Achievement>(conn)
    })
    .await?;

  Response::success(achievements.into_iter().map(AchievementView::from).collect())
}

#[openapi(tag = "Arcadia")]
#[post("/admin/achievements", data = "<achievement>")]
pub async fn create(
  achievement: Json<AchievementRequest>,
  _auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> MutationResponse<AchievementView> {
  if let Err(errors) = achievement.validate() {
    return Response::validation_error(errors);
  }

  let changeset = achievement.changeset();

  let achievement = db_conn
    .run(move |conn| {
      diesel::insert_into(achievements::table)
        .values(changeset)
        .get_result::<Achievement>(conn)
    })
    .await
    .map_err(|error| MutationError::constraint_violation(error, ACHIEVEMENT_CONSTRAINTS))?;

  Response::success(achievement.into())
}

/// Raising a threshold does not revoke achievements already earned.
#[openapi(tag = "Arcadia")]
#[put("/admin/achievements/<id>", data = "<achievement>")]
pub async fn update(
  id: Uuid,
  achievement: Json<AchievementRequest>,
  _auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> MutationResponse<AchievementView> {
  if let Err(errors) = achievement.validate() {
    return Response::validation_error(errors);
  }

  let changeset = achievement.changeset();

  let achievement = db_conn
    .run(move |conn| {
      diesel::update(Achievement::find_by_id(&id))
        .set(changeset)
        .get_result::<Achievement>(conn)
    })
    .await
    .map_err(|error| MutationError::constraint_violation(error, ACHIEVEMENT_CONSTRAINTS))?;

  Response::success(achievement.into())
}

#[openapi(tag = "Arcadia")]
#[delete("/admin/achievements/<id>")]
pub async fn delete(
  id: Uuid,
  _auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> MutationResponse<StatusResponse> {
  let deleted = db_conn
    .run(move |conn| diesel::delete(Achievement::find_by_id(&id)).execute(conn))
    .await?;

  if deleted == 0 {
    return Response::mutation_error(Status::NotFound);
  }

  Response::status(Status::NoContent)
}
