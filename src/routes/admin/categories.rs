use crate::guards::{Admin, Auth, DbConn, Jwt};
use crate::models::{GameCategory, GameCategoryChangeset};
use crate::response::{MutationError, MutationResponse, Response, StatusResponse};
use crate::schema::game_categories;
use crate::views::CategoryView;
use diesel::prelude::*;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Deserialize;
use slugify::slugify;
use uuid::Uuid;
use validator::Validate;

const CATEGORY_CONSTRAINTS: &[(&str, &str)] = &[("game_categories_slug_key", "slug")];

#[derive(Deserialize, Validate, JsonSchema)]
pub struct CategoryRequest {
  #[validate(length(min = 1, max = 100))]
  name: String,
  #[validate(length(min = 1, max = 100))]
  slug: Option<String>,
  #[serde(default)]
  description: String,
  icon: Option<String>,
  #[serde(default)]
  position: i32,
}

impl CategoryRequest {
  fn changeset(&self) -> GameCategoryChangeset {
    let slug = self
      .slug
      .as_deref()
      .filter(|slug| !slug.trim().is_empty())
      .unwrap_or(&self.name);

    GameCategoryChangeset::default()
      .name(self.name.trim().to_string())
      .slug(slugify!(slug))
      .description(self.description.clone())
      .icon(self.icon.clone())
      .position(self.position)
  }
}

#[openapi(tag = "Arcadia")]
#[post("/admin/categories", data = "<category>")]
pub async fn create(
  category: Json<CategoryRequest>,
  _auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> MutationResponse<CategoryView> {
  if let Err(errors) = category.validate() {
    return Response::validation_error(errors);
  }

  let changeset = category.changeset();

  let category = db_conn
    .run(move |conn| {
      diesel::insert_into(game_categories::table)
        .values(changeset)
        .get_result::<GameCategory>(conn)
    })
    .await
    .map_err(|error| MutationError::constraint_violation(error, CATEGORY_CONSTRAINTS))?;

  Response::success(category.into())
}

#[openapi(tag = "Arcadia")]
#[put("/admin/categories/<id>", data = "<category>")]
pub async fn update(
  id: Uuid,
  category: Json<CategoryRequest>,
  _auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> MutationResponse<CategoryView> {
  if let Err(errors) = category.validate() {
    return Response::validation_error(errors);
  }

  let changeset = category.changeset();

  let category = db_conn
    .run(move |conn| {
      diesel::update(GameCategory::find_by_id(&id))
        .set(changeset)
        .get_result::<GameCategory>(conn)
    })
    .await
    .map_err(|error| MutationError::constraint_violation(error, CATEGORY_CONSTRAINTS))?;

  Response::success(category.into())
}

/// Games in the category stay, uncategorized.
#[openapi(tag = "Arcadia")]
#[delete("/admin/categories/<id>")]
pub async fn delete(
  id: Uuid,
  _auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> MutationResponse<StatusResponse> {
  let deleted = db_conn
    .run(move |conn| diesel::delete(GameCategory::find_by_id(&id)).execute(conn))
    .await?;

  if deleted == 0 {
    return Response::mutation_error(Status::NotFound);
  }

  Response::status(Status::NoContent)
}
