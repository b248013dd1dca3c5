use crate::aws;
use crate::config::Config;
use crate::data_types::GameSource;
use crate::guards::{Admin, Auth, DbConn, Jwt};
use crate::models::{Game, GameChangeset};
use crate::pagination::{Paginate, PaginatedResult};
use crate::response::{MutationError, MutationResponse, QueryResponse, Response, StatusResponse};
use crate::schema::games;
use crate::views::{GameView, ThumbnailUploadView};
use diesel::prelude::*;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Deserialize;
use slugify::slugify;
use uuid::Uuid;
use validator::{Validate, ValidationError};

const GAME_CONSTRAINTS: &[(&str, &str)] = &[
  ("games_slug_key", "slug"),
  ("games_category_id_fkey", "category_id"),
];

#[derive(Deserialize, Validate, JsonSchema)]
pub struct GameRequest {
  #[validate(length(min = 1, max = 200))]
  title: String,
  #[validate(length(min = 1, max = 200))]
  slug: Option<String>,
  #[serde(default)]
  description: String,
  #[serde(default)]
  instructions: String,
  category_id: Option<Uuid>,
  #[validate(url)]
  embed_url: String,
  #[validate(url)]
  thumbnail_url: Option<String>,
  source: GameSource,
  #[serde(default)]
  featured: bool,
  #[serde(default)]
  published: bool,
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct CreateThumbnailRequest {
  #[validate(custom(function = "validate_image_type"))]
  content_type: String,
}

fn validate_image_type(content_type: &str) -> Result<(), ValidationError> {
  match content_type {
    "image/png" | "image/jpeg" | "image/webp" | "image/gif" => Ok(()),
    _ => Err(ValidationError::new("content_type")),
  }
}

/// Slug from the explicit value when given, else from the title.
fn slug_for(slug: Option<&str>, title: &str) -> String {
  let source = slug.filter(|slug| !slug.trim().is_empty()).unwrap_or(title);
  slugify!(source)
}

impl GameRequest {
  fn changeset(&self) -> GameChangeset {
    GameChangeset::default()
      .title(self.title.trim().to_string())
      .slug(slug_for(self.slug.as_deref(), &self.title))
      .description(self.description.clone())
      .instructions(self.instructions.clone())
      .category_id(self.category_id)
      .embed_url(self.embed_url.clone())
      .thumbnail_url(self.thumbnail_url.clone())
      .source(self.source)
      .featured(self.featured)
      .published(self.published)
  }
}

#[openapi(tag = "Arcadia")]
#[get("/admin/games?<page>")]
pub async fn list(
  page: Option<i64>,
  _auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> QueryResponse<PaginatedResult<GameView>> {
  let page = page.unwrap_or(1);

  let games = db_conn
    .run(move |conn| {
      Game::newest_first()
        .paginate(page)
        .load_and_count_pages::<Game>(conn)
    })
    .await?;

  let views = games.records.iter().cloned().map(GameView::from).collect();

  Response::success(games.records(views))
}

#[openapi(tag = "Arcadia")]
#[post("/admin/games", data = "<game>")]
pub async fn create(
  game: Json<GameRequest>,
  _auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> MutationResponse<GameView> {
  if let Err(errors) = game.validate() {
    return Response::validation_error(errors);
  }

  let changeset = game.changeset();

  let game = db_conn
    .run(move |conn| {
      diesel::insert_into(games::table)
        .values(changeset)
        .get_result::<Game>(conn)
    })
    .await
    .map_err(|error| MutationError::constraint_violation(error, GAME_CONSTRAINTS))?;

  log::info!("created game {} ({})", game.slug, game.id);

  Response::success(game.into())
}

#[openapi(tag = "Arcadia")]
#[put("/admin/games/<id>", data = "<game>")]
pub async fn update(
  id: Uuid,
  game: Json<GameRequest>,
  _auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> MutationResponse<GameView> {
  if let Err(errors) = game.validate() {
    return Response::validation_error(errors);
  }

  let changeset = game.changeset();

  let game = db_conn
    .run(move |conn| {
      diesel::update(Game::find_by_id(&id))
        .set(changeset)
        .get_result::<Game>(conn)
    })
    .await
    .map_err(|error| MutationError::constraint_violation(error, GAME_CONSTRAINTS))?;

  Response::success(game.into())
}

#[openapi(tag = "Arcadia")]
#[delete("/admin/games/<id>")]
pub async fn delete(
  id: Uuid,
  _auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> MutationResponse<StatusResponse> {
  let deleted = db_conn
    .run(move |conn| diesel::delete(Game::find_by_id(&id)).execute(conn))
    .await?;

  if deleted == 0 {
    return Response::mutation_error(Status::NotFound);
  }

  Response::status(Status::NoContent)
}

/// Issues an upload URL for a new thumbnail and points the game at it.
#[openapi(tag = "Arcadia")]
#[post("/admin/games/<id>/thumbnail", data = "<thumbnail>")]
pub async fn create_thumbnail(
  id: Uuid,
  thumbnail: Json<CreateThumbnailRequest>,
  config: &State<Config>,
  _auth: Auth<Jwt<Admin>>,
  db_conn: DbConn,
) -> MutationResponse<ThumbnailUploadView> {
  if let Err(errors) = thumbnail.validate() {
    return Response::validation_error(errors);
  }

  let key = format!("thumbnails/{}/{}", id, Uuid::new_v4());
  let upload_url = aws::presigned_put_url(config, &key, Some(thumbnail.content_type.clone()));
  let thumbnail_url = config.s3_public_url(&key);
  let stored_url = thumbnail_url.clone();

  db_conn
    .run(move |conn| {
      diesel::update(Game::find_by_id(&id))
        .set(GameChangeset::default().thumbnail_url(Some(stored_url)))
        .get_result::<Game>(conn)
    })
    .await?;

  Response::success(ThumbnailUploadView {
    upload_url,
    thumbnail_url,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn slug_defaults_to_title() {
    assert_eq!(slug_for(None, "Space Invaders 2"), "space-invaders-2");
    assert_eq!(slug_for(Some("  "), "Tetris"), "tetris");
  }

  #[test]
  fn explicit_slugs_are_normalized() {
    assert_eq!(slug_for(Some("My Game!"), "ignored"), "my-game");
  }

  #[test]
  fn only_images_can_be_uploaded() {
    assert!(validate_image_type("image/png").is_ok());
    assert!(validate_image_type("text/html").is_err());
  }
}
