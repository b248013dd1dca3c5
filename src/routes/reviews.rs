use crate::achievements::{self, Trigger};
use crate::chat;
use crate::data_types::AchievementCriteria;
use crate::guards::{Auth, DbConn, Jwt};
use crate::ledger::LedgerError;
use crate::models::{Game, GameReview, User};
use crate::pagination::{Paginate, PaginatedResult};
use crate::response::{MutationResponse, QueryResponse, Response, StatusResponse};
use crate::schema::games;
use crate::views::ReviewView;
use diesel::prelude::*;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

#[derive(Deserialize, Validate, JsonSchema)]
pub struct UpsertReviewRequest {
  #[validate(range(min = 1, max = 5))]
  rating: i16,
  #[serde(default)]
  body: String,
}

/// Creates the caller's review of a game, or replaces it when one exists.
#[openapi(tag = "Arcadia")]
#[put("/games/<id>/review", data = "<review>")]
pub async fn upsert(
  id: Uuid,
  review: Json<UpsertReviewRequest>,
  auth: Auth<Jwt<User>>,
  db_conn: DbConn,
) -> MutationResponse<ReviewView> {
  if let Err(errors) = review.validate() {
    return Response::validation_error(errors);
  }

  let body = match chat::sanitize_review(&review.body) {
    Ok(body) => body,
    Err(error) => {
      let mut errors = ValidationErrors::new();
      errors.add("body", error);
      return Response::validation_error(errors);
    }
  };

  let user = auth.into_deep_inner();
  let user_id = user.id;
  let rating = review.rating;

  let review = db_conn
    .run(move |conn| {
      Game::find_published(&id)
        .select(games::id)
        .first::<Uuid>(conn)?;

      let existing = GameReview::find_for_user(&user_id, &id)
        .first::<GameReview>(conn)
        .optional()?;

      let review = GameReview::upsert(&user_id, &id, rating, body, conn)?;

      if existing.is_none() {
        achievements::evaluate(
          conn,
          &user_id,
          Trigger::new(AchievementCriteria::ReviewsWritten, Some(id)),
        )?;
      }

      Ok::<_, LedgerError>(review)
    })
    .await?;

  Response::success(ReviewView::new(review, Some(user)))
}

#[openapi(tag = "Arcadia")]
#[get("/games/<id>/reviews?<page>")]
pub async fn list(
  id: Uuid,
  page: Option<i64>,
  db_conn: DbConn,
) -> QueryResponse<PaginatedResult<ReviewView>> {
  let page = page.unwrap_or(1);

  let (reviews, users) = db_conn
    .run(move |conn| {
      Game::find_published(&id)
        .select(games::id)
        .first::<Uuid>(conn)?;

      let reviews = GameReview::filter_by_game_id(&id)
        .paginate(page)
        .load_and_count_pages::<GameReview>(conn)?;

      let user_ids = reviews.records.iter().map(|review| review.user_id).collect();
      let users = User::filter_by_ids(user_ids).load::<User>(conn)?;

      Ok::<_, diesel::result::Error>((reviews, users))
    })
    .await?;

  let views = reviews
    .records
    .iter()
    .cloned()
    .map(|review| {
      let author = users.iter().find(|user| user.id == review.user_id).cloned();
      ReviewView::new(review, author)
    })
    .collect();

  Response::success(reviews.records(views))
}

#[openapi(tag = "Arcadia")]
#[delete("/games/<id>/review")]
pub async fn delete(
  id: Uuid,
  auth: Auth<Jwt<User>>,
  db_conn: DbConn,
) -> MutationResponse<StatusResponse> {
  let user_id = auth.into_deep_inner().id;

  let deleted = db_conn
    .run(move |conn| diesel::delete(GameReview::find_for_user(&user_id, &id)).execute(conn))
    .await?;

  if deleted == 0 {
    return Response::mutation_error(Status::NotFound);
  }

  Response::status(Status::NoContent)
}
