use crate::config::Config;
use crate::emails::verify_unsubscribe_signature;
use crate::guards::{Auth, DbConn, Jwt};
use crate::ledger;
use crate::models::{User, UserChangeset};
use crate::response::{MutationError, MutationResponse, QueryResponse, Response, StatusResponse};
use crate::views::UserView;
use diesel::prelude::*;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate, JsonSchema)]
pub struct UpdateAccountRequest {
  #[validate(custom(function = "crate::auth::validate_username"))]
  username: String,
  #[validate(url)]
  avatar_url: Option<String>,
  emails_enabled: bool,
}

#[openapi(tag = "Arcadia")]
#[get("/me")]
pub async fn get(auth: Auth<Jwt<User>>, db_conn: DbConn) -> QueryResponse<UserView> {
  let user = auth.into_deep_inner();
  let user_id = user.id;

  let balance = db_conn
    .run(move |conn| ledger::balance(conn, &user_id))
    .await?;

  Response::success(UserView::new(user, balance))
}

#[openapi(tag = "Arcadia")]
#[put("/me", data = "<account>")]
pub async fn update(
  account: Json<UpdateAccountRequest>,
  auth: Auth<Jwt<User>>,
  db_conn: DbConn,
) -> MutationResponse<UserView> {
  if let Err(errors) = account.validate() {
    return Response::validation_error(errors);
  }

  let user = auth.into_deep_inner();

  let (user, balance) = db_conn
    .run(move |conn| {
      let user = diesel::update(&user)
        .set(
          UserChangeset::default()
            .username(account.username.clone())
            .avatar_url(account.avatar_url.clone())
            .emails_enabled(account.emails_enabled),
        )
        .get_result::<User>(conn)?;

      let balance = ledger::balance(conn, &user.id)?;

      Ok::<_, diesel::result::Error>((user, balance))
    })
    .await
    .map_err(|error| {
      MutationError::constraint_violation(error, &[("users_username_key", "username")])
    })?;

  Response::success(UserView::new(user, balance))
}

/// Target of the unsubscribe link in marketing emails.
#[openapi(tag = "Arcadia")]
#[get("/unsubscribe?<user_id>&<signature>")]
pub async fn unsubscribe(
  user_id: Uuid,
  signature: String,
  config: &State<Config>,
  db_conn: DbConn,
) -> MutationResponse<StatusResponse> {
  if !verify_unsubscribe_signature(&user_id, &signature, config) {
    return Response::mutation_error(Status::Forbidden);
  }

  db_conn
    .run(move |conn| {
      diesel::update(User::find_by_id(&user_id))
        .set(UserChangeset::default().emails_enabled(false))
        .get_result::<User>(conn)
    })
    .await?;

  log::info!("user {} unsubscribed from emails", user_id);

  Response::status(Status::Ok)
}
