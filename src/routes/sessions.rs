use super::users::{insert_user, user_error};
use crate::auth::{derive_username, generate_token, username_candidates};
use crate::config::Config;
use crate::guards::DbConn;
use crate::ledger::LedgerError;
use crate::models::{normalize_email, User, UserChangeset};
use crate::oidc::{GoogleClaims, OidcCache, OidcError};
use crate::response::{MutationError, MutationResponse, Response};
use crate::views::SessionView;
use bcrypt::verify;
use diesel::prelude::*;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Deserialize;
use uuid::Uuid;

const MAX_USERNAME_ATTEMPTS: usize = 50;

#[derive(Deserialize, JsonSchema)]
pub struct CreateSessionRequest {
  email: String,
  password: String,
}

#[derive(Deserialize, JsonSchema)]
pub struct CreateGoogleSessionRequest {
  id_token: String,
}

#[openapi(tag = "Arcadia")]
#[post("/sessions", data = "<session>")]
pub async fn create(
  session: Json<CreateSessionRequest>,
  config: &State<Config>,
  db_conn: DbConn,
) -> MutationResponse<SessionView> {
  let email = session.email.clone();

  let user = db_conn
    .run(move |conn| User::find_by_email(&email).first::<User>(conn))
    .await?;

  let valid = match &user.password {
    Some(password) => verify(&session.password, password).unwrap_or(false),
    None => false,
  };

  if !valid {
    return Response::field_error("password", "invalid");
  }

  let token = generate_token(&user, config).map_err(anyhow::Error::from)?;

  Response::success(SessionView { token })
}

fn free_username(conn: &mut PgConnection, base: &str) -> QueryResult<String> {
  for candidate in username_candidates(base).take(MAX_USERNAME_ATTEMPTS) {
    let taken = User::find_by_username(&candidate)
      .first::<User>(conn)
      .optional()?
      .is_some();

    if !taken {
      return Ok(candidate);
    }
  }

  Ok(format!("player_{}", &Uuid::new_v4().simple().to_string()[..12]))
}

fn find_or_create_google_user(
  conn: &mut PgConnection,
  claims: GoogleClaims,
  starting_points: i64,
) -> Result<User, LedgerError> {
  if let Some(user) = User::find_by_google_id(&claims.sub)
    .first::<User>(conn)
    .optional()?
  {
    return Ok(user);
  }

  if let Some(user) = User::find_by_email(&claims.email)
    .first::<User>(conn)
    .optional()?
  {
    let avatar_url = user.avatar_url.clone().or(claims.picture);

    let user = diesel::update(&user)
      .set(
        UserChangeset::default()
          .google_id(Some(claims.sub))
          .avatar_url(avatar_url),
      )
      .get_result::<User>(conn)?;

    return Ok(user);
  }

  let username = free_username(conn, &derive_username(claims.name.as_deref(), &claims.email))?;

  insert_user(
    conn,
    UserChangeset::default()
      .email(normalize_email(&claims.email))
      .username(username)
      .google_id(Some(claims.sub))
      .avatar_url(claims.picture),
    starting_points,
  )
}

#[openapi(tag = "Arcadia")]
#[post("/sessions/google", data = "<session>")]
pub async fn create_google(
  session: Json<CreateGoogleSessionRequest>,
  config: &State<Config>,
  oidc: &State<OidcCache>,
  db_conn: DbConn,
) -> MutationResponse<SessionView> {
  let client_id = match config.google_client_id.as_deref() {
    Some(client_id) => client_id,
    None => return Response::mutation_error(Status::NotFound),
  };

  let claims = oidc
    .verify_google_token(&session.id_token, client_id)
    .await
    .map_err(|error| match error {
      OidcError::Fetch(error) => MutationError::InternalServerError(error.into()),
      other => {
        log::warn!("rejected google sign-in: {}", other);
        MutationError::field("id_token", "invalid")
      }
    })?;

  let starting_points = config.starting_points;

  let user = db_conn
    .run(move |conn| find_or_create_google_user(conn, claims, starting_points))
    .await
    .map_err(user_error)?;

  let token = generate_token(&user, config).map_err(anyhow::Error::from)?;

  Response::success(SessionView { token })
}
