use crate::config::Config;
use crate::emails;
use crate::guards::{Auth, DbConn, Ott, ResetPassword};
use crate::models::{OneTimeToken, User, UserChangeset, RESET_PASSWORD_SCOPE};
use crate::response::{MutationError, MutationResponse, Response, StatusResponse};
use bcrypt::{hash, DEFAULT_COST};
use diesel::prelude::*;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreatePasswordRequest {
  email: String,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct UpdatePasswordRequest {
  #[validate(length(min = 8))]
  password: String,
}

#[openapi(tag = "Arcadia")]
#[post("/passwords", data = "<password>")]
pub async fn create(
  password: Json<CreatePasswordRequest>,
  config: &State<Config>,
  db_conn: DbConn,
) -> MutationResponse<StatusResponse> {
  let email = password.email.clone();

  let user = match db_conn
    .run(move |conn| User::find_by_email(&email).first::<User>(conn).optional())
    .await?
  {
    Some(user) => user,
    None => return Response::status(Status::Ok),
  };

  let user_id = user.id;

  let token = db_conn
    .run(move |conn| OneTimeToken::issue(&user_id, RESET_PASSWORD_SCOPE, conn))
    .await?;

  emails::reset_password(config, &user, &token)
    .deliver(&db_conn)
    .await;

  Response::status(Status::Ok)
}

#[openapi(tag = "Arcadia")]
#[put("/passwords", data = "<password>")]
pub async fn update(
  password: Json<UpdatePasswordRequest>,
  db_conn: DbConn,
  auth: Auth<Ott<ResetPassword>>,
) -> MutationResponse<StatusResponse> {
  if let Err(errors) = password.validate() {
    return Response::validation_error(errors);
  }

  let token = auth.into_token();
  let user_id = token.user_id.ok_or(MutationError::Status(Status::NotFound))?;
  let password_hash = hash(&password.password, DEFAULT_COST).map_err(anyhow::Error::from)?;

  db_conn
    .run(move |conn| {
      conn.transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::update(User::find_by_id(&user_id))
          .set(UserChangeset::default().password(Some(password_hash)))
          .execute(conn)?;

        token.redeem(conn)?;

        Ok(())
      })
    })
    .await?;

  Response::status(Status::Ok)
}
