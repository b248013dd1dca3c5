use crate::auth::generate_token;
use crate::config::Config;
use crate::emails;
use crate::guards::DbConn;
use crate::ledger::{self, LedgerError, Reason};
use crate::models::{normalize_email, User, UserChangeset};
use crate::response::{MutationError, MutationResponse, Response};
use crate::schema::users;
use crate::views::SessionView;
use bcrypt::{hash, DEFAULT_COST};
use diesel::prelude::*;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Deserialize;
use validator::Validate;

const USER_CONSTRAINTS: &[(&str, &str)] = &[
  ("users_email_key", "email"),
  ("users_username_key", "username"),
];

#[derive(Deserialize, Validate, JsonSchema)]
pub struct CreateUserRequest {
  #[validate(email)]
  email: String,
  #[validate(custom(function = "crate::auth::validate_username"))]
  username: String,
  #[validate(length(min = 8))]
  password: String,
}

/// Inserts the user and opens their points account with the signup bonus.
pub fn insert_user(
  conn: &mut PgConnection,
  user: UserChangeset,
  starting_points: i64,
) -> Result<User, LedgerError> {
  conn.transaction(|conn| {
    let user = diesel::insert_into(users::table)
      .values(user)
      .get_result::<User>(conn)?;

    ledger::apply(conn, &user.id, starting_points, Reason::SignupBonus, None)?;

    Ok(user)
  })
}

pub fn user_error(error: LedgerError) -> MutationError {
  match error {
    LedgerError::Database(error) => MutationError::constraint_violation(error, USER_CONSTRAINTS),
    other => other.into(),
  }
}

#[openapi(tag = "Arcadia")]
#[post("/users", data = "<user>")]
pub async fn create(
  user: Json<CreateUserRequest>,
  config: &State<Config>,
  db_conn: DbConn,
) -> MutationResponse<SessionView> {
  if let Err(errors) = user.validate() {
    return Response::validation_error(errors);
  }

  let password = hash(&user.password, DEFAULT_COST).map_err(anyhow::Error::from)?;
  let starting_points = config.starting_points;

  let changeset = UserChangeset::default()
    .email(normalize_email(&user.email))
    .username(user.username.clone())
    .password(Some(password));

  let user = db_conn
    .run(move |conn| insert_user(conn, changeset, starting_points))
    .await
    .map_err(user_error)?;

  log::info!("registered user {}", user.id);

  emails::welcome(config, &user).deliver(&db_conn).await;

  let token = generate_token(&user, config).map_err(anyhow::Error::from)?;

  Response::success(SessionView { token })
}
