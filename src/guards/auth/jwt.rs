use super::{Auth, AuthError, AuthFromRequest};
use crate::auth::{decode_token, Claims};
use crate::config::Config;
use crate::guards::DbConn;
use crate::models::User;
use diesel::prelude::*;
use lazy_static::lazy_static;
use regex::Regex;
use rocket::{Request, State};

lazy_static! {
  static ref JWT_REGEX: Regex = Regex::new(r"^Bearer (?P<jwt>\S+)$").unwrap();
}

pub struct Jwt<T>(T);

impl<T> Jwt<T> {
  pub fn into_inner(self) -> T {
    self.0
  }
}

impl<T> Auth<Jwt<T>> {
  pub fn into_deep_inner(self) -> T {
    self.into_inner().into_inner()
  }
}

/// An administrator's account.
pub struct Admin(pub User);

#[async_trait]
pub trait FromJwt: Sized {
  async fn from_jwt(claims: &Claims, db_conn: &DbConn) -> Result<Self, AuthError>;
}

pub(super) fn bearer_token<'r>(req: &'r Request<'_>) -> Result<&'r str, AuthError> {
  let authorization = req
    .headers()
    .get_one("authorization")
    .ok_or(AuthError::Missing)?;

  let captures = JWT_REGEX
    .captures(authorization)
    .ok_or_else(|| AuthError::Invalid("malformed authorization header".to_string()))?;

  captures
    .name("jwt")
    .map(|jwt| jwt.as_str())
    .ok_or_else(|| AuthError::Invalid("jwt not found in header".to_string()))
}

#[async_trait]
impl<T: FromJwt> AuthFromRequest for Jwt<T> {
  async fn from_request(req: &Request<'_>) -> Result<Self, AuthError> {
    let config = req
      .guard::<&State<Config>>()
      .await
      .succeeded()
      .ok_or_else(|| AuthError::Unavailable("config".to_string()))?;

    let jwt = bearer_token(req)?;
    let claims = decode_token(jwt, config).map_err(|e| AuthError::Invalid(e.to_string()))?;

    let db_conn = req
      .guard::<DbConn>()
      .await
      .succeeded()
      .ok_or_else(|| AuthError::Unavailable("database".to_string()))?;

    let inner = T::from_jwt(&claims, &db_conn).await?;

    Ok(Self(inner))
  }
}

#[async_trait]
impl FromJwt for User {
  async fn from_jwt(claims: &Claims, db_conn: &DbConn) -> Result<Self, AuthError> {
    let user_id = claims
      .user_id()
      .ok_or_else(|| AuthError::Invalid("malformed subject".to_string()))?;

    db_conn
      .run(move |conn| User::find_by_id(&user_id).first::<User>(conn))
      .await
      .map_err(|error| AuthError::lookup(error, "user"))
  }
}

#[async_trait]
impl FromJwt for Admin {
  async fn from_jwt(claims: &Claims, db_conn: &DbConn) -> Result<Self, AuthError> {
    Admin::try_from(User::from_jwt(claims, db_conn).await?)
  }
}

impl TryFrom<User> for Admin {
  type Error = AuthError;

  fn try_from(user: User) -> Result<Self, Self::Error> {
    if !user.is_admin {
      return Err(AuthError::Forbidden);
    }

    Ok(Admin(user))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::auth::generate_token;
  use crate::config::test_config;
  use crate::guards::Viewer;
  use chrono::Utc;
  use rocket::http::{Header, Status};
  use rocket::local::blocking::Client;
  use uuid::Uuid;

  #[get("/private")]
  fn private(_auth: Auth<Jwt<User>>) -> &'static str {
    "ok"
  }

  #[get("/viewer")]
  fn viewer(viewer: Viewer) -> String {
    viewer.user_id().is_some().to_string()
  }

  fn user(is_admin: bool) -> User {
    let now = Utc::now().naive_utc();

    User {
      id: Uuid::new_v4(),
      email: "ada@example.com".to_string(),
      username: "ada".to_string(),
      password: None,
      google_id: None,
      avatar_url: None,
      is_admin,
      emails_enabled: true,
      created_at: now,
      updated_at: now,
    }
  }

  fn client() -> Client {
    let rocket = rocket::build()
      .manage(test_config())
      .mount("/", routes![private, viewer]);

    Client::tracked(rocket).unwrap()
  }

  fn bearer(value: &str) -> Header<'static> {
    Header::new("Authorization", value.to_string())
  }

  #[test]
  fn extracts_bearer_tokens() {
    let client = Client::debug(rocket::build()).unwrap();

    let request = client.get("/").header(bearer("Bearer abc.def.ghi"));
    assert_eq!(bearer_token(request.inner()).unwrap(), "abc.def.ghi");

    let request = client.get("/");
    assert!(matches!(bearer_token(request.inner()), Err(AuthError::Missing)));

    let request = client.get("/").header(bearer("Basic dXNlcjpwYXNz"));
    assert!(matches!(bearer_token(request.inner()), Err(AuthError::Invalid(_))));

    let request = client.get("/").header(bearer("Bearer two tokens"));
    assert!(matches!(bearer_token(request.inner()), Err(AuthError::Invalid(_))));
  }

  #[test]
  fn missing_or_bad_credentials_are_unauthorized() {
    let client = client();

    assert_eq!(client.get("/private").dispatch().status(), Status::Unauthorized);

    let response = client.get("/private").header(bearer("Token abc")).dispatch();
    assert_eq!(response.status(), Status::Unauthorized);

    let response = client.get("/private").header(bearer("Bearer not-a-jwt")).dispatch();
    assert_eq!(response.status(), Status::Unauthorized);

    let mut other = test_config();
    other.auth_client_secret = "another secret".to_string();
    let forged = generate_token(&user(false), &other).unwrap();

    let response = client
      .get("/private")
      .header(bearer(&format!("Bearer {}", forged)))
      .dispatch();
    assert_eq!(response.status(), Status::Unauthorized);
  }

  #[test]
  fn viewer_falls_back_to_anonymous() {
    let client = client();

    let response = client.get("/viewer").dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.into_string().unwrap(), "false");

    let response = client.get("/viewer").header(bearer("Bearer not-a-jwt")).dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.into_string().unwrap(), "false");
  }

  #[test]
  fn admin_requires_the_flag() {
    assert!(matches!(Admin::try_from(user(false)), Err(AuthError::Forbidden)));
    assert_eq!(AuthError::Forbidden.status(), Status::Forbidden);

    let admin = user(true);
    let id = admin.id;
    assert_eq!(Admin::try_from(admin).unwrap().0.id, id);
  }
}
