mod jwt;
mod ott;
mod viewer;

use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};
use rocket_okapi::{
  gen::OpenApiGenerator,
  request::{OpenApiFromRequest, RequestHeaderInput},
};
use thiserror::Error;

pub use jwt::{Admin, FromJwt, Jwt};
pub use ott::{Ott, OttScope, ResetPassword};
pub use viewer::Viewer;

#[derive(Error, Debug)]
pub enum AuthError {
  #[error("missing credentials")]
  Missing,
  #[error("invalid credentials: {0}")]
  Invalid(String),
  #[error("{0} not found")]
  NotFound(String),
  #[error("forbidden")]
  Forbidden,
  #[error("unavailable: {0}")]
  Unavailable(String),
}

impl AuthError {
  pub fn status(&self) -> Status {
    match self {
      AuthError::Missing => Status::Unauthorized,
      AuthError::Invalid(_) => Status::Unauthorized,
      AuthError::NotFound(_) => Status::NotFound,
      AuthError::Forbidden => Status::Forbidden,
      AuthError::Unavailable(_) => Status::ServiceUnavailable,
    }
  }

  /// A missing row is a 404; any other database failure means the lookup
  /// could not be made.
  pub fn lookup(error: diesel::result::Error, what: &str) -> Self {
    match error {
      diesel::result::Error::NotFound => AuthError::NotFound(what.to_string()),
      error => {
        log::error!("failed to look up {}: {}", what, error);
        AuthError::Unavailable(what.to_string())
      }
    }
  }
}

pub struct Auth<T>(pub T);

impl<T> Auth<T> {
  pub fn into_inner(self) -> T {
    self.0
  }
}

#[async_trait]
pub trait AuthFromRequest: Sized {
  async fn from_request(req: &Request<'_>) -> Result<Self, AuthError>;
}

#[rocket::async_trait]
impl<'r, T: AuthFromRequest> FromRequest<'r> for Auth<T> {
  type Error = AuthError;

  async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
    match T::from_request(req).await {
      Ok(inner) => Outcome::Success(Auth(inner)),
      Err(error) => {
        log::debug!("rejected request to {}: {}", req.uri(), error);
        Outcome::Error((error.status(), error))
      }
    }
  }
}

impl<'a, T: AuthFromRequest> OpenApiFromRequest<'a> for Auth<T> {
  fn from_request_input(
    _gen: &mut OpenApiGenerator,
    _name: String,
    _required: bool,
  ) -> rocket_okapi::Result<RequestHeaderInput> {
    Ok(RequestHeaderInput::None)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn maps_errors_to_statuses() {
    assert_eq!(AuthError::Missing.status(), Status::Unauthorized);
    assert_eq!(
      AuthError::Invalid("expired".to_string()).status(),
      Status::Unauthorized
    );
    assert_eq!(AuthError::NotFound("user".to_string()).status(), Status::NotFound);
    assert_eq!(AuthError::Forbidden.status(), Status::Forbidden);
    assert_eq!(
      AuthError::Unavailable("database".to_string()).status(),
      Status::ServiceUnavailable
    );
  }

  #[test]
  fn only_missing_rows_are_not_found() {
    let missing = AuthError::lookup(diesel::result::Error::NotFound, "user");
    assert_eq!(missing.status(), Status::NotFound);

    let broken = AuthError::lookup(diesel::result::Error::BrokenTransactionManager, "user");
    assert_eq!(broken.status(), Status::ServiceUnavailable);
  }
}
