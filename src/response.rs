use diesel::result::{DatabaseErrorKind, Error::DatabaseError};
use okapi::openapi3::Responses;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::response::Responder;
use rocket::serde::json::Json;
use rocket::{response, Request};
use rocket_okapi::{
  gen::OpenApiGenerator, response::OpenApiResponderInner, Result as OpenApiResult,
};
use schemars::JsonSchema;
use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

fn add_error(responses: &mut Responses, code: &str, description: &str) {
  responses
    .responses
    .entry(code.to_owned())
    .or_insert_with(|| {
      let response = okapi::openapi3::Response {
        description: format!(
          "# [{}](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/{})",
          description, code
        ),
        ..Default::default()
      };
      response.into()
    });
}

fn add_query_errors(responses: &mut Responses) {
  add_error(responses, "400", "400 Bad Request");
  add_error(responses, "401", "401 Unauthorized");
  add_error(responses, "403", "403 Forbidden");
  add_error(responses, "404", "404 Not Found");
  add_error(responses, "500", "500 Internal Server Error");
}

#[derive(Debug)]
pub enum MutationError {
  ValidationErrors(ValidationErrors),
  Status(Status),
  InternalServerError(anyhow::Error),
}

#[derive(Debug)]
pub enum QueryError {
  Status(Status),
  InternalServerError(anyhow::Error),
}

#[derive(Serialize, JsonSchema)]
pub struct StatusResponse {
  pub status: u16,
}

pub type MutationResponse<T> = Result<Json<T>, MutationError>;
pub type QueryResponse<T> = Result<Json<T>, QueryError>;
pub struct Response;

impl Response {
  pub fn success<T, E>(response: T) -> Result<Json<T>, E> {
    Ok(Json(response))
  }

  pub fn status<E>(status: Status) -> Result<Json<StatusResponse>, E> {
    Ok(Json(StatusResponse { status: status.code }))
  }

  pub fn query_error<T>(status: Status) -> Result<Json<T>, QueryError> {
    Err(QueryError::Status(status))
  }

  pub fn validation_error<T>(errors: ValidationErrors) -> Result<Json<T>, MutationError> {
    Err(MutationError::ValidationErrors(errors))
  }

  pub fn field_error<T>(field: &'static str, code: &'static str) -> Result<Json<T>, MutationError> {
    Err(MutationError::field(field, code))
  }

  pub fn mutation_error<T>(status: Status) -> Result<Json<T>, MutationError> {
    Err(MutationError::Status(status))
  }
}

impl MutationError {
  pub fn field(field: &'static str, code: &'static str) -> Self {
    let mut errors = ValidationErrors::new();
    errors.add(field, ValidationError::new(code));
    MutationError::ValidationErrors(errors)
  }

  /// Maps unique and foreign key violations to a field error on the field
  /// owning the constraint, given `(constraint, field)` pairs. Unique
  /// violations report `uniqueness`, foreign key violations `not_found`.
  pub fn constraint_violation(
    error: diesel::result::Error,
    constraints: &[(&str, &'static str)],
  ) -> Self {
    if let DatabaseError(kind, info) = &error {
      let code = match kind {
        DatabaseErrorKind::UniqueViolation => Some("uniqueness"),
        DatabaseErrorKind::ForeignKeyViolation => Some("not_found"),
        _ => None,
      };

      let field = info.constraint_name().and_then(|name| {
        constraints
          .iter()
          .find(|(constraint, _)| *constraint == name)
          .map(|(_, field)| *field)
      });

      if let (Some(code), Some(field)) = (code, field) {
        return MutationError::field(field, code);
      }
    }

    error.into()
  }
}

fn report(error: &anyhow::Error) {
  log::error!("internal server error: {:?}", error);
  sentry::integrations::anyhow::capture_anyhow(error);
}

impl<'r> Responder<'r, 'static> for MutationError {
  fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
    match self {
      MutationError::Status(status) => status.respond_to(req),
      MutationError::ValidationErrors(errors) => {
        Custom(Status::UnprocessableEntity, Json(errors)).respond_to(req)
      }
      MutationError::InternalServerError(error) => {
        report(&error);
        Status::InternalServerError.respond_to(req)
      }
    }
  }
}

impl<'r> Responder<'r, 'static> for QueryError {
  fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
    match self {
      QueryError::Status(status) => status.respond_to(req),
      QueryError::InternalServerError(error) => {
        report(&error);
        Status::InternalServerError.respond_to(req)
      }
    }
  }
}

impl OpenApiResponderInner for MutationError {
  fn responses(_gen: &mut OpenApiGenerator) -> OpenApiResult<Responses> {
    let mut responses = Responses::default();
    add_query_errors(&mut responses);
    add_error(&mut responses, "422", "422 Unprocessable Entity");
    Ok(responses)
  }
}

impl OpenApiResponderInner for QueryError {
  fn responses(_gen: &mut OpenApiGenerator) -> OpenApiResult<Responses> {
    let mut responses = Responses::default();
    add_query_errors(&mut responses);
    Ok(responses)
  }
}

impl From<diesel::result::Error> for MutationError {
  fn from(error: diesel::result::Error) -> Self {
    match error {
      diesel::result::Error::NotFound => MutationError::Status(Status::NotFound),
      _ => MutationError::InternalServerError(error.into()),
    }
  }
}

impl From<diesel::result::Error> for QueryError {
  fn from(error: diesel::result::Error) -> Self {
    match error {
      diesel::result::Error::NotFound => QueryError::Status(Status::NotFound),
      _ => QueryError::InternalServerError(error.into()),
    }
  }
}

impl From<anyhow::Error> for MutationError {
  fn from(error: anyhow::Error) -> Self {
    MutationError::InternalServerError(error)
  }
}

impl From<anyhow::Error> for QueryError {
  fn from(error: anyhow::Error) -> Self {
    QueryError::InternalServerError(error)
  }
}

impl From<ValidationErrors> for MutationError {
  fn from(errors: ValidationErrors) -> Self {
    MutationError::ValidationErrors(errors)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn not_found_maps_to_404() {
    match QueryError::from(diesel::result::Error::NotFound) {
      QueryError::Status(status) => assert_eq!(status, Status::NotFound),
      other => panic!("unexpected error: {:?}", other),
    }
  }

  #[test]
  fn other_diesel_errors_are_internal() {
    let error = MutationError::from(diesel::result::Error::RollbackTransaction);
    assert!(matches!(error, MutationError::InternalServerError(_)));
  }

  #[test]
  fn field_error_carries_code() {
    match MutationError::field("email", "uniqueness") {
      MutationError::ValidationErrors(errors) => {
        let fields = errors.field_errors();
        assert_eq!(fields["email"][0].code, "uniqueness");
      }
      other => panic!("unexpected error: {:?}", other),
    }
  }
}
