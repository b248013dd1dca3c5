use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use rocket::tokio::sync::RwLock;
use serde::Deserialize;
use std::time::{Duration, Instant};
use thiserror::Error;

const GOOGLE_DISCOVERY_URL: &str = "https://accounts.google.com/.well-known/openid-configuration";
const GOOGLE_ISSUERS: [&str; 2] = ["https://accounts.google.com", "accounts.google.com"];
const KEYS_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Deserialize)]
pub struct OidcConfiguration {
  pub jwks_uri: String,
  pub issuer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub enum KeyType {
  #[serde(rename = "RSA")]
  Rsa,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
  #[serde(rename = "kty")]
  _kty: KeyType,
  pub kid: String,
  pub n: String,
  pub e: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Jwks {
  pub keys: Vec<Jwk>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleClaims {
  pub sub: String,
  pub email: String,
  pub email_verified: Option<bool>,
  pub name: Option<String>,
  pub picture: Option<String>,
}

#[derive(Error, Debug)]
pub enum OidcError {
  #[error("failed to fetch signing keys: {0}")]
  Fetch(#[from] reqwest::Error),
  #[error("invalid id token: {0}")]
  InvalidToken(String),
  #[error("unverified email address")]
  UnverifiedEmail,
}

struct CachedKeys {
  fetched_at: Instant,
  jwks: Jwks,
}

/// Google signing keys, refetched once they are older than an hour.
pub struct OidcCache {
  client: reqwest::Client,
  keys: RwLock<Option<CachedKeys>>,
}

impl Default for OidcCache {
  fn default() -> Self {
    OidcCache {
      client: reqwest::Client::new(),
      keys: RwLock::new(None),
    }
  }
}

async fn fetch_oidc_configuration(
  client: &reqwest::Client,
) -> Result<OidcConfiguration, reqwest::Error> {
  client
    .get(GOOGLE_DISCOVERY_URL)
    .send()
    .await?
    .error_for_status()?
    .json::<OidcConfiguration>()
    .await
}

async fn fetch_jwks(client: &reqwest::Client, jwks_uri: &str) -> Result<Jwks, reqwest::Error> {
  client
    .get(jwks_uri)
    .send()
    .await?
    .error_for_status()?
    .json::<Jwks>()
    .await
}

impl OidcCache {
  async fn jwks(&self) -> Result<Jwks, reqwest::Error> {
    if let Some(cached) = self.keys.read().await.as_ref() {
      if cached.fetched_at.elapsed() < KEYS_TTL {
        return Ok(cached.jwks.clone());
      }
    }

    let oidc_configuration = fetch_oidc_configuration(&self.client).await?;
    let jwks = fetch_jwks(&self.client, &oidc_configuration.jwks_uri).await?;

    *self.keys.write().await = Some(CachedKeys {
      fetched_at: Instant::now(),
      jwks: jwks.clone(),
    });

    Ok(jwks)
  }

  pub async fn verify_google_token(
    &self,
    id_token: &str,
    client_id: &str,
  ) -> Result<GoogleClaims, OidcError> {
    let header = decode_header(id_token).map_err(|e| OidcError::InvalidToken(e.to_string()))?;
    let kid = header
      .kid
      .ok_or_else(|| OidcError::InvalidToken("missing key id".to_string()))?;

    let jwks = self.jwks().await?;

    let jwk = jwks
      .keys
      .iter()
      .find(|jwk| jwk.kid == kid)
      .ok_or_else(|| OidcError::InvalidToken("unknown key id".to_string()))?;

    let key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
      .map_err(|e| OidcError::InvalidToken(e.to_string()))?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_issuer(&GOOGLE_ISSUERS);
    validation.set_audience(&[client_id]);

    let claims = decode::<GoogleClaims>(id_token, &key, &validation)
      .map_err(|e| OidcError::InvalidToken(e.to_string()))?
      .claims;

    if claims.email_verified == Some(false) {
      return Err(OidcError::UnverifiedEmail);
    }

    Ok(claims)
  }
}
