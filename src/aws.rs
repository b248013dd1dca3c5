use crate::config::Config;
use rusoto_core::credential::{AwsCredentials, CredentialsError, ProvideAwsCredentials};
use rusoto_core::Region;
use rusoto_s3::util::{PreSignedRequest, PreSignedRequestOption};
use rusoto_s3::PutObjectRequest;
use std::time::Duration;

const UPLOAD_URL_TTL: Duration = Duration::from_secs(15 * 60);

pub struct ConfigCredentialsProvider {
  config: Config,
}

impl ConfigCredentialsProvider {
  pub fn new(config: Config) -> Self {
    Self { config }
  }
}

#[async_trait]
impl ProvideAwsCredentials for ConfigCredentialsProvider {
  async fn credentials(&self) -> Result<AwsCredentials, CredentialsError> {
    Ok(credentials(&self.config))
  }
}

fn credentials(config: &Config) -> AwsCredentials {
  AwsCredentials::new(
    &config.aws_access_key_id,
    &config.aws_secret_key,
    None,
    None,
  )
}

/// Presigned PUT URL for a publicly readable object in the upload bucket.
pub fn presigned_put_url(config: &Config, key: &str, content_type: Option<String>) -> String {
  let req = PutObjectRequest {
    bucket: config.s3_bucket.to_owned(),
    key: key.to_owned(),
    acl: Some("public-read".to_string()),
    content_type,
    ..Default::default()
  };

  req.get_presigned_url(
    &Region::EuWest2,
    &credentials(config),
    &PreSignedRequestOption {
      expires_in: UPLOAD_URL_TTL,
    },
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::test_config;

  #[test]
  fn presigned_urls_point_at_the_bucket() {
    let config = test_config();
    let url = presigned_put_url(&config, "thumbnails/abc", Some("image/png".to_string()));

    assert!(url.contains("arcadia-test"));
    assert!(url.contains("thumbnails/abc"));
    assert!(url.contains("X-Amz-Signature"));
  }
}
