mod templates;

use crate::aws::ConfigCredentialsProvider;
use crate::config::Config;
use crate::data_types::EmailStatus;
use crate::guards::DbConn;
use crate::models::{EmailLogChangeset, User};
use crate::schema::email_logs;
use crate::{PROFILE, TEST_PROFILE};
use diesel::prelude::*;
use hmac::{Hmac, Mac};
use hyper_tls::HttpsConnector;
use rusoto_core::{HttpClient, Region, RusotoError};
use rusoto_sesv2::{
  BulkEmailContent, BulkEmailEntry, BulkEmailEntryResult, Destination, ReplacementEmailContent,
  ReplacementTemplate, SendBulkEmailError, SendBulkEmailRequest, SesV2, SesV2Client, Template,
};
use sha2::Sha256;
use uuid::Uuid;

pub use templates::{reset_password, welcome};

const SUCCESS_STATUS: &str = "SUCCESS";

#[derive(Clone)]
pub struct Recipient {
  user_id: Option<Uuid>,
  email: String,
  emails_enabled: bool,
  template_data: serde_json::Value,
}

pub struct Email {
  client: SesV2Client,
  from: String,
  template_name: String,
  subject: String,
  template_data: serde_json::Value,
  recipients: Vec<Recipient>,
  transactional: bool,
}

impl Recipient {
  pub fn from_user(user: &User, template_data: serde_json::Value) -> Self {
    Recipient {
      user_id: Some(user.id),
      email: user.email.clone(),
      emails_enabled: user.emails_enabled,
      template_data,
    }
  }
}

impl Email {
  pub fn new(
    config: &Config,
    template_name: &str,
    subject: &str,
    template_data: serde_json::Value,
    recipients: Vec<Recipient>,
  ) -> Self {
    let client = SesV2Client::new_with(
      HttpClient::from_connector(HttpsConnector::new()),
      ConfigCredentialsProvider::new(config.clone()),
      Region::EuWest2,
    );

    let mut template_data = template_data;

    if let Some(data) = template_data.as_object_mut() {
      data.insert("subject".to_string(), subject.into());
    }

    Email {
      client,
      from: config.email_from.clone(),
      template_name: template_name.to_owned(),
      subject: subject.to_owned(),
      template_data,
      recipients,
      transactional: false,
    }
  }

  /// Sent even to recipients who turned emails off.
  pub fn transactional(mut self) -> Self {
    self.transactional = true;
    self
  }

  async fn send(
    &self,
    recipients: &[Recipient],
  ) -> Result<Vec<BulkEmailEntryResult>, RusotoError<SendBulkEmailError>> {
    let email_request = SendBulkEmailRequest {
      from_email_address: Some(self.from.clone()),
      default_content: BulkEmailContent {
        template: Some(Template {
          template_name: Some(self.template_name.clone()),
          template_data: Some(self.template_data.to_string()),
          ..Default::default()
        }),
      },
      bulk_email_entries: recipients
        .iter()
        .map(|recipient| BulkEmailEntry {
          destination: Destination {
            to_addresses: Some(vec![recipient.email.clone()]),
            ..Default::default()
          },
          replacement_email_content: Some(ReplacementEmailContent {
            replacement_template: Some(ReplacementTemplate {
              replacement_template_data: Some(recipient.template_data.to_string()),
            }),
          }),
          ..Default::default()
        })
        .collect(),
      ..Default::default()
    };

    let response = self.client.send_bulk_email(email_request).await?;

    Ok(response.bulk_email_entry_results)
  }

  /// Delivers to every recipient and records one email log per recipient.
  /// Failures are logged, never returned.
  pub async fn deliver(self, db_conn: &DbConn) {
    if self.recipients.is_empty() {
      return;
    }

    let transactional = self.transactional;
    let skip_all = *PROFILE == TEST_PROFILE;

    let (deliverable, skipped): (Vec<Recipient>, Vec<Recipient>) = self
      .recipients
      .iter()
      .cloned()
      .partition(|recipient| !skip_all && (transactional || recipient.emails_enabled));

    let mut logs: Vec<EmailLogChangeset> = skipped
      .iter()
      .map(|recipient| self.log_entry(recipient, EmailStatus::Skipped, None))
      .collect();

    if !deliverable.is_empty() {
      match self.send(&deliverable).await {
        Ok(results) => {
          for (index, recipient) in deliverable.iter().enumerate() {
            let (status, error) = entry_outcome(results.get(index));
            logs.push(self.log_entry(recipient, status, error));
          }
        }
        Err(error) => {
          log::error!("failed to send {} email: {}", self.template_name, error);

          for recipient in deliverable.iter() {
            logs.push(self.log_entry(recipient, EmailStatus::Failed, Some(error.to_string())));
          }
        }
      }
    }

    let result = db_conn
      .run(move |conn| {
        diesel::insert_into(email_logs::table)
          .values(logs)
          .execute(conn)
      })
      .await;

    if let Err(error) = result {
      log::error!("failed to record email logs: {}", error);
    }
  }

  fn log_entry(
    &self,
    recipient: &Recipient,
    status: EmailStatus,
    error: Option<String>,
  ) -> EmailLogChangeset {
    EmailLogChangeset::default()
      .user_id(recipient.user_id)
      .recipient(recipient.email.clone())
      .template(self.template_name.clone())
      .subject(self.subject.clone())
      .status(status)
      .error(error)
  }
}

fn entry_outcome(result: Option<&BulkEmailEntryResult>) -> (EmailStatus, Option<String>) {
  match result {
    Some(result) if result.status.as_deref() == Some(SUCCESS_STATUS) => (EmailStatus::Sent, None),
    Some(result) => (
      EmailStatus::Failed,
      result
        .error
        .clone()
        .or_else(|| result.status.clone())
        .or_else(|| Some("unknown error".to_string())),
    ),
    None => (EmailStatus::Failed, Some("missing delivery result".to_string())),
  }
}

fn unsubscribe_mac(user_id: &Uuid, config: &Config) -> Hmac<Sha256> {
  let mut mac = Hmac::<Sha256>::new_from_slice(config.unsubscribe_secret.as_bytes())
    .expect("HMAC can take key of any size");
  mac.update(user_id.as_bytes());
  mac
}

pub fn unsubscribe_signature(user_id: &Uuid, config: &Config) -> String {
  hex::encode(unsubscribe_mac(user_id, config).finalize().into_bytes())
}

pub fn verify_unsubscribe_signature(user_id: &Uuid, signature: &str, config: &Config) -> bool {
  match hex::decode(signature) {
    Ok(bytes) => unsubscribe_mac(user_id, config).verify_slice(&bytes).is_ok(),
    Err(_) => false,
  }
}

pub fn unsubscribe_url(user_id: &Uuid, config: &Config) -> String {
  format!(
    "{}/unsubscribe?user_id={}&signature={}",
    config.host,
    user_id,
    unsubscribe_signature(user_id, config)
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::test_config;

  fn entry(status: Option<&str>, error: Option<&str>) -> BulkEmailEntryResult {
    BulkEmailEntryResult {
      status: status.map(str::to_string),
      error: error.map(str::to_string),
      ..Default::default()
    }
  }

  #[test]
  fn successful_entries_are_sent() {
    let result = entry(Some("SUCCESS"), None);
    assert_eq!(entry_outcome(Some(&result)), (EmailStatus::Sent, None));
  }

  #[test]
  fn rejected_entries_keep_their_error() {
    let result = entry(Some("MESSAGE_REJECTED"), Some("Email address is not verified."));

    assert_eq!(
      entry_outcome(Some(&result)),
      (
        EmailStatus::Failed,
        Some("Email address is not verified.".to_string())
      )
    );
  }

  #[test]
  fn missing_entries_fail() {
    assert_eq!(entry_outcome(None).0, EmailStatus::Failed);
  }

  #[test]
  fn unsubscribe_signatures_verify() {
    let config = test_config();
    let user_id = Uuid::new_v4();
    let signature = unsubscribe_signature(&user_id, &config);

    assert!(verify_unsubscribe_signature(&user_id, &signature, &config));
    assert!(!verify_unsubscribe_signature(&Uuid::new_v4(), &signature, &config));
    assert!(!verify_unsubscribe_signature(&user_id, "not hex", &config));
  }

  #[test]
  fn unsubscribe_url_carries_signature() {
    let config = test_config();
    let user_id = Uuid::new_v4();
    let url = unsubscribe_url(&user_id, &config);

    assert!(url.starts_with("http://localhost:8000/unsubscribe?user_id="));
    assert!(url.ends_with(&unsubscribe_signature(&user_id, &config)));
  }
}
