use crate::ads::AnalyticsSummary;
use crate::data_types::AdPlacement;
use crate::models::Advertisement;
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

/// The served creative, without scheduling details.
#[derive(Serialize, JsonSchema)]
#[serde(rename = "Ad")]
pub struct AdView {
  pub id: Uuid,
  pub placement: AdPlacement,
  pub image_url: Option<String>,
  pub html: Option<String>,
  pub target_url: String,
}

impl From<Advertisement> for AdView {
  fn from(ad: Advertisement) -> Self {
    AdView {
      id: ad.id,
      placement: ad.placement,
      image_url: ad.image_url,
      html: ad.html,
      target_url: ad.target_url,
    }
  }
}

#[derive(Serialize, JsonSchema)]
#[serde(rename = "Advertisement")]
pub struct AdvertisementView {
  pub id: Uuid,
  pub name: String,
  pub placement: AdPlacement,
  pub image_url: Option<String>,
  pub html: Option<String>,
  pub target_url: String,
  pub weight: i32,
  pub active: bool,
  pub starts_at: Option<chrono::NaiveDateTime>,
  pub ends_at: Option<chrono::NaiveDateTime>,
  pub created_at: chrono::NaiveDateTime,
}

impl From<Advertisement> for AdvertisementView {
  fn from(ad: Advertisement) -> Self {
    AdvertisementView {
      id: ad.id,
      name: ad.name,
      placement: ad.placement,
      image_url: ad.image_url,
      html: ad.html,
      target_url: ad.target_url,
      weight: ad.weight,
      active: ad.active,
      starts_at: ad.starts_at,
      ends_at: ad.ends_at,
      created_at: ad.created_at,
    }
  }
}

#[derive(Serialize, JsonSchema)]
#[serde(rename = "AdAnalytics")]
pub struct AdAnalyticsView {
  pub advertisement_id: Uuid,
  #[serde(flatten)]
  pub summary: AnalyticsSummary,
}
