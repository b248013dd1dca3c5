use crate::data_types::AdEvent;
use crate::models::Advertisement;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use itertools::Itertools;
use rand::distributions::WeightedIndex;
use rand::prelude::Distribution;
use rand::Rng;
use schemars::JsonSchema;
use serde::Serialize;

/// Weighted random choice; an ad with weight 3 is served three times as often
/// as one with weight 1. Non-positive weights count as 1.
pub fn pick<'a, R: Rng + ?Sized>(ads: &'a [Advertisement], rng: &mut R) -> Option<&'a Advertisement> {
  if ads.is_empty() {
    return None;
  }

  let weights = ads.iter().map(|ad| ad.weight.max(1) as u32);
  let index = WeightedIndex::new(weights).ok()?;

  ads.get(index.sample(rng))
}

pub fn is_live(ad: &Advertisement, now: NaiveDateTime) -> bool {
  ad.active
    && ad.starts_at.map_or(true, |starts_at| starts_at <= now)
    && ad.ends_at.map_or(true, |ends_at| ends_at > now)
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct DailyAnalytics {
  pub date: NaiveDate,
  pub impressions: i64,
  pub clicks: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct AnalyticsSummary {
  pub impressions: i64,
  pub clicks: i64,
  pub click_through_rate: f64,
  pub days: Vec<DailyAnalytics>,
}

pub fn click_through_rate(impressions: i64, clicks: i64) -> f64 {
  if impressions == 0 {
    return 0.0;
  }

  (clicks as f64 / impressions as f64 * 10_000.0).round() / 10_000.0
}

impl AnalyticsSummary {
  /// Buckets events by UTC day, with a zero row for each quiet day from
  /// `first_day` through `last_day`.
  pub fn from_events(
    events: &[(AdEvent, NaiveDateTime)],
    first_day: NaiveDate,
    last_day: NaiveDate,
  ) -> Self {
    let counts = events
      .iter()
      .map(|(event, at)| (at.date(), *event))
      .into_group_map();

    let mut days = vec![];
    let mut day = first_day;

    while day <= last_day {
      let day_events = counts.get(&day);
      let count = |kind: AdEvent| {
        day_events
          .map(|events| events.iter().filter(|event| **event == kind).count() as i64)
          .unwrap_or(0)
      };

      days.push(DailyAnalytics {
        date: day,
        impressions: count(AdEvent::Impression),
        clicks: count(AdEvent::Click),
      });

      day += Duration::days(1);
    }

    let impressions = days.iter().map(|day| day.impressions).sum();
    let clicks = days.iter().map(|day| day.clicks).sum();

    AnalyticsSummary {
      impressions,
      clicks,
      click_through_rate: click_through_rate(impressions, clicks),
      days,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::data_types::AdPlacement;
  use chrono::NaiveTime;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use uuid::Uuid;

  fn ad(weight: i32) -> Advertisement {
    let now = chrono::Utc::now().naive_utc();

    Advertisement {
      id: Uuid::new_v4(),
      name: format!("ad {}", weight),
      placement: AdPlacement::Sidebar,
      image_url: None,
      html: None,
      target_url: "https://example.com".to_string(),
      weight,
      active: true,
      starts_at: None,
      ends_at: None,
      created_at: now,
      updated_at: now,
    }
  }

  fn at(date: NaiveDate, hour: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
  }

  #[test]
  fn no_ads_means_no_pick() {
    let mut rng = StdRng::seed_from_u64(7);
    assert!(pick(&[], &mut rng).is_none());
  }

  #[test]
  fn single_ad_is_always_picked() {
    let ads = vec![ad(1)];
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..20 {
      assert_eq!(pick(&ads, &mut rng).unwrap().id, ads[0].id);
    }
  }

  #[test]
  fn heavier_ads_are_served_more_often() {
    let ads = vec![ad(1), ad(9)];
    let mut rng = StdRng::seed_from_u64(42);
    let mut heavy = 0;

    for _ in 0..1000 {
      if pick(&ads, &mut rng).unwrap().id == ads[1].id {
        heavy += 1;
      }
    }

    assert!(heavy > 800, "heavy ad served {} times", heavy);
  }

  #[test]
  fn schedule_window_is_half_open() {
    let now = chrono::Utc::now().naive_utc();
    let mut scheduled = ad(1);

    scheduled.starts_at = Some(now);
    scheduled.ends_at = Some(now + Duration::hours(1));
    assert!(is_live(&scheduled, now));
    assert!(!is_live(&scheduled, now + Duration::hours(1)));
    assert!(!is_live(&scheduled, now - Duration::seconds(1)));

    scheduled.active = false;
    assert!(!is_live(&scheduled, now));
  }

  #[test]
  fn summarizes_by_day() {
    let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    let tuesday = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    let wednesday = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();

    let events = vec![
      (AdEvent::Impression, at(monday, 9)),
      (AdEvent::Impression, at(monday, 10)),
      (AdEvent::Click, at(monday, 10)),
      (AdEvent::Impression, at(wednesday, 18)),
    ];

    let summary = AnalyticsSummary::from_events(&events, monday, wednesday);

    assert_eq!(summary.impressions, 3);
    assert_eq!(summary.clicks, 1);
    assert_eq!(summary.click_through_rate, 0.3333);
    assert_eq!(summary.days.len(), 3);
    assert_eq!(
      summary.days[1],
      DailyAnalytics {
        date: tuesday,
        impressions: 0,
        clicks: 0,
      }
    );
  }

  #[test]
  fn click_through_rate_without_impressions_is_zero() {
    assert_eq!(click_through_rate(0, 3), 0.0);
  }
}
