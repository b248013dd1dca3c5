use arcadia_api::ads::{self, AnalyticsSummary};
use arcadia_api::chat::{sanitize, sanitize_message};
use arcadia_api::data_types::{AdEvent, AdPlacement};
use arcadia_api::leaderboard::{rank, rank_of};
use arcadia_api::ledger::{Balance, LedgerError};
use arcadia_api::models::Advertisement;
use arcadia_api::pagination::total_pages;
use arcadia_api::views::RatingSummary;
use chrono::{Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

fn advertisement(placement: AdPlacement, weight: i32) -> Advertisement {
  let now = Utc::now().naive_utc();

  Advertisement {
    id: Uuid::new_v4(),
    name: "House ad".to_string(),
    placement,
    image_url: Some("https://cdn.example.com/ad.png".to_string()),
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

#[test]
fn purchases_never_overdraw() {
  let signup = Balance::default().credit(100).unwrap();
  let after_purchase = signup.debit(60).unwrap();

  assert_eq!(after_purchase.available, 40);
  assert_eq!(after_purchase.spent, 60);
  assert_eq!(
    after_purchase.available,
    after_purchase.earned - after_purchase.spent
  );

  assert!(matches!(
    after_purchase.debit(41),
    Err(LedgerError::InsufficientPoints {
      available: 40,
      required: 41
    })
  ));
}

#[test]
fn leaderboard_ranks_each_player_once() {
  let ada = Uuid::new_v4();
  let bob = Uuid::new_v4();
  let cy = Uuid::new_v4();
  let dee = Uuid::new_v4();

  let standings = rank(vec![(ada, 900), (bob, 1200), (cy, 900), (dee, 300)]);
  let ranks: Vec<i64> = standings.iter().map(|standing| standing.rank).collect();

  assert_eq!(ranks, vec![1, 2, 2, 4]);
  assert_eq!(rank_of(&standings, &bob), Some(1));
  assert_eq!(rank_of(&standings, &dee), Some(4));
  assert_eq!(rank_of(&standings, &Uuid::new_v4()), None);
}

#[test]
fn ads_outside_their_schedule_are_not_served() {
  let now = Utc::now().naive_utc();
  let mut expired = advertisement(AdPlacement::Footer, 5);
  expired.ends_at = Some(now - Duration::minutes(1));

  let current = advertisement(AdPlacement::Footer, 1);

  let live: Vec<Advertisement> = vec![expired, current.clone()]
    .into_iter()
    .filter(|ad| ads::is_live(ad, now))
    .collect();

  let mut rng = StdRng::seed_from_u64(1);

  for _ in 0..10 {
    assert_eq!(ads::pick(&live, &mut rng).map(|ad| ad.id), Some(current.id));
  }
}

#[test]
fn analytics_cover_the_whole_window() {
  let first_day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
  let last_day = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
  let clicked_at = NaiveDate::from_ymd_opt(2024, 1, 3)
    .unwrap()
    .and_hms_opt(12, 0, 0)
    .unwrap();

  let events = vec![
    (AdEvent::Impression, clicked_at),
    (AdEvent::Impression, clicked_at),
    (AdEvent::Impression, clicked_at),
    (AdEvent::Impression, clicked_at),
    (AdEvent::Click, clicked_at),
  ];

  let summary = AnalyticsSummary::from_events(&events, first_day, last_day);

  assert_eq!(summary.days.len(), 7);
  assert_eq!(summary.impressions, 4);
  assert_eq!(summary.clicks, 1);
  assert_eq!(summary.click_through_rate, 0.25);
}

#[test]
fn chat_messages_lose_their_markup() {
  assert_eq!(sanitize("<b>gg</b> <script>alert(1)</script>wp"), "gg wp");
  assert!(sanitize_message("   <i></i>  ").is_err());
  assert!(sanitize_message(&"a".repeat(501)).is_err());
  assert_eq!(sanitize_message(" nice run! ").unwrap(), "nice run!");
}

#[test]
fn ratings_summarize_reviews() {
  let summary = RatingSummary::from_ratings(&[5, 4, 4, 1]);

  assert_eq!(summary.count, 4);
  assert_eq!(summary.average, Some(3.5));
  assert_eq!(summary.histogram, [1, 0, 0, 2, 1]);
  assert_eq!(RatingSummary::from_ratings(&[]).average, None);
}

#[test]
fn pages_round_up() {
  assert_eq!(total_pages(0, 24), 0);
  assert_eq!(total_pages(24, 24), 1);
  assert_eq!(total_pages(25, 24), 2);
}
