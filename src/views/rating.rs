use schemars::JsonSchema;
use serde::Serialize;

#[derive(Debug, Serialize, JsonSchema, PartialEq)]
#[serde(rename = "RatingSummary")]
pub struct RatingSummary {
  pub count: i64,
  pub average: Option<f64>,
  /// Number of 1 to 5 star ratings, in that order.
  pub histogram: [i64; 5],
}

impl RatingSummary {
  pub fn from_ratings(ratings: &[i16]) -> Self {
    let mut histogram = [0; 5];

    for rating in ratings.iter().filter(|rating| (1..=5).contains(*rating)) {
      histogram[(*rating - 1) as usize] += 1;
    }

    let count: i64 = histogram.iter().sum();
    let total: i64 = histogram
      .iter()
      .enumerate()
      .map(|(index, n)| (index as i64 + 1) * n)
      .sum();

    let average = if count == 0 {
      None
    } else {
      Some((total as f64 / count as f64 * 10.0).round() / 10.0)
    };

    RatingSummary {
      count,
      average,
      histogram,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_summary_has_no_average() {
    let summary = RatingSummary::from_ratings(&[]);
    assert_eq!(summary.count, 0);
    assert_eq!(summary.average, None);
    assert_eq!(summary.histogram, [0; 5]);
  }

  #[test]
  fn average_is_rounded_to_one_decimal() {
    let summary = RatingSummary::from_ratings(&[5, 4, 4]);
    assert_eq!(summary.count, 3);
    assert_eq!(summary.average, Some(4.3));
    assert_eq!(summary.histogram, [0, 0, 0, 2, 1]);
  }

  #[test]
  fn out_of_range_ratings_are_ignored() {
    let summary = RatingSummary::from_ratings(&[0, 6, 3]);
    assert_eq!(summary.count, 1);
    assert_eq!(summary.average, Some(3.0));
  }
}
