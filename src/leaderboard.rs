use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

pub const MAX_LEADERBOARD_SIZE: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Standing {
  pub rank: i64,
  pub user_id: Uuid,
  pub score: i64,
}

/// Orders best scores descending with standard competition ranking: equal
/// scores share a rank and the next rank skips ahead (1, 2, 2, 4).
pub fn rank(mut entries: Vec<(Uuid, i64)>) -> Vec<Standing> {
  entries.sort_by(|(a_user, a_score), (b_user, b_score)| {
    b_score.cmp(a_score).then_with(|| a_user.cmp(b_user))
  });

  let mut standings: Vec<Standing> = Vec::with_capacity(entries.len());

  for (position, (user_id, score)) in entries.into_iter().enumerate() {
    let rank = match standings.last() {
      Some(previous) if previous.score == score => previous.rank,
      _ => position as i64 + 1,
    };

    standings.push(Standing {
      rank,
      user_id,
      score,
    });
  }

  standings
}

pub fn rank_of(standings: &[Standing], user_id: &Uuid) -> Option<i64> {
  standings
    .iter()
    .find(|standing| &standing.user_id == user_id)
    .map(|standing| standing.rank)
}

pub fn clamp_limit(requested: Option<i64>, default: i64) -> i64 {
  requested
    .unwrap_or(default)
    .clamp(1, MAX_LEADERBOARD_SIZE)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sorts_descending() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let c = Uuid::new_v4();

    let standings = rank(vec![(a, 10), (b, 30), (c, 20)]);
    let users: Vec<Uuid> = standings.iter().map(|s| s.user_id).collect();

    assert_eq!(users, vec![b, c, a]);
    assert_eq!(
      standings.iter().map(|s| s.rank).collect::<Vec<_>>(),
      vec![1, 2, 3]
    );
  }

  #[test]
  fn ties_share_a_rank() {
    let standings = rank(vec![
      (Uuid::new_v4(), 50),
      (Uuid::new_v4(), 40),
      (Uuid::new_v4(), 40),
      (Uuid::new_v4(), 10),
    ]);

    assert_eq!(
      standings.iter().map(|s| s.rank).collect::<Vec<_>>(),
      vec![1, 2, 2, 4]
    );
  }

  #[test]
  fn finds_rank_for_user() {
    let me = Uuid::new_v4();
    let standings = rank(vec![(Uuid::new_v4(), 99), (me, 42)]);

    assert_eq!(rank_of(&standings, &me), Some(2));
    assert_eq!(rank_of(&standings, &Uuid::new_v4()), None);
  }

  #[test]
  fn limit_is_capped() {
    assert_eq!(clamp_limit(None, 10), 10);
    assert_eq!(clamp_limit(Some(0), 10), 1);
    assert_eq!(clamp_limit(Some(5000), 10), MAX_LEADERBOARD_SIZE);
  }
}
