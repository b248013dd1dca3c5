use crate::data_types::AchievementCriteria;
use crate::ledger::{self, LedgerError, Reason};
use crate::models::{Achievement, UserAchievement};
use crate::schema::{chat_messages, game_plays, game_reviews, game_scores};
use diesel::prelude::*;
use std::collections::HashMap;
use uuid::Uuid;

/// An action that may complete achievements of one criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
  pub criteria: AchievementCriteria,
  pub game_id: Option<Uuid>,
}

impl Trigger {
  pub fn new(criteria: AchievementCriteria, game_id: Option<Uuid>) -> Self {
    Trigger { criteria, game_id }
  }
}

/// Game-scoped achievements only count actions in their own game.
pub fn applies_to(achievement: &Achievement, trigger: &Trigger) -> bool {
  achievement.criteria == trigger.criteria
    && match achievement.game_id {
      None => true,
      Some(game_id) => trigger.game_id == Some(game_id),
    }
}

pub fn is_met(achievement: &Achievement, value: i64) -> bool {
  value >= achievement.threshold
}

/// Picks the candidates the user now qualifies for. `statistic` is asked once
/// per scope (`None` for portal-wide, `Some(game)` for a single game).
pub fn newly_met<F>(candidates: Vec<Achievement>, trigger: &Trigger, mut statistic: F) -> Vec<Achievement>
where
  F: FnMut(Option<Uuid>) -> i64,
{
  let mut values: HashMap<Option<Uuid>, i64> = HashMap::new();

  candidates
    .into_iter()
    .filter(|achievement| applies_to(achievement, trigger))
    .filter(|achievement| {
      let value = *values
        .entry(achievement.game_id)
        .or_insert_with(|| statistic(achievement.game_id));

      is_met(achievement, value)
    })
    .collect()
}

pub fn statistic(
  conn: &mut PgConnection,
  user_id: &Uuid,
  criteria: AchievementCriteria,
  game_id: Option<Uuid>,
) -> QueryResult<i64> {
  match criteria {
    AchievementCriteria::Plays => {
      let mut query = game_plays::table
        .filter(game_plays::user_id.eq(*user_id))
        .into_boxed();

      if let Some(game_id) = game_id {
        query = query.filter(game_plays::game_id.eq(game_id));
      }

      query.count().get_result(conn)
    }
    AchievementCriteria::ScoresSubmitted => {
      let mut query = game_scores::table
        .filter(game_scores::user_id.eq(*user_id))
        .into_boxed();

      if let Some(game_id) = game_id {
        query = query.filter(game_scores::game_id.eq(game_id));
      }

      query.count().get_result(conn)
    }
    AchievementCriteria::HighScore => {
      let mut query = game_scores::table
        .filter(game_scores::user_id.eq(*user_id))
        .select(diesel::dsl::max(game_scores::score))
        .into_boxed();

      if let Some(game_id) = game_id {
        query = query.filter(game_scores::game_id.eq(game_id));
      }

      Ok(query.get_result::<Option<i64>>(conn)?.unwrap_or(0))
    }
    AchievementCriteria::ReviewsWritten => {
      let mut query = game_reviews::table
        .filter(game_reviews::user_id.eq(*user_id))
        .into_boxed();

      if let Some(game_id) = game_id {
        query = query.filter(game_reviews::game_id.eq(game_id));
      }

      query.count().get_result(conn)
    }
    AchievementCriteria::ChatMessages => {
      let mut query = chat_messages::table
        .filter(chat_messages::user_id.eq(*user_id))
        .into_boxed();

      if let Some(game_id) = game_id {
        query = query.filter(chat_messages::game_id.eq(game_id));
      }

      query.count().get_result(conn)
    }
  }
}

/// Awards every achievement the trigger completes and credits its points.
/// Returns only achievements earned by this call.
pub fn evaluate(
  conn: &mut PgConnection,
  user_id: &Uuid,
  trigger: Trigger,
) -> Result<Vec<Achievement>, LedgerError> {
  conn.transaction(|conn| {
    let candidates = Achievement::unearned_for_user(user_id, trigger.criteria, conn)?;

    if candidates.is_empty() {
      return Ok(vec![]);
    }

    let mut failure = None;

    let met = newly_met(candidates, &trigger, |scope| {
      match statistic(conn, user_id, trigger.criteria, scope) {
        Ok(value) => value,
        Err(error) => {
          failure.get_or_insert(error);
          0
        }
      }
    });

    if let Some(error) = failure {
      return Err(error.into());
    }

    let mut earned = vec![];

    for achievement in met {
      if UserAchievement::grant(user_id, &achievement.id, conn)?.is_none() {
        continue;
      }

      if achievement.points > 0 {
        ledger::apply(
          conn,
          user_id,
          achievement.points,
          Reason::Achievement,
          Some(achievement.id),
        )?;
      }

      log::info!(
        "user {} earned achievement {} ({} points)",
        user_id,
        achievement.id,
        achievement.points
      );

      earned.push(achievement);
    }

    Ok(earned)
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Utc;

  fn achievement(criteria: AchievementCriteria, threshold: i64, game_id: Option<Uuid>) -> Achievement {
    let now = Utc::now().naive_utc();

    Achievement {
      id: Uuid::new_v4(),
      name: format!("{:?} {}", criteria, threshold),
      description: String::new(),
      icon: None,
      criteria,
      threshold,
      game_id,
      points: 10,
      active: true,
      created_at: now,
      updated_at: now,
    }
  }

  #[test]
  fn threshold_is_inclusive() {
    let first_play = achievement(AchievementCriteria::Plays, 1, None);
    assert!(!is_met(&first_play, 0));
    assert!(is_met(&first_play, 1));
    assert!(is_met(&first_play, 2));
  }

  #[test]
  fn game_scoped_achievements_need_their_game() {
    let game = Uuid::new_v4();
    let other_game = Uuid::new_v4();
    let scoped = achievement(AchievementCriteria::HighScore, 100, Some(game));

    assert!(applies_to(
      &scoped,
      &Trigger::new(AchievementCriteria::HighScore, Some(game))
    ));
    assert!(!applies_to(
      &scoped,
      &Trigger::new(AchievementCriteria::HighScore, Some(other_game))
    ));
    assert!(!applies_to(
      &scoped,
      &Trigger::new(AchievementCriteria::HighScore, None)
    ));
  }

  #[test]
  fn portal_wide_achievements_apply_to_any_game() {
    let global = achievement(AchievementCriteria::Plays, 10, None);

    assert!(applies_to(
      &global,
      &Trigger::new(AchievementCriteria::Plays, Some(Uuid::new_v4()))
    ));
    assert!(!applies_to(
      &global,
      &Trigger::new(AchievementCriteria::ChatMessages, None)
    ));
  }

  #[test]
  fn newly_met_queries_each_scope_once() {
    let game = Uuid::new_v4();
    let candidates = vec![
      achievement(AchievementCriteria::Plays, 1, None),
      achievement(AchievementCriteria::Plays, 5, None),
      achievement(AchievementCriteria::Plays, 50, None),
      achievement(AchievementCriteria::Plays, 3, Some(game)),
    ];

    let mut calls = vec![];

    let met = newly_met(
      candidates,
      &Trigger::new(AchievementCriteria::Plays, Some(game)),
      |scope| {
        calls.push(scope);
        match scope {
          None => 7,
          Some(_) => 2,
        }
      },
    );

    let thresholds: Vec<i64> = met.iter().map(|a| a.threshold).collect();
    assert_eq!(thresholds, vec![1, 5]);
    assert_eq!(calls.len(), 2);
  }

  #[test]
  fn newly_met_ignores_other_criteria() {
    let candidates = vec![achievement(AchievementCriteria::ReviewsWritten, 1, None)];

    let met = newly_met(
      candidates,
      &Trigger::new(AchievementCriteria::ChatMessages, None),
      |_| 100,
    );

    assert!(met.is_empty());
  }
}
