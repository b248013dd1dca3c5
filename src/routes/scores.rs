use crate::achievements::{self, Trigger};
use crate::config::Config;
use crate::data_types::AchievementCriteria;
use crate::guards::{Auth, DbConn, Jwt};
use crate::leaderboard::{self, Standing};
use crate::ledger::LedgerError;
use crate::models::{Game, GameScore, GameScoreChangeset, User};
use crate::response::{MutationResponse, QueryResponse, Response};
use crate::schema::{game_scores, games};
use crate::views::{AchievementView, BestScoreView, LeaderboardView, ScoreSubmissionView};
use diesel::prelude::*;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate, JsonSchema)]
pub struct CreateScoreRequest {
  #[validate(range(min = 0))]
  score: i64,
}

#[openapi(tag = "Arcadia")]
#[post("/games/<id>/scores", data = "<score>")]
pub async fn create(
  id: Uuid,
  score: Json<CreateScoreRequest>,
  auth: Auth<Jwt<User>>,
  db_conn: DbConn,
) -> MutationResponse<ScoreSubmissionView> {
  if let Err(errors) = score.validate() {
    return Response::validation_error(errors);
  }

  let user_id = auth.into_deep_inner().id;
  let value = score.score;

  let (score, rank, earned) = db_conn
    .run(move |conn| {
      Game::find_published(&id)
        .select(games::id)
        .first::<Uuid>(conn)?;

      let score = diesel::insert_into(game_scores::table)
        .values(
          GameScoreChangeset::default()
            .user_id(user_id)
            .game_id(id)
            .score(value),
        )
        .get_result::<GameScore>(conn)?;

      let mut earned = achievements::evaluate(
        conn,
        &user_id,
        Trigger::new(AchievementCriteria::ScoresSubmitted, Some(id)),
      )?;

      earned.extend(achievements::evaluate(
        conn,
        &user_id,
        Trigger::new(AchievementCriteria::HighScore, Some(id)),
      )?);

      let standings = leaderboard::rank(GameScore::best_per_user(&id, conn)?);
      let rank = leaderboard::rank_of(&standings, &user_id);

      Ok::<_, LedgerError>((score, rank, earned))
    })
    .await?;

  Response::success(ScoreSubmissionView {
    score: score.into(),
    rank,
    achievements: earned.into_iter().map(AchievementView::from).collect(),
  })
}

#[openapi(tag = "Arcadia")]
#[get("/games/<id>/leaderboard?<limit>")]
pub async fn get_leaderboard(
  id: Uuid,
  limit: Option<i64>,
  config: &State<Config>,
  db_conn: DbConn,
) -> QueryResponse<LeaderboardView> {
  let limit = leaderboard::clamp_limit(limit, config.leaderboard_size) as usize;

  let (standings, users) = db_conn
    .run(move |conn| {
      Game::find_published(&id)
        .select(games::id)
        .first::<Uuid>(conn)?;

      let standings: Vec<Standing> = leaderboard::rank(GameScore::best_per_user(&id, conn)?)
        .into_iter()
        .take(limit)
        .collect();

      let user_ids = standings.iter().map(|standing| standing.user_id).collect();
      let users = User::filter_by_ids(user_ids).load::<User>(conn)?;

      Ok::<_, diesel::result::Error>((standings, users))
    })
    .await?;

  Response::success(LeaderboardView::new(id, standings, &users))
}

#[openapi(tag = "Arcadia")]
#[get("/me/scores")]
pub async fn list_mine(auth: Auth<Jwt<User>>, db_conn: DbConn) -> QueryResponse<Vec<BestScoreView>> {
  let user_id = auth.into_deep_inner().id;

  let (best, games) = db_conn
    .run(move |conn| {
      let best = GameScore::best_per_game(&user_id, conn)?;
      let game_ids: Vec<Uuid> = best.iter().map(|(game_id, _)| *game_id).collect();
      let games = games::table
        .filter(games::id.eq_any(game_ids))
        .load::<Game>(conn)?;

      Ok::<_, diesel::result::Error>((best, games))
    })
    .await?;

  let mut views: Vec<BestScoreView> = best
    .into_iter()
    .filter_map(|(game_id, score)| {
      games
        .iter()
        .find(|game| game.id == game_id)
        .map(|game| BestScoreView {
          game_id,
          game_title: game.title.clone(),
          game_slug: game.slug.clone(),
          score,
        })
    })
    .collect();

  views.sort_by(|a, b| a.game_title.cmp(&b.game_title));

  Response::success(views)
}
