use crate::achievements::{self, Trigger};
use crate::data_types::AchievementCriteria;
use crate::guards::{DbConn, Viewer};
use crate::ledger::LedgerError;
use crate::models::{Game, GameCategory, GameFilter, GamePlayChangeset, GameReview};
use crate::pagination::{Paginate, PaginatedResult};
use crate::response::{MutationResponse, QueryResponse, Response};
use crate::schema::{game_categories, game_plays, games};
use crate::views::{AchievementView, GameDetailView, GameView, PlayView, RatingSummary};
use diesel::prelude::*;
use rocket_okapi::openapi;
use schemars::JsonSchema;
use uuid::Uuid;

const DEFAULT_POPULAR_LIMIT: i64 = 12;

#[derive(FromForm, JsonSchema)]
pub struct ListParams {
  category: Option<String>,
  q: Option<String>,
  featured: Option<bool>,
  page: Option<i64>,
}

#[openapi(tag = "Arcadia")]
#[get("/games?<params..>")]
pub async fn list(db_conn: DbConn, params: ListParams) -> QueryResponse<PaginatedResult<GameView>> {
  let page = params.page.unwrap_or(1);

  let games = db_conn
    .run(move |conn| {
      let category_id = match params.category {
        Some(slug) => Some(
          GameCategory::find_by_slug(&slug)
            .select(game_categories::id)
            .first::<Uuid>(conn)?,
        ),
        None => None,
      };

      let filter = GameFilter {
        category_id,
        query: params.q.filter(|q| !q.trim().is_empty()),
        featured: params.featured,
      };

      Game::filter_published(filter)
        .paginate(page)
        .load_and_count_pages::<Game>(conn)
    })
    .await?;

  let views = games.records.iter().cloned().map(GameView::from).collect();

  Response::success(games.records(views))
}

#[openapi(tag = "Arcadia")]
#[get("/games/popular?<limit>")]
pub async fn popular(limit: Option<i64>, db_conn: DbConn) -> QueryResponse<Vec<GameView>> {
  let limit = limit.unwrap_or(DEFAULT_POPULAR_LIMIT).clamp(1, 50);

  let games = db_conn
    .run(move |conn| Game::popular(limit).load::<Game>(conn))
    .await?;

  Response::success(games.into_iter().map(GameView::from).collect())
}

#[openapi(tag = "Arcadia")]
#[get("/games/<slug>")]
pub async fn get(slug: String, db_conn: DbConn) -> QueryResponse<GameDetailView> {
  let (game, category, ratings) = db_conn
    .run(move |conn| {
      let game = Game::find_published_by_slug(&slug).first::<Game>(conn)?;

      let category = match game.category_id {
        Some(category_id) => GameCategory::find_by_id(&category_id)
          .first::<GameCategory>(conn)
          .optional()?,
        None => None,
      };

      let ratings = GameReview::ratings_for_game(&game.id, conn)?;

      Ok::<_, diesel::result::Error>((game, category, ratings))
    })
    .await?;

  Response::success(GameDetailView::new(
    game,
    category,
    RatingSummary::from_ratings(&ratings),
  ))
}

/// Counts a play. Signed-in players also get a play record and progress
/// towards play achievements.
#[openapi(tag = "Arcadia")]
#[post("/games/<id>/plays")]
pub async fn create_play(id: Uuid, viewer: Viewer, db_conn: DbConn) -> MutationResponse<PlayView> {
  let user_id = viewer.user_id();

  let (play_count, earned) = db_conn
    .run(move |conn| {
      Game::find_published(&id)
        .select(games::id)
        .first::<Uuid>(conn)?;

      let play_count = Game::increment_play_count(&id, conn)?;

      let earned = match user_id {
        Some(user_id) => {
          diesel::insert_into(game_plays::table)
            .values(GamePlayChangeset::default().user_id(user_id).game_id(id))
            .execute(conn)?;

          achievements::evaluate(
            conn,
            &user_id,
            Trigger::new(AchievementCriteria::Plays, Some(id)),
          )?
        }
        None => vec![],
      };

      Ok::<_, LedgerError>((play_count, earned))
    })
    .await?;

  Response::success(PlayView {
    play_count,
    achievements: earned.into_iter().map(AchievementView::from).collect(),
  })
}
