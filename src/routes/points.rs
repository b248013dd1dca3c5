use crate::guards::{Auth, DbConn, Jwt};
use crate::ledger;
use crate::models::User;
use crate::response::{QueryResponse, Response};
use crate::views::{PointTransactionView, PointsHistoryView};
use rocket_okapi::openapi;

const RECENT_TRANSACTIONS: i64 = 20;

#[openapi(tag = "Arcadia")]
#[get("/me/points")]
pub async fn get(auth: Auth<Jwt<User>>, db_conn: DbConn) -> QueryResponse<PointsHistoryView> {
  let user_id = auth.into_deep_inner().id;

  let (balance, transactions) = db_conn
    .run(move |conn| {
      let balance = ledger::balance(conn, &user_id)?;
      let transactions = ledger::recent_transactions(conn, &user_id, RECENT_TRANSACTIONS)?;

      Ok::<_, diesel::result::Error>((balance, transactions))
    })
    .await?;

  Response::success(PointsHistoryView {
    balance: balance.into(),
    transactions: transactions
      .into_iter()
      .map(PointTransactionView::from)
      .collect(),
  })
}
