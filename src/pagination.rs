use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::query_builder::*;
use diesel::query_dsl::methods::LoadQuery;
use diesel::sql_types::BigInt;
use schemars::JsonSchema;
use serde::Serialize;

pub const DEFAULT_PER_PAGE: i64 = 24;

pub trait Paginate: Sized {
  fn paginate(self, page: i64) -> Paginated<Self>;
}

impl<T> Paginate for T {
  fn paginate(self, page: i64) -> Paginated<Self> {
    let page = page.max(1);

    Paginated {
      query: self,
      per_page: DEFAULT_PER_PAGE,
      page,
      offset: (page - 1) * DEFAULT_PER_PAGE,
    }
  }
}

#[derive(Debug, Clone, Copy, QueryId)]
pub struct Paginated<T> {
  query: T,
  page: i64,
  per_page: i64,
  offset: i64,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct PaginatedResult<T> {
  pub records: Vec<T>,
  pub page: i64,
  pub per_page: i64,
  pub total_pages: i64,
}

impl<T> PaginatedResult<T> {
  pub fn records<U>(self, records: Vec<U>) -> PaginatedResult<U> {
    PaginatedResult {
      records,
      page: self.page,
      per_page: self.per_page,
      total_pages: self.total_pages,
    }
  }
}

pub fn total_pages(total: i64, per_page: i64) -> i64 {
  if per_page <= 0 {
    return 0;
  }

  (total + per_page - 1) / per_page
}

impl<T> Paginated<T> {
  pub fn per_page(self, per_page: i64) -> Self {
    let per_page = per_page.clamp(1, 100);

    Paginated {
      per_page,
      offset: (self.page - 1) * per_page,
      ..self
    }
  }

  pub fn load_and_count_pages<'a, U>(
    self,
    conn: &mut PgConnection,
  ) -> QueryResult<PaginatedResult<U>>
  where
    Self: LoadQuery<'a, PgConnection, (U, i64)>,
  {
    let page = self.page;
    let per_page = self.per_page;
    let results = self.load::<(U, i64)>(conn)?;
    let total = results.first().map(|x| x.1).unwrap_or(0);
    let records = results.into_iter().map(|x| x.0).collect();

    Ok(PaginatedResult {
      records,
      page,
      per_page,
      total_pages: total_pages(total, per_page),
    })
  }
}

impl<T: Query> Query for Paginated<T> {
  type SqlType = (T::SqlType, BigInt);
}

impl<T> RunQueryDsl<PgConnection> for Paginated<T> {}

impl<T> QueryFragment<Pg> for Paginated<T>
where
  T: QueryFragment<Pg>,
{
  fn walk_ast<'b>(&'b self, mut out: AstPass<'_, 'b, Pg>) -> QueryResult<()> {
    out.push_sql("SELECT *, COUNT(*) OVER () FROM (");
    self.query.walk_ast(out.reborrow())?;
    out.push_sql(") t LIMIT ");
    out.push_bind_param::<BigInt, _>(&self.per_page)?;
    out.push_sql(" OFFSET ");
    out.push_bind_param::<BigInt, _>(&self.offset)?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn counts_partial_pages() {
    assert_eq!(total_pages(0, 24), 0);
    assert_eq!(total_pages(24, 24), 1);
    assert_eq!(total_pages(25, 24), 2);
  }

  #[test]
  fn pages_below_one_start_at_the_beginning() {
    let paginated = ().paginate(0).per_page(10);
    assert_eq!(paginated.page, 1);
    assert_eq!(paginated.offset, 0);

    let paginated = ().paginate(3).per_page(10);
    assert_eq!(paginated.offset, 20);
  }
}
