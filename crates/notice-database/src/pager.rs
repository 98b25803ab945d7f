//! Page slicing and counting over an equality filter template.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use notice_core::types::filter::{FilterField, FilterValue};
use notice_core::types::pagination::PageRequest;
use notice_core::types::sorting::SortField;

/// Fetch one page of `table` matching `filter`, ordered by `order`,
/// together with the total number of matching rows.
///
/// `table` and the field names in `filter`/`order` are spliced into the SQL
/// and must be trusted identifiers. Values are always bound.
pub async fn paginate<T>(
    pool: &PgPool,
    table: &str,
    filter: &[FilterField],
    order: &[SortField],
    page: &PageRequest,
) -> Result<(Vec<T>, u64), sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut count = count_query(table, filter);
    let total: i64 = count.build_query_scalar::<i64>().fetch_one(pool).await?;
    if total == 0 {
        return Ok((Vec::new(), 0));
    }

    let mut select = select_query(table, filter, order, page);
    let items = select.build_query_as::<T>().fetch_all(pool).await?;

    Ok((items, u64::try_from(total).unwrap_or_default()))
}

fn count_query<'a>(table: &str, filter: &[FilterField]) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {table}"));
    push_filter(&mut builder, filter);
    builder
}

fn select_query<'a>(
    table: &str,
    filter: &[FilterField],
    order: &[SortField],
    page: &PageRequest,
) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT * FROM {table}"));
    push_filter(&mut builder, filter);
    if !order.is_empty() {
        let terms: Vec<String> = order.iter().map(SortField::to_sql).collect();
        builder.push(" ORDER BY ").push(terms.join(", "));
    }
    builder
        .push(" LIMIT ")
        .push_bind(to_sql_bigint(page.limit()))
        .push(" OFFSET ")
        .push_bind(to_sql_bigint(page.offset()));
    builder
}

/// `LIMIT`/`OFFSET` bind as BIGINT; out-of-range values saturate.
fn to_sql_bigint(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &[FilterField]) {
    for (i, condition) in filter.iter().enumerate() {
        builder
            .push(if i == 0 { " WHERE " } else { " AND " })
            .push(&condition.field)
            .push(" = ");
        match &condition.value {
            FilterValue::String(v) => builder.push_bind(v.clone()),
            FilterValue::Integer(v) => builder.push_bind(*v),
            FilterValue::Boolean(v) => builder.push_bind(*v),
        };
    }
}
