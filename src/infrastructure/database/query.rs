//! Bounded list queries and date predicates over SeaORM selects

use chrono::Utc;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, IdenStatic, Iterable, PaginatorTrait,
    QuerySelect, Select,
};
use tracing::debug;

use crate::shared::{
    compute_pagination, compute_pagination_meta, DateRangeFilter, InfraError, PaginationMeta,
    PaginationRequest,
};

/// Items of one page plus page metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

/// Count all rows matching `select`, then fetch the requested page of them.
pub async fn paginate_select<E, C>(
    select: Select<E>,
    request: &PaginationRequest,
    default_limit: u64,
    conn: &C,
) -> Result<Paginated<E::Model>, DbErr>
where
    E: EntityTrait,
    E::Model: Send + Sync + 'static,
    C: ConnectionTrait,
{
    let bounds = compute_pagination(request, default_limit);

    let total = select.clone().count(conn).await?;
    let items = select
        .offset(bounds.skip)
        .limit(bounds.take)
        .all(conn)
        .await?;

    debug!(
        table = E::default().table_name(),
        total,
        page = bounds.page,
        limit = bounds.limit,
        returned = items.len(),
        "page query executed"
    );

    Ok(Paginated {
        items,
        meta: compute_pagination_meta(total, bounds.page, bounds.limit),
    })
}

/// Translate a date range filter into a condition on the matching column of `E`.
///
/// The field may be spelled like the column (`created_at`) or in camelCase
/// (`createdAt`). Bounds are bound in UTC so they compare correctly against
/// `DateTimeUtc` columns stored as text.
pub fn date_range_condition<E: EntityTrait>(
    filter: &DateRangeFilter,
) -> Result<Condition, InfraError> {
    let column = resolve_column::<E>(filter.field()).ok_or_else(|| InfraError::UnknownColumn {
        entity: E::default().table_name().to_string(),
        field: filter.field().to_string(),
    })?;

    let mut condition = Condition::all();
    if let Some(gte) = filter.gte() {
        condition = condition.add(column.gte(gte.with_timezone(&Utc)));
    }
    if let Some(lte) = filter.lte() {
        condition = condition.add(column.lte(lte.with_timezone(&Utc)));
    }
    Ok(condition)
}

fn resolve_column<E: EntityTrait>(field: &str) -> Option<E::Column> {
    let snake = to_snake_case(field);
    E::Column::iter().find(|column| column.as_str() == field || column.as_str() == snake)
}

fn to_snake_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for ch in field.chars() {
        if ch.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{DateTime, Local, NaiveDate, TimeZone};
    use sea_orm::{
        Database, DatabaseBackend, DatabaseConnection, EntityTrait, MockDatabase, QueryFilter,
        QueryOrder, QueryTrait, Schema, Set, Value,
    };

    use super::*;
    use crate::shared::{build_date_range_filter, DEFAULT_DATE_FIELD};

    mod invoice {
        use sea_orm::entity::prelude::*;

        #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
        #[sea_orm(table_name = "invoices")]
        pub struct Model {
            #[sea_orm(primary_key)]
            pub id: i32,
            pub number: String,
            pub due_date: DateTimeUtc,
            pub created_at: DateTimeUtc,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {}

        impl ActiveModelBehavior for ActiveModel {}
    }

    fn invoice(id: i32) -> invoice::Model {
        invoice::Model {
            id,
            number: format!("INV-{id:04}"),
            due_date: Utc::now(),
            created_at: Utc::now(),
        }
    }

    fn count_row(total: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(total)))])
    }

    #[tokio::test]
    async fn fetches_requested_page_with_meta() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(23)]])
            .append_query_results([vec![invoice(11), invoice(12), invoice(13)]])
            .into_connection();

        let page = paginate_select(
            invoice::Entity::find().order_by_asc(invoice::Column::Id),
            &PaginationRequest::new(2, 10),
            10,
            &db,
        )
        .await
        .unwrap();

        assert_eq!(page.items.len(), 3);
        assert_eq!(page.items[0].number, "INV-0011");
        assert_eq!(page.meta.total, 23);
        assert_eq!(page.meta.total_pages, 3);
        assert!(page.meta.has_next);
        assert!(page.meta.has_prev);

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 2);
        let fetch = format!("{:?}", log[1]);
        assert!(fetch.contains("LIMIT"), "{fetch}");
        assert!(fetch.contains("OFFSET"), "{fetch}");
    }

    #[tokio::test]
    async fn empty_table_reports_single_page() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(0)]])
            .append_query_results([Vec::<invoice::Model>::new()])
            .into_connection();

        let page = paginate_select(invoice::Entity::find(), &PaginationRequest::default(), 10, &db)
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.meta.total_pages, 1);
        assert!(!page.meta.has_next);
        assert_eq!(page.meta.limit, 10);
    }

    #[test]
    fn camel_case_field_resolves_to_column() {
        let day = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let filter = build_date_range_filter(Some(day.into()), Some(day.into()), "dueDate").unwrap();

        let condition = date_range_condition::<invoice::Entity>(&filter).unwrap();
        let sql = invoice::Entity::find()
            .filter(condition)
            .build(DatabaseBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#""invoices"."due_date" >="#), "{sql}");
        assert!(sql.contains(r#""invoices"."due_date" <="#), "{sql}");
    }

    #[test]
    fn one_sided_filter_adds_one_predicate() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let filter = build_date_range_filter(Some(day.into()), None, DEFAULT_DATE_FIELD).unwrap();

        let condition = date_range_condition::<invoice::Entity>(&filter).unwrap();
        let sql = invoice::Entity::find()
            .filter(condition)
            .build(DatabaseBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#""invoices"."created_at" >="#), "{sql}");
        assert!(!sql.contains("<="), "{sql}");
    }

    #[test]
    fn unknown_field_is_an_error() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let filter = build_date_range_filter(Some(day.into()), None, "paidAt").unwrap();

        let err = date_range_condition::<invoice::Entity>(&filter).unwrap_err();
        assert!(matches!(
            err,
            InfraError::UnknownColumn { ref entity, ref field } if entity == "invoices" && field == "paidAt"
        ));
    }

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        let naive = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap();
        Local
            .from_local_datetime(&naive)
            .earliest()
            .unwrap()
            .with_timezone(&Utc)
    }

    async fn sqlite_with_invoices(created: &[DateTime<Utc>]) -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        let backend = db.get_database_backend();
        let create = Schema::new(backend).create_table_from_entity(invoice::Entity);
        db.execute(backend.build(&create)).await.unwrap();

        let rows = created.iter().enumerate().map(|(i, at)| invoice::ActiveModel {
            id: Set(i as i32 + 1),
            number: Set(format!("INV-{:04}", i + 1)),
            due_date: Set(*at),
            created_at: Set(*at),
        });
        invoice::Entity::insert_many(rows).exec(&db).await.unwrap();
        db
    }

    #[tokio::test]
    async fn sqlite_rows_match_local_day_bounds() {
        // 01:00 local on the 10th may still be the 9th in UTC
        let inside_early = local(2024, 1, 10, 1, 0);
        let inside_late = local(2024, 1, 10, 23, 30);
        let before = local(2024, 1, 9, 23, 0);
        let after = local(2024, 1, 11, 0, 30);
        let db = sqlite_with_invoices(&[before, inside_early, inside_late, after]).await;

        let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let filter =
            build_date_range_filter(Some(day.into()), Some(day.into()), DEFAULT_DATE_FIELD).unwrap();
        let condition = date_range_condition::<invoice::Entity>(&filter).unwrap();

        let rows = invoice::Entity::find()
            .filter(condition)
            .order_by_asc(invoice::Column::Id)
            .all(&db)
            .await
            .unwrap();

        let numbers: Vec<&str> = rows.iter().map(|r| r.number.as_str()).collect();
        assert_eq!(numbers, ["INV-0002", "INV-0003"]);
        for at in [before, inside_early, inside_late, after] {
            assert_eq!(
                rows.iter().any(|r| r.created_at == at),
                filter.contains(&at),
                "{at}"
            );
        }
    }

    #[test]
    fn snake_case_conversion() {
        assert_eq!(to_snake_case("createdAt"), "created_at");
        assert_eq!(to_snake_case("due_date"), "due_date");
        assert_eq!(to_snake_case("lastServiceDate"), "last_service_date");
    }
}
