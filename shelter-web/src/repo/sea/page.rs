//! page reads

use serde::{Deserialize, Serialize};
use sea_orm::sea_query::{Alias, Expr, Func, Order, Query, SelectStatement};
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseTransaction, DbErr, EntityTrait, FromQueryResult, IsolationLevel, Iterable,
    QueryResult, TransactionTrait,
};
use shelter_common::{Direction, QueryPlan};

use super::SeaRepo;

pub const TOTAL_RECORDS: &str = "total_records";

/// How the total match count is obtained next to the page rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalStrategy {
    /// One query; every row carries `COUNT(*) OVER()`. A page past the end
    /// falls back to a count inside the same read-only transaction.
    #[default]
    Window,
    /// A count query and a page query inside one read-only transaction.
    Separate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched<M> {
    pub records: Vec<M>,
    pub total_records: u64,
}

impl<M> Fetched<M> {
    fn empty(total_records: u64) -> Self {
        Self {
            records: Vec::new(),
            total_records,
        }
    }
}

impl SeaRepo {
    /// Reads one page for `plan`. Either every row decodes or the whole page
    /// is discarded; no partial pages are returned.
    pub async fn page_with_plan<E, C>(
        db: &C,
        plan: &QueryPlan,
        strategy: TotalStrategy,
    ) -> Result<Fetched<E::Model>, DbErr>
    where
        E: EntityTrait,
        C: ConnectionTrait + TransactionTrait,
    {
        match strategy {
            TotalStrategy::Window if plan.offset() == 0 => window_page::<E, _>(db, plan).await,
            TotalStrategy::Window => {
                // past the last page the window count is gone with the rows,
                // so the fallback count must see the same snapshot
                let txn = read_only(db).await?;
                let mut fetched = window_page::<E, _>(&txn, plan).await?;
                if fetched.records.is_empty() {
                    fetched = Fetched::empty(count::<E, _>(&txn, plan).await?);
                }
                txn.commit().await?;
                Ok(fetched)
            }
            TotalStrategy::Separate => {
                let txn = read_only(db).await?;
                let total_records = count::<E, _>(&txn, plan).await?;
                let fetched = if total_records > plan.offset() {
                    let rows = txn.query_all(build::<E, _>(&txn, page_select::<E>(plan))).await?;
                    Fetched {
                        records: decode_rows::<E>(&rows)?,
                        total_records,
                    }
                } else {
                    Fetched::empty(total_records)
                };
                txn.commit().await?;
                Ok(fetched)
            }
        }
    }
}

async fn read_only<C: TransactionTrait>(db: &C) -> Result<DatabaseTransaction, DbErr> {
    db.begin_with_config(
        Some(IsolationLevel::RepeatableRead),
        Some(AccessMode::ReadOnly),
    )
    .await
}

async fn window_page<E, C>(db: &C, plan: &QueryPlan) -> Result<Fetched<E::Model>, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let mut select = page_select::<E>(plan);
    select.expr_as(Expr::cust("COUNT(*) OVER()"), Alias::new(TOTAL_RECORDS));
    let rows = db.query_all(build::<E, _>(db, select)).await?;
    let total_records = match rows.first() {
        Some(row) => read_total(row)?,
        None => 0,
    };
    Ok(Fetched {
        records: decode_rows::<E>(&rows)?,
        total_records,
    })
}

async fn count<E, C>(db: &C, plan: &QueryPlan) -> Result<u64, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let mut select = filtered::<E>(plan);
    select.expr_as(Expr::cust("COUNT(*)"), Alias::new(TOTAL_RECORDS));
    match db.query_one(build::<E, _>(db, select)).await? {
        Some(row) => read_total(&row),
        None => Ok(0),
    }
}

fn filtered<E: EntityTrait>(plan: &QueryPlan) -> SelectStatement {
    let mut select = Query::select();
    select.from(E::default());
    for predicate in plan.active_predicates() {
        select.and_where(
            Expr::expr(Func::lower(Expr::col(Alias::new(predicate.column))))
                .eq(Func::lower(Expr::val(predicate.value.clone()))),
        );
    }
    select
}

fn page_select<E: EntityTrait>(plan: &QueryPlan) -> SelectStatement {
    let mut select = filtered::<E>(plan);
    select.columns(E::Column::iter());
    for order in plan.order() {
        let direction = match order.direction {
            Direction::Asc => Order::Asc,
            Direction::Desc => Order::Desc,
        };
        select.order_by(Alias::new(order.column), direction);
    }
    select.limit(plan.limit()).offset(plan.offset());
    select
}

fn build<E, C>(db: &C, select: SelectStatement) -> sea_orm::Statement
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let stmt = db.get_database_backend().build(&select);
    tracing::trace!(table = E::default().table_name(), sql = %stmt, "page query");
    stmt
}

fn read_total(row: &QueryResult) -> Result<u64, DbErr> {
    let total: i64 = row.try_get("", TOTAL_RECORDS)?;
    u64::try_from(total).map_err(|e| DbErr::Type(format!("{TOTAL_RECORDS}: {e}")))
}

fn decode_rows<E: EntityTrait>(rows: &[QueryResult]) -> Result<Vec<E::Model>, DbErr> {
    rows.iter()
        .map(|row| E::Model::from_query_result(row, ""))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::model::{food, volunteer};
    use crate::repo::sea::tests::{memory_db, seed_foods};
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use shelter_common::{FilterSpec, ListParams, Resource};
    use std::collections::{BTreeMap, HashMap};

    fn plan_for<E: Resource>(page: i64, page_size: i64, sort: &str, search: &[(&str, &str)]) -> QueryPlan {
        let spec = FilterSpec::<E::Sort>::validate(&ListParams {
            page,
            page_size,
            sort: sort.to_string(),
        })
        .unwrap();
        let query: HashMap<String, String> = search
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        E::plan(&spec, &query)
    }

    fn names(records: &[food::Model]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    const FRUIT: &[(&str, &str, i32)] = &[
        ("apple", "Fruit", 3),
        ("banana", "fruit", 3),
        ("cherry", "FRUIT", 1),
    ];

    #[tokio::test]
    async fn test_window_page_desc() {
        let db = memory_db().await;
        seed_foods(&db, FRUIT).await;
        for strategy in [TotalStrategy::Window, TotalStrategy::Separate] {
            let plan = plan_for::<food::Entity>(1, 2, "-name", &[]);
            let fetched = SeaRepo::page_with_plan::<food::Entity, _>(&db, &plan, strategy)
                .await
                .unwrap();
            assert_eq!(names(&fetched.records), ["cherry", "banana"]);
            assert_eq!(fetched.total_records, 3);

            let plan = plan_for::<food::Entity>(2, 2, "-name", &[]);
            let fetched = SeaRepo::page_with_plan::<food::Entity, _>(&db, &plan, strategy)
                .await
                .unwrap();
            assert_eq!(names(&fetched.records), ["apple"]);
            assert_eq!(fetched.total_records, 3);
        }
    }

    #[tokio::test]
    async fn test_tie_break_by_id() {
        let db = memory_db().await;
        seed_foods(
            &db,
            &[("d", "x", 2), ("a", "x", 1), ("c", "x", 2), ("b", "x", 2)],
        )
        .await;
        let plan = plan_for::<food::Entity>(1, 10, "-quantity", &[]);
        let first = SeaRepo::page_with_plan::<food::Entity, _>(&db, &plan, TotalStrategy::Window)
            .await
            .unwrap();
        // quantity 2 rows keep insertion (id) order
        assert_eq!(names(&first.records), ["d", "c", "b", "a"]);
        let second = SeaRepo::page_with_plan::<food::Entity, _>(&db, &plan, TotalStrategy::Window)
            .await
            .unwrap();
        assert_eq!(first, second);

        let mut paged = Vec::new();
        for page in 1..=4 {
            let plan = plan_for::<food::Entity>(page, 1, "-quantity", &[]);
            let fetched =
                SeaRepo::page_with_plan::<food::Entity, _>(&db, &plan, TotalStrategy::Window)
                    .await
                    .unwrap();
            paged.extend(fetched.records);
        }
        assert_eq!(paged, first.records);
    }

    #[tokio::test]
    async fn test_case_insensitive_predicates() {
        let db = memory_db().await;
        seed_foods(&db, FRUIT).await;
        seed_foods(&db, &[("carrot", "vegetable", 9)]).await;

        let plan = plan_for::<food::Entity>(1, 20, "id", &[("type", "fRuIt")]);
        let fetched = SeaRepo::page_with_plan::<food::Entity, _>(&db, &plan, TotalStrategy::Window)
            .await
            .unwrap();
        assert_eq!(names(&fetched.records), ["apple", "banana", "cherry"]);
        assert_eq!(fetched.total_records, 3);

        let plan = plan_for::<food::Entity>(1, 20, "id", &[("name", "CARROT"), ("type", "")]);
        let fetched =
            SeaRepo::page_with_plan::<food::Entity, _>(&db, &plan, TotalStrategy::Separate)
                .await
                .unwrap();
        assert_eq!(names(&fetched.records), ["carrot"]);
        assert_eq!(fetched.total_records, 1);
    }

    #[tokio::test]
    async fn test_empty_predicate_matches_all() {
        let db = memory_db().await;
        seed_foods(&db, FRUIT).await;
        let omitted = plan_for::<food::Entity>(1, 20, "id", &[]);
        let empty = plan_for::<food::Entity>(1, 20, "id", &[("name", ""), ("type", "")]);
        let a = SeaRepo::page_with_plan::<food::Entity, _>(&db, &omitted, TotalStrategy::Window)
            .await
            .unwrap();
        let b = SeaRepo::page_with_plan::<food::Entity, _>(&db, &empty, TotalStrategy::Window)
            .await
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.records.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_table_and_over_paging() {
        let db = memory_db().await;
        for strategy in [TotalStrategy::Window, TotalStrategy::Separate] {
            let plan = plan_for::<volunteer::Entity>(1, 20, "-age", &[]);
            let fetched = SeaRepo::page_with_plan::<volunteer::Entity, _>(&db, &plan, strategy)
                .await
                .unwrap();
            assert!(fetched.records.is_empty());
            assert_eq!(fetched.total_records, 0);
        }

        seed_foods(&db, FRUIT).await;
        for strategy in [TotalStrategy::Window, TotalStrategy::Separate] {
            let plan = plan_for::<food::Entity>(10, 2, "id", &[]);
            let fetched = SeaRepo::page_with_plan::<food::Entity, _>(&db, &plan, strategy)
                .await
                .unwrap();
            assert!(fetched.records.is_empty());
            assert_eq!(fetched.total_records, 3);
        }
    }

    #[tokio::test]
    async fn test_over_paging_count_shares_transaction() {
        let count_row = BTreeMap::from([(TOTAL_RECORDS.to_string(), Value::from(3_i64))]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::new(), vec![count_row]])
            .into_connection();
        let plan = plan_for::<food::Entity>(10, 2, "id", &[]);
        let fetched = SeaRepo::page_with_plan::<food::Entity, _>(&db, &plan, TotalStrategy::Window)
            .await
            .unwrap();
        assert!(fetched.records.is_empty());
        assert_eq!(fetched.total_records, 3);

        // page and count logged as one transaction
        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains("COUNT(*) OVER()"), "{sql}");
        assert!(sql.contains("OFFSET"), "{sql}");
    }
}
