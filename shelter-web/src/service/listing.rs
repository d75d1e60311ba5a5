//! listing service

use std::collections::HashMap;
use std::time::Duration;

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, TransactionTrait};
use shelter_common::{FilterSpec, Metadata, QueryPlan, Resource};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};
use validator::ValidationErrors;

use crate::repo::sea::{Fetched, SeaRepo, TotalStrategy};

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("store error: {0}")]
    Store(#[from] DbErr),
    #[error("query exceeded {0:?}")]
    Timeout(Duration),
    #[error("listing cancelled")]
    Cancelled,
}

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("invalid listing parameters")]
    Rejected(#[from] ValidationErrors),
    #[error(transparent)]
    Failed(#[from] ExecutionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingConfig {
    pub query_timeout: Duration,
    pub total_strategy: TotalStrategy,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            query_timeout: Duration::from_secs(3),
            total_strategy: TotalStrategy::Window,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<T> {
    pub records: Vec<T>,
    pub metadata: Metadata,
}

/// Runs validate → plan → execute → summarize for any [`Resource`] entity.
///
/// Holds only borrowed request-scoped state, so one instance per request is
/// the intended use.
pub struct ListingService<'a, C> {
    db: &'a C,
    config: ListingConfig,
    cancel: Option<CancellationToken>,
}

impl<'a, C> ListingService<'a, C>
where
    C: ConnectionTrait + TransactionTrait,
{
    pub fn new(db: &'a C, config: ListingConfig) -> Self {
        Self {
            db,
            config,
            cancel: None,
        }
    }

    /// Aborts the in-flight read as soon as `token` is cancelled.
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Lists `E` from raw query-string parameters. Paging and sort come from
    /// `page`, `page_size` and `sort`; the resource's search fields supply the
    /// predicates.
    pub async fn list<E>(
        &self,
        query: &HashMap<String, String>,
    ) -> Result<Listing<E::Model>, ListingError>
    where
        E: Resource + EntityTrait,
    {
        let spec = match FilterSpec::<E::Sort>::from_query(query) {
            Ok(spec) => spec,
            Err(errors) => {
                debug!(resource = E::PLURAL, ?errors, "listing rejected");
                return Err(ListingError::Rejected(errors));
            }
        };
        self.list_spec::<E>(&spec, query).await
    }

    /// Lists `E` from an already validated specification.
    pub async fn list_spec<E>(
        &self,
        spec: &FilterSpec<E::Sort>,
        query: &HashMap<String, String>,
    ) -> Result<Listing<E::Model>, ListingError>
    where
        E: Resource + EntityTrait,
    {
        let plan = E::plan(spec, query);
        debug!(
            resource = E::PLURAL,
            sort = %spec.sort(),
            limit = plan.limit(),
            offset = plan.offset(),
            predicates = plan.active_predicates().count(),
            "listing planned"
        );
        let fetched = match self.execute::<E>(&plan).await {
            Ok(fetched) => fetched,
            Err(e) => {
                error!(resource = E::PLURAL, error = %e, "listing failed");
                return Err(ListingError::Failed(e));
            }
        };
        let metadata = Metadata::calculate(fetched.total_records, spec.page(), spec.page_size());
        if metadata.is_out_of_range() {
            debug!(
                resource = E::PLURAL,
                page = metadata.current_page,
                last_page = metadata.last_page,
                "page past the end"
            );
        }
        debug!(
            resource = E::PLURAL,
            returned = fetched.records.len(),
            total = metadata.total_records,
            last_page = metadata.last_page,
            "listing done"
        );
        Ok(Listing {
            records: fetched.records,
            metadata,
        })
    }

    async fn execute<E>(&self, plan: &QueryPlan) -> Result<Fetched<E::Model>, ExecutionError>
    where
        E: EntityTrait,
    {
        let limit = self.config.query_timeout;
        let read = tokio::time::timeout(
            limit,
            SeaRepo::page_with_plan::<E, C>(self.db, plan, self.config.total_strategy),
        );
        let res = match &self.cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => return Err(ExecutionError::Cancelled),
                res = read => res,
            },
            None => read.await,
        };
        Ok(res.map_err(|_| ExecutionError::Timeout(limit))??)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::model::food;
    use crate::repo::sea::tests::{memory_db, seed_foods};
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_list_end_to_end() {
        let db = memory_db().await;
        seed_foods(
            &db,
            &[("apple", "fruit", 1), ("banana", "fruit", 2), ("cherry", "fruit", 3)],
        )
        .await;
        let service = ListingService::new(&db, ListingConfig::default());
        let listing = service
            .list::<food::Entity>(&query(&[("sort", "-name"), ("page", "1"), ("page_size", "2")]))
            .await
            .unwrap();
        let names: Vec<_> = listing.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["cherry", "banana"]);
        assert_eq!(
            listing.metadata,
            Metadata {
                current_page: 1,
                page_size: 2,
                first_page: 1,
                last_page: 2,
                total_records: 3,
            }
        );
    }

    #[tokio::test]
    async fn test_over_paging_reports_bounds() {
        let db = memory_db().await;
        seed_foods(&db, &[("a", "x", 1), ("b", "x", 1), ("c", "x", 1)]).await;
        let service = ListingService::new(&db, ListingConfig::default());
        let listing = service
            .list::<food::Entity>(&query(&[("page", "10"), ("page_size", "2")]))
            .await
            .unwrap();
        assert!(listing.records.is_empty());
        assert_eq!(listing.metadata.total_records, 3);
        assert_eq!(listing.metadata.last_page, 2);
        assert!(listing.metadata.is_out_of_range());
    }

    #[tokio::test]
    async fn test_empty_result_is_not_error() {
        let db = memory_db().await;
        let service = ListingService::new(&db, ListingConfig::default());
        let listing = service
            .list::<food::Entity>(&query(&[("name", "ghost")]))
            .await
            .unwrap();
        assert!(listing.records.is_empty());
        assert_eq!(listing.metadata, Metadata::default());
    }

    #[tokio::test]
    async fn test_rejected_without_store_access() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = ListingService::new(&db, ListingConfig::default());
        let err = service
            .list::<food::Entity>(&query(&[("sort", "price"), ("page_size", "0")]))
            .await
            .unwrap_err();
        let errors = match err {
            ListingError::Rejected(errors) => errors,
            other => panic!("expected rejection, got {other:?}"),
        };
        let messages = shelter_common::error_messages(&errors);
        assert_eq!(messages["sort"], "invalid sort value");
        assert_eq!(messages["page_size"], "must be greater than zero");
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn test_single_round_trip() {
        const TOTAL: &str = crate::repo::sea::TOTAL_RECORDS;
        let row = |id: i32, name: &str| {
            BTreeMap::from([
                ("id".to_string(), Value::from(id)),
                ("name".to_string(), Value::from(name)),
                ("type".to_string(), Value::from("fruit")),
                ("quantity".to_string(), Value::from(1)),
                ("shelter".to_string(), Value::from("north")),
                (TOTAL.to_string(), Value::from(3_i64)),
            ])
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(3, "cherry"), row(2, "banana")]])
            .into_connection();
        let service = ListingService::new(&db, ListingConfig::default());
        let listing = service
            .list::<food::Entity>(&query(&[("sort", "-name"), ("page_size", "2")]))
            .await
            .unwrap();
        assert_eq!(listing.records.len(), 2);
        assert_eq!(listing.metadata.total_records, 3);
        assert_eq!(listing.metadata.last_page, 2);

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains("COUNT(*) OVER()"), "{sql}");
        assert!(sql.contains(r#"ORDER BY \"name\" DESC, \"id\" ASC"#), "{sql}");
        assert!(sql.contains("LIMIT"), "{sql}");
    }

    #[tokio::test]
    async fn test_scan_failure_discards_page() {
        // second row is missing its columns
        let good = BTreeMap::from([
            ("id".to_string(), Value::from(1)),
            ("name".to_string(), Value::from("apple")),
            ("type".to_string(), Value::from("fruit")),
            ("quantity".to_string(), Value::from(1)),
            ("shelter".to_string(), Value::from("north")),
            ("total_records".to_string(), Value::from(2_i64)),
        ]);
        let bad = BTreeMap::from([("total_records".to_string(), Value::from(2_i64))]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![good, bad]])
            .into_connection();
        let service = ListingService::new(&db, ListingConfig::default());
        let err = service.list::<food::Entity>(&HashMap::new()).await.unwrap_err();
        assert!(matches!(err, ListingError::Failed(ExecutionError::Store(_))));
    }

    #[tokio::test]
    async fn test_store_error_is_failed() {
        // no query results queued, so the read itself errors
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = ListingService::new(&db, ListingConfig::default());
        let err = service.list::<food::Entity>(&HashMap::new()).await.unwrap_err();
        assert!(matches!(err, ListingError::Failed(ExecutionError::Store(_))));
    }

    #[tokio::test]
    async fn test_cancelled_before_read() {
        let db = memory_db().await;
        let token = CancellationToken::new();
        token.cancel();
        let service = ListingService::new(&db, ListingConfig::default()).with_cancel(token);
        let err = service.list::<food::Entity>(&HashMap::new()).await.unwrap_err();
        assert!(matches!(err, ListingError::Failed(ExecutionError::Cancelled)));
    }

    #[tokio::test]
    async fn test_timeout() {
        let db = memory_db().await;
        let config = ListingConfig {
            query_timeout: Duration::ZERO,
            ..Default::default()
        };
        let service = ListingService::new(&db, config);
        match service.list::<food::Entity>(&HashMap::new()).await {
            Err(ListingError::Failed(ExecutionError::Timeout(limit))) => {
                assert_eq!(limit, Duration::ZERO)
            }
            // a zero deadline may still race a read that is immediately ready
            Ok(listing) => assert!(listing.records.is_empty()),
            Err(e) => panic!("unexpected error: {e:?}"),
        }
    }
}
