use crate::{
    database::MongoDB,
    models::PointRecord,
    services::admin_service::{self, UserStore},
    utils::error::AppError,
};
use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};

const COLLECTION: &str = "point_records";

#[async_trait]
pub trait PointRecordStore: Send + Sync {
    async fn find_point_record(&self, record_id: &str) -> Result<Option<PointRecord>, AppError>;
}

#[async_trait]
impl PointRecordStore for MongoDB {
    async fn find_point_record(&self, record_id: &str) -> Result<Option<PointRecord>, AppError> {
        // A malformed id cannot match any stored record.
        let oid = match ObjectId::parse_str(record_id) {
            Ok(oid) => oid,
            Err(_) => return Ok(None),
        };

        let collection = self.collection::<PointRecord>(COLLECTION);

        collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

/// Three gates, short-circuiting on the first failure:
/// admin check, id validation, then the fetch itself. Non-admin callers
/// are refused before the record store is touched, so nothing about the
/// record's existence leaks to them.
pub async fn get_record_detail<S>(
    store: &S,
    caller_open_id: &str,
    record_id: &str,
) -> Result<PointRecord, AppError>
where
    S: UserStore + PointRecordStore + ?Sized,
{
    if !admin_service::is_admin(store, caller_open_id).await? {
        return Err(AppError::Unauthorized("admin privilege required".into()));
    }

    if record_id.is_empty() {
        return Err(AppError::Validation("record_id is required".into()));
    }

    store
        .find_point_record(record_id)
        .await?
        .ok_or_else(|| AppError::NotFound("point record not found".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubStore {
        admins: Vec<String>,
        records: Vec<PointRecord>,
        record_fetches: AtomicUsize,
    }

    impl StubStore {
        fn new(admins: &[&str], records: Vec<PointRecord>) -> Self {
            Self {
                admins: admins.iter().map(|s| s.to_string()).collect(),
                records,
                record_fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl UserStore for StubStore {
        async fn find_user_by_open_id(&self, open_id: &str) -> Result<Option<User>, AppError> {
            Ok(Some(User {
                id: None,
                open_id: open_id.into(),
                display_name: None,
                avatar_url: None,
                total_points: 0,
                is_admin: self.admins.iter().any(|a| a == open_id),
            }))
        }
    }

    #[async_trait]
    impl PointRecordStore for StubStore {
        async fn find_point_record(
            &self,
            record_id: &str,
        ) -> Result<Option<PointRecord>, AppError> {
            self.record_fetches.fetch_add(1, Ordering::SeqCst);
            let oid = ObjectId::parse_str(record_id).ok();
            Ok(self
                .records
                .iter()
                .find(|r| r.id == oid && oid.is_some())
                .cloned())
        }
    }

    fn record(id: ObjectId) -> PointRecord {
        PointRecord {
            id: Some(id),
            open_id: "o-submitter".into(),
            submitted_at: 1_700_000_000,
            status: "approved".into(),
            points: Some(10),
            remark: Some("checked in".into()),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn non_admin_is_refused_before_any_record_fetch() {
        let id = ObjectId::new();
        let store = StubStore::new(&[], vec![record(id)]);

        let err = get_record_detail(&store, "o-plain", &id.to_hex())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized(_)));
        assert_eq!(store.record_fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_record_id_fails_validation_after_authz() {
        let store = StubStore::new(&["o-admin"], vec![]);

        let err = get_record_detail(&store, "o-admin", "").await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.record_fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn admin_with_missing_record_gets_not_found() {
        let store = StubStore::new(&["o-admin"], vec![]);

        let err = get_record_detail(&store, "o-admin", &ObjectId::new().to_hex())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(store.record_fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn admin_gets_the_exact_stored_document() {
        let id = ObjectId::new();
        let stored = record(id);
        let store = StubStore::new(&["o-admin"], vec![stored.clone()]);

        let fetched = get_record_detail(&store, "o-admin", &id.to_hex())
            .await
            .unwrap();

        assert_eq!(fetched, stored);
    }
}
