use chrono::{Duration, Utc};
use hotelhub_collections::{HistoryError, HistoryService, PageQuery};
use hotelhub_common::BoxFuture;
use hotelhub_config::CollectionsConfig;
use hotelhub_db::{
    DbClient, DbError, HistoryEntry, HistoryStore, Hotel, HotelImages, MemoryStore,
    NewHistoryEntry, SqlHistoryRepository, SqlHotelCatalog,
};
use std::sync::Arc;

fn view(user_id: &str, hotel_id: &str, minutes_ago: i64) -> NewHistoryEntry {
    NewHistoryEntry {
        user_id: user_id.to_string(),
        hotel_id: hotel_id.to_string(),
        viewed_at: Utc::now() - Duration::minutes(minutes_ago),
    }
}

fn memory_service() -> (HistoryService, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let service = HistoryService::new(store.clone(), store.clone(), &CollectionsConfig::default());
    (service, store)
}

#[tokio::test]
async fn test_list_nests_resolved_hotels_and_omits_unknown_ones() {
    let (service, store) = memory_service();
    store
        .insert_hotel(Hotel {
            hotel_name_cn: Some("Riverside".to_string()),
            star_rating: None,
            main_image_url: Some(HotelImages::One("river.jpg".to_string())),
            min_price: Some(199.0),
            ..Hotel::new("h1")
        })
        .unwrap();
    store.create(view("u1", "h1", 5)).await.unwrap();
    store.create(view("u1", "gone", 1)).await.unwrap();

    let page = service
        .list_history("u1", &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.list[0].hotel_id, "gone");
    assert!(page.list[0].hotel.is_none());

    let hotel = page.list[1].hotel.as_ref().unwrap();
    assert_eq!(hotel.name.as_deref(), Some("Riverside"));
    assert_eq!(hotel.star_rating, None);
    assert_eq!(hotel.address, "");
    assert_eq!(hotel.price, 199.0);
    assert_eq!(hotel.image, "river.jpg");
}

#[tokio::test]
async fn test_repeated_views_are_all_listed_in_view_order() {
    let (service, store) = memory_service();
    store.create(view("u1", "h1", 30)).await.unwrap();
    store.create(view("u1", "h2", 20)).await.unwrap();
    store.create(view("u1", "h1", 10)).await.unwrap();

    let page = service
        .list_history("u1", &PageQuery::new(Some("1"), Some("2")))
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    let hotels: Vec<_> = page.list.iter().map(|item| item.hotel_id.as_str()).collect();
    assert_eq!(hotels, vec!["h1", "h2"]);
}

#[tokio::test]
async fn test_cannot_remove_another_users_entry() {
    let (service, store) = memory_service();
    let theirs = store.create(view("u2", "h1", 0)).await.unwrap();

    let result = service.remove_history("u1", theirs.id).await;
    assert_eq!(
        result,
        Err(HistoryError::HistoryEntryNotFound {
            history_id: theirs.id
        })
    );
    assert!(store.find_one("u2", theirs.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_remove_own_entry_echoes_id() {
    let (service, store) = memory_service();
    let mine = store.create(view("u1", "h1", 0)).await.unwrap();

    let removed = service.remove_history("u1", mine.id).await.unwrap();
    assert_eq!(removed.history_id, mine.id);
    assert!(matches!(
        service.remove_history("u1", mine.id).await,
        Err(HistoryError::HistoryEntryNotFound { .. })
    ));
}

#[tokio::test]
async fn test_clearing_empty_history_succeeds() {
    let (service, _) = memory_service();
    let cleared = service.clear_history("u1").await.unwrap();
    assert_eq!(cleared.status, "success");
}

#[tokio::test]
async fn test_clear_only_touches_the_caller() {
    let (service, store) = memory_service();
    store.create(view("u1", "h1", 2)).await.unwrap();
    store.create(view("u1", "h2", 1)).await.unwrap();
    store.create(view("u2", "h1", 0)).await.unwrap();

    service.clear_history("u1").await.unwrap();

    let mine = service.list_history("u1", &PageQuery::default()).await.unwrap();
    let theirs = service.list_history("u2", &PageQuery::default()).await.unwrap();
    assert_eq!(mine.total, 0);
    assert!(mine.list.is_empty());
    assert_eq!(theirs.total, 1);
}

struct BrokenHistory;

const SECRET: &str = "disk I/O error at /var/lib/hotelhub";

impl HistoryStore for BrokenHistory {
    fn find_one<'a>(&'a self, _: &'a str, _: i64) -> BoxFuture<'a, Option<HistoryEntry>, DbError> {
        Box::pin(async { Err(DbError::QueryError(SECRET.to_string())) })
    }

    fn find_and_count<'a>(
        &'a self,
        _: &'a str,
        _: u32,
        _: u64,
    ) -> BoxFuture<'a, (u64, Vec<HistoryEntry>), DbError> {
        Box::pin(async { Err(DbError::QueryError(SECRET.to_string())) })
    }

    fn create(&self, _: NewHistoryEntry) -> BoxFuture<'_, HistoryEntry, DbError> {
        Box::pin(async { Err(DbError::QueryError(SECRET.to_string())) })
    }

    fn destroy_one<'a>(&'a self, _: &'a HistoryEntry) -> BoxFuture<'a, (), DbError> {
        Box::pin(async { Err(DbError::QueryError(SECRET.to_string())) })
    }

    fn destroy_many<'a>(&'a self, _: &'a str) -> BoxFuture<'a, u64, DbError> {
        Box::pin(async { Err(DbError::QueryError(SECRET.to_string())) })
    }
}

#[tokio::test]
async fn test_store_outages_map_to_operation_specific_errors() {
    let catalog = Arc::new(MemoryStore::new());
    let service = HistoryService::new(Arc::new(BrokenHistory), catalog, &CollectionsConfig::default());

    let list = service
        .list_history("u1", &PageQuery::default())
        .await
        .unwrap_err();
    assert_eq!(list, HistoryError::HistoryListUnavailable);
    assert!(!list.to_string().contains(SECRET));

    assert_eq!(
        service.remove_history("u1", 1).await,
        Err(HistoryError::HistoryRemoveUnavailable)
    );
    assert_eq!(
        service.clear_history("u1").await,
        Err(HistoryError::HistoryClearUnavailable)
    );
}

#[tokio::test]
async fn test_sql_backed_history() {
    let client = DbClient::from_url("sqlite::memory:").await.unwrap();
    let history = Arc::new(SqlHistoryRepository::new(client.clone()));
    let catalog = Arc::new(SqlHotelCatalog::new(client));
    history.init_schema().await.unwrap();
    catalog.init_schema().await.unwrap();
    catalog
        .upsert(&Hotel {
            hotel_name_cn: Some("Harbor View".to_string()),
            star_rating: Some(3.0),
            ..Hotel::new("h1")
        })
        .await
        .unwrap();

    let first = history.create(view("u1", "h1", 10)).await.unwrap();
    history.create(view("u1", "h9", 5)).await.unwrap();

    let service = HistoryService::new(history.clone(), catalog, &CollectionsConfig::default());
    let page = service
        .list_history("u1", &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total, 2);
    assert!(page.list[0].hotel.is_none());
    let hotel = page.list[1].hotel.as_ref().unwrap();
    assert_eq!(hotel.name.as_deref(), Some("Harbor View"));
    assert_eq!(hotel.star_rating, Some(3.0));
    assert_eq!(hotel.price, 0.0);

    service.remove_history("u1", first.id).await.unwrap();
    service.clear_history("u1").await.unwrap();
    let page = service
        .list_history("u1", &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total, 0);
}
