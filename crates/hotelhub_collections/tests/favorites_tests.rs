use hotelhub_collections::{FavoriteError, FavoriteService, PageQuery};
use hotelhub_common::BoxFuture;
use hotelhub_config::CollectionsConfig;
use hotelhub_db::{
    DbClient, DbError, Favorite, FavoriteStore, Hotel, HotelCatalog, HotelImages, LocationInfo,
    MemoryStore, SqlFavoriteRepository, SqlHotelCatalog,
};
use std::collections::HashMap;
use std::sync::Arc;

fn hotel(id: &str) -> Hotel {
    Hotel {
        id: id.to_string(),
        hotel_name_cn: Some(format!("Hotel {}", id)),
        location_info: Some(LocationInfo {
            formatted_address: Some(format!("{} Main St", id)),
        }),
        star_rating: Some(4.0),
        main_image_url: Some(HotelImages::Many(vec![format!("{}.jpg", id)])),
        min_price: Some(300.0),
    }
}

fn memory_service() -> (FavoriteService, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let service = FavoriteService::new(store.clone(), store.clone(), &CollectionsConfig::default());
    (service, store)
}

#[tokio::test]
async fn test_add_twice_yields_one_row_and_a_duplicate() {
    let (service, store) = memory_service();

    let added = service.add_favorite("u1", "h1").await.unwrap();
    let second = service.add_favorite("u1", "h1").await;

    assert_eq!(
        second,
        Err(FavoriteError::DuplicateFavorite {
            hotel_id: "h1".to_string()
        })
    );
    let (total, rows) = store.find_and_count("u1", 10, 0).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0].id, added.favorite_id);
}

#[tokio::test]
async fn test_remove_after_remove_is_not_found() {
    let (service, _) = memory_service();
    service.add_favorite("u1", "h1").await.unwrap();

    let removed = service.remove_favorite("u1", "h1").await.unwrap();
    assert_eq!(removed.hotel_id, "h1");

    let again = service.remove_favorite("u1", "h1").await;
    assert_eq!(
        again,
        Err(FavoriteError::FavoriteNotFound {
            hotel_id: "h1".to_string()
        })
    );
}

#[tokio::test]
async fn test_twelve_favorites_with_one_missing_hotel() {
    let (service, store) = memory_service();
    for i in 1..=12 {
        let id = format!("H{}", i);
        if i != 7 {
            store.insert_hotel(hotel(&id)).unwrap();
        }
        service.add_favorite("u1", &id).await.unwrap();
    }

    let page = service
        .list_favorites("u1", &PageQuery::new(Some("2"), Some("10")))
        .await
        .unwrap();
    assert_eq!(page.total, 12);
    assert_eq!(page.page, 2);
    assert_eq!(page.page_size, 10);
    assert_eq!(page.list.len(), 2);
    // Newest first, so the second page holds the two oldest
    let ids: Vec<_> = page.list.iter().map(|item| item.hotel_id.as_str()).collect();
    assert_eq!(ids, vec!["H2", "H1"]);

    let first = service
        .list_favorites("u1", &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(first.total, 12);
    assert_eq!(first.list.len(), 10);

    let missing = first
        .list
        .iter()
        .find(|item| item.hotel_id == "H7")
        .unwrap();
    assert_eq!(missing.hotel_name, "Unknown Hotel");
    assert_eq!(missing.hotel_address, "");
    assert_eq!(missing.hotel_star, 0.0);
    assert_eq!(missing.main_image_url, "");

    let present = first
        .list
        .iter()
        .find(|item| item.hotel_id == "H8")
        .unwrap();
    assert_eq!(present.hotel_name, "Hotel H8");
    assert_eq!(present.hotel_address, "H8 Main St");
    assert_eq!(present.main_image_url, "H8.jpg");
}

#[tokio::test]
async fn test_configured_unknown_hotel_name_is_used() {
    let store = Arc::new(MemoryStore::new());
    let config = CollectionsConfig {
        unknown_hotel_name: "未知酒店".to_string(),
        ..CollectionsConfig::default()
    };
    let service = FavoriteService::new(store.clone(), store.clone(), &config);
    service.add_favorite("u1", "gone").await.unwrap();

    let page = service
        .list_favorites("u1", &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(page.list[0].hotel_name, "未知酒店");
}

#[tokio::test]
async fn test_favorites_are_private_to_each_user() {
    let (service, _) = memory_service();
    service.add_favorite("u1", "h1").await.unwrap();
    service.add_favorite("u2", "h1").await.unwrap();

    let page = service
        .list_favorites("u2", &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);

    assert!(matches!(
        service.remove_favorite("u3", "h1").await,
        Err(FavoriteError::FavoriteNotFound { .. })
    ));
}

/// A store whose lookup never sees existing rows, as when two requests race
/// past the check. Only the insert constraint can catch the duplicate.
struct StaleLookupStore(MemoryStore);

impl FavoriteStore for StaleLookupStore {
    fn find_one<'a>(&'a self, _: &'a str, _: &'a str) -> BoxFuture<'a, Option<Favorite>, DbError> {
        Box::pin(async { Ok(None) })
    }

    fn find_and_count<'a>(
        &'a self,
        user_id: &'a str,
        limit: u32,
        offset: u64,
    ) -> BoxFuture<'a, (u64, Vec<Favorite>), DbError> {
        self.0.find_and_count(user_id, limit, offset)
    }

    fn create<'a>(&'a self, user_id: &'a str, hotel_id: &'a str) -> BoxFuture<'a, Favorite, DbError> {
        FavoriteStore::create(&self.0, user_id, hotel_id)
    }

    fn destroy_one<'a>(&'a self, favorite: &'a Favorite) -> BoxFuture<'a, (), DbError> {
        FavoriteStore::destroy_one(&self.0, favorite)
    }
}

#[tokio::test]
async fn test_store_constraint_catches_a_missed_duplicate() {
    let store = Arc::new(StaleLookupStore(MemoryStore::new()));
    let catalog = Arc::new(MemoryStore::new());
    let service = FavoriteService::new(store.clone(), catalog, &CollectionsConfig::default());

    service.add_favorite("u1", "h1").await.unwrap();
    let second = service.add_favorite("u1", "h1").await;

    assert!(matches!(second, Err(FavoriteError::DuplicateFavorite { .. })));
    let (total, _) = store.find_and_count("u1", 10, 0).await.unwrap();
    assert_eq!(total, 1);
}

/// Every call fails with a message that must not reach the caller.
struct BrokenStore;

const SECRET: &str = "connection refused by db-7.internal";

impl FavoriteStore for BrokenStore {
    fn find_one<'a>(&'a self, _: &'a str, _: &'a str) -> BoxFuture<'a, Option<Favorite>, DbError> {
        Box::pin(async { Err(DbError::QueryError(SECRET.to_string())) })
    }

    fn find_and_count<'a>(
        &'a self,
        _: &'a str,
        _: u32,
        _: u64,
    ) -> BoxFuture<'a, (u64, Vec<Favorite>), DbError> {
        Box::pin(async { Err(DbError::QueryError(SECRET.to_string())) })
    }

    fn create<'a>(&'a self, _: &'a str, _: &'a str) -> BoxFuture<'a, Favorite, DbError> {
        Box::pin(async { Err(DbError::QueryError(SECRET.to_string())) })
    }

    fn destroy_one<'a>(&'a self, _: &'a Favorite) -> BoxFuture<'a, (), DbError> {
        Box::pin(async { Err(DbError::QueryError(SECRET.to_string())) })
    }
}

impl HotelCatalog for BrokenStore {
    fn find_by_ids<'a>(&'a self, _: &'a [String]) -> BoxFuture<'a, HashMap<String, Hotel>, DbError> {
        Box::pin(async { Err(DbError::QueryError(SECRET.to_string())) })
    }
}

#[tokio::test]
async fn test_store_outages_become_unavailable_without_the_cause() {
    let broken = Arc::new(BrokenStore);
    let service = FavoriteService::new(broken.clone(), broken, &CollectionsConfig::default());

    let list = service
        .list_favorites("u1", &PageQuery::default())
        .await
        .unwrap_err();
    assert_eq!(list, FavoriteError::FavoriteListUnavailable);
    assert!(!list.to_string().contains(SECRET));

    let add = service.add_favorite("u1", "h1").await.unwrap_err();
    assert_eq!(add, FavoriteError::FavoriteAddUnavailable);
    assert!(!add.to_string().contains(SECRET));

    let remove = service.remove_favorite("u1", "h1").await.unwrap_err();
    assert_eq!(remove, FavoriteError::FavoriteRemoveUnavailable);
}

#[tokio::test]
async fn test_catalog_outage_fails_the_listing() {
    let store = Arc::new(MemoryStore::new());
    let service = FavoriteService::new(store, Arc::new(BrokenStore), &CollectionsConfig::default());
    service.add_favorite("u1", "h1").await.unwrap();

    let result = service.list_favorites("u1", &PageQuery::default()).await;
    assert_eq!(result, Err(FavoriteError::FavoriteListUnavailable));
}

#[tokio::test]
async fn test_sql_backed_service_end_to_end() {
    let client = DbClient::from_url("sqlite::memory:").await.unwrap();
    let favorites = Arc::new(SqlFavoriteRepository::new(client.clone()));
    let catalog = Arc::new(SqlHotelCatalog::new(client));
    favorites.init_schema().await.unwrap();
    catalog.init_schema().await.unwrap();
    catalog.upsert(&hotel("h1")).await.unwrap();

    let service = FavoriteService::new(favorites, catalog, &CollectionsConfig::default());
    service.add_favorite("u1", "h1").await.unwrap();
    service.add_favorite("u1", "h2").await.unwrap();
    assert!(matches!(
        service.add_favorite("u1", "h1").await,
        Err(FavoriteError::DuplicateFavorite { .. })
    ));

    let page = service
        .list_favorites("u1", &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.list[0].hotel_id, "h2");
    assert_eq!(page.list[0].hotel_name, "Unknown Hotel");
    assert_eq!(page.list[1].hotel_name, "Hotel h1");
    assert_eq!(page.list[1].hotel_star, 4.0);

    service.remove_favorite("u1", "h2").await.unwrap();
    let page = service
        .list_favorites("u1", &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn test_sql_catalog_tolerates_partially_filled_hotels() {
    let client = DbClient::from_url("sqlite::memory:").await.unwrap();
    let favorites = Arc::new(SqlFavoriteRepository::new(client.clone()));
    let catalog = Arc::new(SqlHotelCatalog::new(client));
    favorites.init_schema().await.unwrap();
    catalog.init_schema().await.unwrap();
    catalog
        .upsert(&Hotel {
            hotel_name_cn: Some("Only a name".to_string()),
            ..Hotel::new("h1")
        })
        .await
        .unwrap();

    let service = FavoriteService::new(favorites, catalog, &CollectionsConfig::default());
    service.add_favorite("u1", "h1").await.unwrap();

    let page = service
        .list_favorites("u1", &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    let item = &page.list[0];
    assert_eq!(item.hotel_name, "Only a name");
    assert_eq!(item.hotel_address, "");
    assert_eq!(item.hotel_star, 0.0);
    assert_eq!(item.main_image_url, "");
}
