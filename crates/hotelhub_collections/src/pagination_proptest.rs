#[cfg(test)]
mod tests {
    use crate::favorites::FavoriteService;
    use crate::pagination::{ListDefaults, PageQuery, PageRequest};
    use hotelhub_config::CollectionsConfig;
    use hotelhub_db::MemoryStore;
    use proptest::prelude::*;
    use std::sync::Arc;

    // Expected number of items on page `page` of `total` items
    fn expected_len(total: u64, page: u32, page_size: u32) -> u64 {
        let skipped = u64::from(page - 1) * u64::from(page_size);
        total.saturating_sub(skipped).min(u64::from(page_size))
    }

    proptest! {
        #[test]
        fn test_resolved_values_are_positive(page in any::<i64>(), page_size in any::<i64>()) {
            let resolved = ListDefaults::default().resolve(&PageQuery::from_numbers(page, page_size));
            prop_assert!(resolved.page >= 1);
            prop_assert!(resolved.page_size >= 1);
            if page >= 1 && page <= i64::from(u32::MAX) {
                prop_assert_eq!(i64::from(resolved.page), page);
            }
        }

        #[test]
        fn test_offset_never_overflows(page in 1..=u32::MAX, page_size in 1..=u32::MAX) {
            let request = PageRequest { page, page_size };
            prop_assert_eq!(
                request.offset(),
                u64::from(page - 1) * u64::from(page_size)
            );
        }

        // N favorites, page size P: page k holds min(P, max(0, N - (k-1)P))
        // items and every page reports total N.
        #[test]
        fn test_page_sizes_match_arithmetic(
            total in 0usize..30,
            page_size in 1u32..8,
            page in 1u32..8,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let (reported_total, len) = rt.block_on(async {
                let store = Arc::new(MemoryStore::new());
                let service = FavoriteService::new(
                    store.clone(),
                    store.clone(),
                    &CollectionsConfig::default(),
                );
                for i in 0..total {
                    service.add_favorite("u1", &format!("h{}", i)).await.unwrap();
                }
                let listed = service
                    .list_favorites("u1", &PageQuery::from_numbers(i64::from(page), i64::from(page_size)))
                    .await
                    .unwrap();
                (listed.total, listed.list.len() as u64)
            });

            prop_assert_eq!(reported_total, total as u64);
            prop_assert_eq!(len, expected_len(total as u64, page, page_size));
        }
    }
}
