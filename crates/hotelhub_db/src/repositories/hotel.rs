//! Read access to the hotel catalog

use crate::error::DbError;
use crate::models::Hotel;
use hotelhub_common::BoxFuture;
use std::collections::HashMap;

/// The hotel catalog, owned elsewhere and only read here.
pub trait HotelCatalog: Send + Sync {
    /// Resolve a batch of hotel ids. Unknown ids are absent from the map.
    fn find_by_ids<'a>(&'a self, ids: &'a [String]) -> BoxFuture<'a, HashMap<String, Hotel>, DbError>;
}
