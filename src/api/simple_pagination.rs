// src/api/simple_pagination.rs
//! Cursor pagination over async closures.

use super::responses::PaginatedResponse;
use super::types::PaginationResult;
use crate::error::AppError;

/// Fetches every page by following `next_cursor` until it is absent.
///
/// Items come back in the order the pages were served. Any error aborts the
/// whole listing; partial results are discarded.
pub async fn fetch_all_pages_simple<T, F, Fut>(
    mut fetch_fn: F,
) -> Result<PaginationResult<T>, AppError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut all_items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        let response = fetch_fn(cursor).await?;

        cursor = response.next_cursor;
        all_items.extend(response.results);
        pages_fetched += 1;

        // `has_more` is advisory; the cursor alone decides
        if cursor.is_none() {
            break;
        }
    }

    Ok(PaginationResult {
        items: all_items,
        pages_fetched,
    })
}
