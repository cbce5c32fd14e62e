//! The chain collaborator: where inputs, height and fee boxes come from.

use std::future::Future;

use nautilus_types::{ErgoBox, TokenId};
use serde::{Deserialize, Serialize};

use crate::error::ChainError;

/// Read access to chain state needed to assemble a transaction.
///
/// Every call is a snapshot; no retry happens behind it.
#[allow(async_fn_in_trait)]
pub trait ChainSource {
    /// Unspent boxes of the current wallet.
    async fn spendable_inputs(&self) -> Result<Vec<ErgoBox>, ChainError>;

    /// Height of the best block, if known.
    async fn current_height(&self) -> Result<Option<u32>, ChainError>;

    /// Unspent fee boxes that accept `token_id`.
    async fn fee_boxes(&self, token_id: &TokenId) -> Result<Vec<ErgoBox>, ChainError>;
}

// ── Pagination ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    pub offset: usize,
    pub limit: usize,
}

/// One page of an indexer listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

/// Fetch every page of a listing, `limit` items at a time.
///
/// Stops once `total` items are accumulated or a page comes back empty.
pub async fn paginate<T, E, F, Fut>(limit: usize, mut fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(PageParams) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let limit = limit.max(1);
    let mut params = PageParams { offset: 0, limit };
    let mut items = Vec::new();

    loop {
        let page = fetch(params).await?;
        let received = page.items.len();
        items.extend(page.items);

        if received == 0 || items.len() >= page.total {
            break;
        }
        params.offset += limit;
    }

    tracing::trace!(count = items.len(), "pagination complete");
    Ok(items)
}
