use serde::Serialize;

use crate::domain::RawRecord;
use crate::error::MorphoError;
use crate::neuromorpho::PageClient;

/// Why pagination stopped. Exposed so callers can tell end-of-data apart
/// from a truncated retrieval; both still yield whatever was collected.
#[derive(Debug)]
pub enum StopReason {
    /// Every page up to the configured maximum was retrieved.
    PageLimit,
    /// The service signalled end-of-data (empty page or missing collection).
    EndOfData { page: usize },
    /// A page failed; records from earlier pages are kept.
    Failed { page: usize, error: MorphoError },
}

impl StopReason {
    pub fn label(&self) -> &'static str {
        match self {
            StopReason::PageLimit => "page_limit",
            StopReason::EndOfData { .. } => "end_of_data",
            StopReason::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RetrievalSummary {
    pub pages_fetched: usize,
    pub stop_reason: &'static str,
    pub records: usize,
}

/// Result of a full paginated retrieval. Never an `Err`: a failed page
/// degrades to a shorter collection with the failure in `stop`.
#[derive(Debug)]
pub struct Collection {
    pub records: Vec<RawRecord>,
    pub pages_fetched: usize,
    pub stop: StopReason,
}

impl Collection {
    pub fn summary(&self) -> RetrievalSummary {
        RetrievalSummary {
            pages_fetched: self.pages_fetched,
            stop_reason: self.stop.label(),
            records: self.records.len(),
        }
    }
}

pub struct PaginatedCollector<C> {
    client: C,
    max_pages: usize,
    page_size: usize,
}

impl<C: PageClient> PaginatedCollector<C> {
    pub fn new(client: C, max_pages: usize, page_size: usize) -> Self {
        Self {
            client,
            max_pages,
            page_size,
        }
    }

    /// Walks pages 0..max_pages in order. Each page's outcome gates the
    /// next request, so retrieval is strictly sequential. Exact duplicate
    /// records are dropped, insertion order is preserved.
    pub fn collect(&self) -> Collection {
        let mut records: Vec<RawRecord> = Vec::new();
        let mut pages_fetched = 0;

        let stop = 'pages: {
            for page in 0..self.max_pages {
                match self.client.fetch_page(page, self.page_size) {
                    Ok(Some(batch)) if !batch.is_empty() => {
                        pages_fetched += 1;
                        tracing::debug!(page, count = batch.len(), "retrieved page");
                        for record in batch {
                            if !records.contains(&record) {
                                records.push(record);
                            }
                        }
                    }
                    Ok(_) => {
                        tracing::info!(page, "end of data");
                        break 'pages StopReason::EndOfData { page };
                    }
                    Err(error) => {
                        tracing::warn!(page, %error, "page failed, keeping partial results");
                        break 'pages StopReason::Failed { page, error };
                    }
                }
            }
            StopReason::PageLimit
        };

        Collection {
            records,
            pages_fetched,
            stop,
        }
    }
}
