pub mod enrichment;
pub mod paging;
pub mod search_pipeline;
pub mod use_cases;

pub use enrichment::{BookmarkAware, BookmarkEnricher, BookmarkedIds};
pub use paging::{LoadState, Pager, PagingConfig, PagingData};
pub use search_pipeline::{SearchPipeline, SearchState, SearchSummary};
pub use use_cases::*;
