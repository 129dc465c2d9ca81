pub mod page_source;
pub mod pager;

pub use page_source::{FetchPage, LoadParams, LoadResult, Page, PageSource, PagingState};
pub use pager::{LoadState, Pager, PagingConfig, PagingData};
