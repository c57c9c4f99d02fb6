pub mod raw_content_client;

pub use raw_content_client::{HttpRawContentClient, RawContentFetcher};
