//! Fetch collaborator protocol and implementations.

#[cfg(feature = "http")]
mod http;
mod protocols;

#[cfg(feature = "http")]
pub use http::HttpSearchFetcher;
pub use protocols::{
    FetchResult, LoggingTraversalObserver, NoOpTraversalObserver, SearchFetcher,
    TraversalObserver,
};

#[cfg(test)]
pub(crate) use protocols::MockSearchFetcher;
