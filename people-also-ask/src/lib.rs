//! # People Also Ask
//!
//! Featured answer extraction and related question exploration for search
//! result pages.
//!
//! The crate provides:
//!
//! - **Classification**: locate the featured answer on a results page and
//!   assign it a [`Shape`](answer::Shape)
//! - **Extraction**: one routine per shape producing an
//!   [`AnswerRecord`](answer::AnswerRecord)
//! - **Exploration**: lazy traversal of the "People also ask" graph with
//!   deduplication and an optional cap
//!
//! Fetching is pluggable through [`SearchFetcher`](fetch::SearchFetcher);
//! an HTTP implementation is available behind the `http` feature.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use people_also_ask::prelude::*;
//!
//! let paa = PeopleAlsoAsk::with_http(PaaConfig::default())?;
//!
//! let answer = paa.get_simple_answer("what is rust", true, None).await?;
//!
//! let mut answers = paa.generate_answers("what is rust", None).into_stream();
//! while let Some(record) = answers.next().await {
//!     println!("{}", record?.question);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod answer;
pub mod client;
pub mod config;
pub mod dom;
pub mod errors;
pub mod explorer;
pub mod fetch;
pub mod observability;
pub mod related;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::answer::{AnswerRecord, Card, Shape, SnippetData};
    pub use crate::client::{collect_answers, PeopleAlsoAsk};
    pub use crate::config::{
        ExplorerConfig, ExtractionConfig, ExtractionErrorPolicy, FetchConfig, PaaConfig,
    };
    pub use crate::errors::{PaaError, Result};
    pub use crate::explorer::{AnswerExplorer, ExplorationState, RelatedQuestionExplorer};
    #[cfg(feature = "http")]
    pub use crate::fetch::HttpSearchFetcher;
    pub use crate::fetch::{
        FetchResult, LoggingTraversalObserver, NoOpTraversalObserver, SearchFetcher,
        TraversalObserver,
    };
    pub use crate::observability::{init_tracing, LogFormat, TracingConfig};
}
