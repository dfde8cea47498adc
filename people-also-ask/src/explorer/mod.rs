//! Question exploration over the related-question graph.
//!
//! This module contains:
//! - [`AnswerExplorer`], which yields answers one fetched page at a time
//! - [`RelatedQuestionExplorer`], which yields discovered questions only
//! - [`ExplorationState`], the visited set and frontier both share

mod answers;
#[cfg(test)]
mod explorer_tests;
mod questions;
mod state;

pub use answers::AnswerExplorer;
pub use questions::RelatedQuestionExplorer;
pub use state::ExplorationState;
