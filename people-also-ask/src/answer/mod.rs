//! Featured answer classification and extraction.
//!
//! [`locate`] finds the answer container on a results page and assigns it a
//! [`Shape`]; [`extract`] turns the container into an [`AnswerRecord`].
//! [`extract_answer`] does both and also collects related questions.

mod classifier;
mod extractors;
mod models;
pub mod text;

pub use classifier::{
    classify_simple, find_video_link, is_multi_card, is_ordered_list, is_simple_answer,
    is_single_card, is_web_results, is_whole_page_tabs, locate, resolve_heading,
};
pub use extractors::{extract, extract_answer};
pub use models::{AnswerRecord, Card, Shape, SnippetData};
