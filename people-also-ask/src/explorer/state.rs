//! Traversal bookkeeping shared by both explorers.

use std::collections::{HashSet, VecDeque};

/// Visited set, frontier and emitted questions of one traversal.
///
/// `visited` only ever grows, and a question in `visited` is never queued
/// again. The frontier is FIFO; callers must not rely on its order beyond
/// that.
#[derive(Debug, Clone, Default)]
pub struct ExplorationState {
    visited: HashSet<String>,
    queued: HashSet<String>,
    frontier: VecDeque<String>,
    collected: Vec<String>,
    max_questions: Option<usize>,
}

impl ExplorationState {
    /// Creates an empty state with an optional emission cap.
    #[must_use]
    pub fn new(max_questions: Option<usize>) -> Self {
        Self {
            max_questions,
            ..Self::default()
        }
    }

    /// Marks `question` visited. Returns `false` if it already was.
    pub fn visit(&mut self, question: &str) -> bool {
        self.queued.remove(question);
        self.visited.insert(question.to_string())
    }

    /// Whether `question` has been visited.
    #[must_use]
    pub fn is_visited(&self, question: &str) -> bool {
        self.visited.contains(question)
    }

    /// Queues `question` unless it is blank, visited or already queued.
    pub fn enqueue(&mut self, question: String) -> bool {
        if question.trim().is_empty()
            || self.visited.contains(&question)
            || self.queued.contains(&question)
        {
            return false;
        }
        self.queued.insert(question.clone());
        self.frontier.push_back(question);
        true
    }

    /// Queues every new question; returns how many were added.
    pub fn enqueue_all<I>(&mut self, questions: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        questions.into_iter().filter(|q| self.enqueue(q.clone())).count()
    }

    /// Pops the next question that has not been visited yet.
    pub fn next_unvisited(&mut self) -> Option<String> {
        while let Some(question) = self.frontier.pop_front() {
            self.queued.remove(&question);
            if !self.visited.contains(&question) {
                return Some(question);
            }
        }
        None
    }

    /// Records the question of an emitted item.
    pub fn record_emitted(&mut self, question: impl Into<String>) {
        self.collected.push(question.into());
    }

    /// Items emitted so far.
    #[must_use]
    pub fn emitted(&self) -> usize {
        self.collected.len()
    }

    /// Questions emitted so far, in order.
    #[must_use]
    pub fn collected(&self) -> &[String] {
        &self.collected
    }

    /// Whether the cap has been reached.
    #[must_use]
    pub fn is_capped(&self) -> bool {
        self.max_questions.is_some_and(|max| self.emitted() >= max)
    }

    /// The emission cap.
    #[must_use]
    pub fn max_questions(&self) -> Option<usize> {
        self.max_questions
    }

    /// Visited questions.
    #[must_use]
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    /// Number of queued questions.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.frontier.len()
    }
}
