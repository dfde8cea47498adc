//! Traversal tests for both explorers.

#[cfg(test)]
mod tests {
    use futures::StreamExt;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use std::sync::Arc;

    use crate::answer::Shape;
    use crate::config::{ExplorerConfig, ExtractionErrorPolicy, PaaConfig};
    use crate::errors::PaaError;
    use crate::explorer::{AnswerExplorer, RelatedQuestionExplorer};
    use crate::fetch::{MockSearchFetcher, TraversalObserver};
    use crate::testing::fixtures::results_page;
    use crate::testing::StaticFetcher;

    const BROKEN_TABLE: &str = r#"<html><body>
<div class="xpdopen"><table></table></div>
<div class="related-question-pair">DSearch for: D</div>
<h2>Web results</h2>
</body></html>"#;

    fn graph() -> Arc<StaticFetcher> {
        Arc::new(StaticFetcher::graph(&[
            ("A", &["B", "C"]),
            ("B", &["C", "D"]),
            ("C", &[]),
            ("D", &[]),
        ]))
    }

    fn answers(
        fetcher: &Arc<StaticFetcher>,
        config: &PaaConfig,
        max_questions: Option<usize>,
    ) -> AnswerExplorer {
        AnswerExplorer::new(fetcher.clone(), config, "A", "com", max_questions)
    }

    async fn drain(explorer: &mut AnswerExplorer) -> Vec<Result<String, PaaError>> {
        let mut items = Vec::new();
        while let Some(item) = explorer.next_answer().await {
            items.push(item.map(|record| record.question));
        }
        items
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[tokio::test]
    async fn test_graph_visits_each_question_once() {
        let fetcher = graph();
        let mut explorer = answers(&fetcher, &PaaConfig::default(), None);

        let items = drain(&mut explorer).await;
        let questions: Vec<String> = items.into_iter().map(Result::unwrap).collect();

        assert_eq!(questions.len(), 4);
        assert_eq!(questions.iter().cloned().collect::<HashSet<_>>(), set(&["A", "B", "C", "D"]));
        assert_eq!(explorer.state().collected(), questions.as_slice());
        assert_eq!(explorer.state().visited(), &set(&["A", "B", "C", "D"]));
        for q in ["A", "B", "C", "D"] {
            assert_eq!(fetcher.calls_for(q), 1, "{q} fetched more than once");
        }
    }

    #[tokio::test]
    async fn test_initial_answer_comes_first() {
        let fetcher = graph();
        let mut explorer = answers(&fetcher, &PaaConfig::default(), None);

        let first = explorer.next_answer().await.unwrap().unwrap();
        assert_eq!(first.question, "A");
        assert_eq!(first.shape, Shape::Definition);
        assert_eq!(first.response, "answer to A");
        assert_eq!(first.related_questions, vec!["B", "C"]);
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_cap_of_one() {
        let fetcher = graph();
        let mut explorer = answers(&fetcher, &PaaConfig::default(), Some(1));

        let items = drain(&mut explorer).await;
        assert_eq!(items.len(), 1);
        assert_eq!(fetcher.calls(), vec!["A"]);
    }

    #[tokio::test]
    async fn test_cap_of_zero_fetches_nothing() {
        let fetcher = graph();
        let mut explorer = answers(&fetcher, &PaaConfig::default(), Some(0));

        assert!(explorer.next_answer().await.is_none());
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_cap_from_config() {
        let fetcher = graph();
        let config = PaaConfig::new().with_explorer(ExplorerConfig::new().with_max_questions(2));
        let mut explorer = answers(&fetcher, &config, None);

        let items = drain(&mut explorer).await;
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_pages_without_answer_are_expanded_not_emitted() {
        let fetcher = Arc::new(
            StaticFetcher::new()
                .with_page("A", results_page(None, &["B"]))
                .with_page("B", results_page(Some("yes"), &[])),
        );
        let mut explorer = answers(&fetcher, &PaaConfig::default(), None);

        let items = drain(&mut explorer).await;
        assert_eq!(items, vec![Ok("B".to_string())]);
        assert_eq!(explorer.state().visited(), &set(&["A", "B"]));
    }

    #[tokio::test]
    async fn test_fetch_error_is_terminal() {
        let mut fetcher = MockSearchFetcher::new();
        fetcher.expect_fetch().times(1).returning(|_, _| {
            Err(PaaError::fetch(
                "A",
                "https://www.google.com/search?q=A",
                "connection reset",
                None,
            ))
        });
        let mut explorer =
            AnswerExplorer::new(Arc::new(fetcher), &PaaConfig::default(), "A", "com", None);

        assert!(matches!(
            explorer.next_answer().await,
            Some(Err(PaaError::Fetch { .. }))
        ));
        assert!(explorer.next_answer().await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_error_mid_traversal_stops_expansion() {
        let fetcher = Arc::new(
            StaticFetcher::graph(&[("A", &["B", "C"]), ("C", &[])]).with_failure("B"),
        );
        let mut explorer = answers(&fetcher, &PaaConfig::default(), None);

        let items = drain(&mut explorer).await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], Ok("A".to_string()));
        assert!(matches!(items[1], Err(PaaError::Fetch { status: Some(503), .. })));
        assert_eq!(fetcher.calls_for("C"), 0);
    }

    #[tokio::test]
    async fn test_extraction_error_aborts_by_default() {
        let fetcher = Arc::new(
            StaticFetcher::graph(&[("A", &["B", "C"]), ("C", &[]), ("D", &[])])
                .with_page("B", BROKEN_TABLE),
        );
        let mut explorer = answers(&fetcher, &PaaConfig::default(), None);

        let items = drain(&mut explorer).await;
        assert_eq!(items.len(), 2);
        assert!(matches!(
            &items[1],
            Err(PaaError::Extraction { question, shape: Shape::Table, .. }) if question == "B"
        ));
        assert_eq!(fetcher.call_count(), 2);
    }

    #[tokio::test]
    async fn test_extraction_error_skipped_keeps_related_questions() {
        let fetcher = Arc::new(
            StaticFetcher::graph(&[("A", &["B", "C"]), ("C", &[]), ("D", &[])])
                .with_page("B", BROKEN_TABLE),
        );
        let config = PaaConfig::new().with_explorer(
            ExplorerConfig::new().with_extraction_error_policy(ExtractionErrorPolicy::Skip),
        );
        let mut explorer = answers(&fetcher, &config, None);

        let items = drain(&mut explorer).await;
        let questions: Vec<String> = items.into_iter().map(Result::unwrap).collect();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions.into_iter().collect::<HashSet<_>>(), set(&["A", "C", "D"]));
        assert!(explorer.state().is_visited("B"));
    }

    #[tokio::test]
    async fn test_blank_question_is_rejected_before_fetch() {
        let fetcher = graph();
        let mut explorer = AnswerExplorer::new(fetcher.clone(), &PaaConfig::default(), "  ", "com", None);

        assert!(matches!(
            explorer.next_answer().await,
            Some(Err(PaaError::InvalidInput(_)))
        ));
        assert!(explorer.next_answer().await.is_none());
        assert_eq!(fetcher.call_count(), 0);
    }

    const BLANK_RELATED: &str = r#"<html><body>
<div class="xpdopen"><div role="heading" aria-level="3">answer to A</div></div>
<div class="related-question-pair">Search for: x</div>
<h2>Web results</h2>
</body></html>"#;

    #[tokio::test]
    async fn test_blank_related_question_is_never_fetched() {
        let fetcher = Arc::new(StaticFetcher::new().with_page("A", BLANK_RELATED));
        let mut explorer = answers(&fetcher, &PaaConfig::default(), None);

        let items = drain(&mut explorer).await;
        assert_eq!(items, vec![Ok("A".to_string())]);
        assert_eq!(fetcher.calls(), vec!["A"]);
        assert!(!explorer.state().is_visited(""));
    }

    #[tokio::test]
    async fn test_blank_related_question_is_never_emitted() {
        let fetcher = Arc::new(StaticFetcher::new().with_page("A", BLANK_RELATED));
        let questions = related(&fetcher, None).collect().await.unwrap();

        assert!(questions.is_empty());
        assert_eq!(fetcher.calls(), vec!["A"]);
    }

    #[tokio::test]
    async fn test_answer_stream() {
        let fetcher = graph();
        let records: Vec<_> = answers(&fetcher, &PaaConfig::default(), Some(3))
            .into_stream()
            .collect()
            .await;

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.as_ref().is_ok_and(|r| r.has_answer)));
    }

    #[tokio::test]
    async fn test_dropping_stream_stops_fetching() {
        let fetcher = graph();
        let mut stream = Box::pin(answers(&fetcher, &PaaConfig::default(), None).into_stream());

        assert!(stream.next().await.is_some());
        drop(stream);
        assert_eq!(fetcher.calls(), vec!["A"]);
    }

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<String>>,
    }

    impl TraversalObserver for RecordingObserver {
        fn on_fetch_start(&self, query: &str, _request_id: &str) {
            self.events.lock().push(format!("start {query}"));
        }

        fn on_fetch_complete(&self, query: &str, _request_id: &str, _duration_ms: f64, status_code: u16) {
            self.events.lock().push(format!("complete {query} {status_code}"));
        }

        fn on_fetch_error(&self, query: &str, _request_id: &str, _error: &str) {
            self.events.lock().push(format!("error {query}"));
        }

        fn on_answer(&self, query: &str, _request_id: &str, shape: Shape, related_count: usize) {
            self.events.lock().push(format!("answer {query} {shape} {related_count}"));
        }
    }

    #[tokio::test]
    async fn test_observer_sees_each_step() {
        let fetcher = Arc::new(StaticFetcher::graph(&[("A", &["B"])]));
        let observer = Arc::new(RecordingObserver::default());
        let mut explorer = answers(&fetcher, &PaaConfig::default(), None)
            .with_observer(observer.clone());

        drain(&mut explorer).await;

        assert_eq!(
            *observer.events.lock(),
            vec![
                "start A".to_string(),
                "complete A 200".to_string(),
                "answer A definition 1".to_string(),
                "start B".to_string(),
                "error B".to_string(),
            ]
        );
    }

    fn related(fetcher: &Arc<StaticFetcher>, max_questions: Option<usize>) -> RelatedQuestionExplorer {
        RelatedQuestionExplorer::new(fetcher.clone(), "A", "com", max_questions)
    }

    #[tokio::test]
    async fn test_related_questions_over_graph() {
        let fetcher = graph();
        let questions = related(&fetcher, None).collect().await.unwrap();

        assert_eq!(questions.len(), 3);
        assert_eq!(questions.into_iter().collect::<HashSet<_>>(), set(&["B", "C", "D"]));
        for q in ["A", "B", "C", "D"] {
            assert_eq!(fetcher.calls_for(q), 1);
        }
    }

    #[tokio::test]
    async fn test_related_questions_cap_issues_no_extra_fetch() {
        let fetcher = graph();
        let questions = related(&fetcher, Some(2)).collect().await.unwrap();

        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(|q| set(&["B", "C"]).contains(q)));
        assert_eq!(fetcher.calls(), vec!["A"]);
    }

    #[tokio::test]
    async fn test_related_questions_deduplicated_and_exclude_initial() {
        let fetcher = Arc::new(StaticFetcher::graph(&[
            ("A", &["B", "B", "C"]),
            ("B", &["A", "C"]),
            ("C", &[]),
        ]));
        let mut explorer = related(&fetcher, None);

        let mut questions = Vec::new();
        while let Some(q) = explorer.next_question().await {
            questions.push(q.unwrap());
        }
        assert_eq!(questions.len(), 2);
        assert_eq!(questions.into_iter().collect::<HashSet<_>>(), set(&["B", "C"]));
        assert_eq!(explorer.state().visited(), &set(&["A", "B", "C"]));
    }

    #[tokio::test]
    async fn test_related_questions_fetch_error() {
        let fetcher = Arc::new(StaticFetcher::graph(&[("A", &["B"])]));
        let mut stream = Box::pin(related(&fetcher, None).into_stream());

        assert_eq!(stream.next().await, Some(Ok("B".to_string())));
        assert!(matches!(stream.next().await, Some(Err(PaaError::Fetch { .. }))));
        assert!(stream.next().await.is_none());
    }

    #[test]
    fn test_related_questions_blank_initial() {
        let fetcher = graph();
        let result = tokio_test::block_on(
            RelatedQuestionExplorer::new(fetcher.clone(), "", "com", None).collect(),
        );
        assert!(matches!(result, Err(PaaError::InvalidInput(_))));
        assert_eq!(fetcher.call_count(), 0);
    }
}
