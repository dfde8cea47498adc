//! Canonical result pages, one per answer shape.

use crate::answer::Shape;

/// "world university rankings 2019"
pub const TABLE: &str = r#"<html><body>
<div class="xpdopen"><div role="heading" aria-level="3">Top universities</div><table><tr><th>Rank</th><th>School</th></tr><tr><td>1</td><td>MIT</td></tr><tr><td>2</td><td>Stanford</td></tr></table><a href="https://rankings.example/2019"><h3>World University Rankings 2019</h3></a><cite>rankings.example</cite></div>
<div class="related-question-pair">Which university is number 1?Search for: Which university is number 1?</div>
<h2>Web results</h2>
</body></html>"#;

/// "the 10 highest-grossing movies of all time"
pub const ORDERED: &str = r#"<html><body>
<div class="xpdopen"><ol><li>Avatar</li><li>Avengers: Endgame</li><li>Titanic</li></ol><a href="https://movies.example/top"><h3>Highest-grossing films</h3></a><cite>movies.example</cite></div>
<h2>Web results</h2>
</body></html>"#;

/// "what are 3 basic programming languages"
pub const UNORDERED: &str = r#"<html><body>
<div class="xpdopen"><ul><li>Python</li><li>Java</li><li>C++</li></ul></div>
<h2>Web results</h2>
</body></html>"#;

/// "why was ho chi minh a hero"
pub const DEFINITION: &str = r#"<html><body>
<div class="xpdopen"><div role="heading" aria-level="3"><span>He led Vietnam to independence.</span></div><a href="https://history.example/hcm"><h3>Ho Chi Minh - History</h3></a><cite>history.example</cite></div>
<h2>Web results</h2>
</body></html>"#;

/// "cheetah vs lion"
pub const YOUTUBE: &str = r#"<html><body>
<div class="xpdopen"><a href="https://www.youtube.com/watch?v=abc123"><h3>Cheetah vs Lion</h3></a><cite>www.youtube.com</cite></div>
<h2>Web results</h2>
</body></html>"#;

/// "how to make a cold brew coffee"
pub const MULTI_CARD: &str = r#"<html><body>
<g-section-with-header><h3 role="heading">Cold brew recipes</h3><g-inner-card><a data-jsarwt="1" href="https://coffee.example/one"><div role="heading">Step one</div></a><cite>coffee.example</cite><span>Grind the beans</span></g-inner-card><g-inner-card><a data-jsarwt="1" href="https://brew.example/two"><div role="heading">Step two</div></a><cite>brew.example</cite><span>Steep overnight</span></g-inner-card></g-section-with-header>
<h2>Web results</h2>
</body></html>"#;

/// "what time is it"
pub const SINGLE_CARD: &str = r#"<html><body>
<div class="card-section">Tip: Search for English results only.</div>
<div class="card-section"><div role="heading" aria-level="3"><span>10:42 PM</span></div><span>Saturday, October 17</span></div>
<h2>Web results</h2>
</body></html>"#;

/// "gangnam style"
pub const WHOLE_PAGE_TABS: &str = r#"<html><body>
<div class="card-section"><span>Gangnam Style is a song</span></div>
<div id="wp-tabs-container"><span>Gangnam Style</span><span>Song by Psy</span><a href="https://en.wikipedia.org/wiki/Gangnam_Style"><h3>Gangnam Style - Wikipedia</h3></a><cite>en.wikipedia.org</cite></div>
</body></html>"#;

/// A page whose ordinary results start before any answer.
pub const NO_ANSWER: &str = r#"<html><body>
<div class="related-question-pair">Is Paris in France?Search for: Is Paris in France?</div>
<h2>Web results</h2>
<div class="card-section"><span>a result snippet</span></div>
</body></html>"#;

/// Name, page and expected shape of every canonical fixture.
#[must_use]
pub fn canonical() -> Vec<(&'static str, &'static str, Shape)> {
    vec![
        ("world university rankings 2019", TABLE, Shape::Table),
        ("the 10 highest-grossing movies of all time", ORDERED, Shape::Ordered),
        ("what are 3 basic programming languages", UNORDERED, Shape::Unordered),
        ("why was ho chi minh a hero", DEFINITION, Shape::Definition),
        ("cheetah vs lion", YOUTUBE, Shape::Youtube),
        ("how to make a cold brew coffee", MULTI_CARD, Shape::MultiCard),
        ("what time is it", SINGLE_CARD, Shape::SingleCard),
        ("gangnam style", WHOLE_PAGE_TABS, Shape::WholePageTabs),
    ]
}

/// Builds a results page with an optional definition answer and related questions.
#[must_use]
pub fn results_page(answer: Option<&str>, related: &[&str]) -> String {
    let mut html = String::from("<html><body>");
    if let Some(answer) = answer {
        html.push_str(&format!(
            r#"<div class="xpdopen"><div role="heading" aria-level="3">{answer}</div></div>"#
        ));
    }
    for question in related {
        html.push_str(&format!(
            r#"<div class="related-question-pair">{question}Search for: {question}</div>"#
        ));
    }
    html.push_str("<h2>Web results</h2></body></html>");
    html
}
