use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use super::analyzer::analyze_code;
use super::canned::{DEFAULT_REPLY, KEYWORD_REPLIES};
use super::{Reply, Responder, TutorRequest};

/// Bounds of the simulated network delay, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub min: Duration,
    pub max: Duration,
}

impl Latency {
    pub const NONE: Latency = Latency {
        min: Duration::ZERO,
        max: Duration::ZERO,
    };

    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        let (min_ms, max_ms) = if min_ms <= max_ms {
            (min_ms, max_ms)
        } else {
            (max_ms, min_ms)
        };
        Self {
            min: Duration::from_millis(min_ms),
            max: Duration::from_millis(max_ms),
        }
    }

    fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::from_millis(800, 2000)
    }
}

/// Offline responder: keyword lookup, then the line scanner, then a greeting.
pub struct MockResponder {
    latency: Latency,
}

impl MockResponder {
    pub fn new(latency: Latency) -> Self {
        Self { latency }
    }

    /// Reply to `message` after the simulated delay. Never fails.
    pub async fn get_reply(&self, message: &str, code: Option<&str>) -> String {
        let delay = self.latency.sample();
        tokio::time::sleep(delay).await;
        resolve_reply(message, code)
    }
}

impl Default for MockResponder {
    fn default() -> Self {
        Self::new(Latency::default())
    }
}

/// The delay-free part of [`MockResponder::get_reply`].
pub fn resolve_reply(message: &str, code: Option<&str>) -> String {
    let lower = message.to_lowercase();
    if let Some((_, reply)) = KEYWORD_REPLIES
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
    {
        return reply.to_string();
    }

    match code.filter(|code| !code.is_empty()) {
        Some(code) => analyze_code(code),
        None => DEFAULT_REPLY.to_string(),
    }
}

#[async_trait]
impl Responder for MockResponder {
    fn name(&self) -> &str {
        "mock"
    }

    async fn reply(&self, request: &TutorRequest) -> Reply {
        let content = self
            .get_reply(&request.message, request.code_snippet.as_deref())
            .await;
        Reply::text(content)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::tutor::canned::{FUNCTION_REPLY, LIST_REPLY, LOOP_REPLY, SYNTAX_REPLY};

    #[test]
    fn loop_keyword_wins_regardless_of_case_or_code() {
        let expected = LOOP_REPLY;

        assert_eq!(resolve_reply("help me with my loop", None), expected);
        assert_eq!(resolve_reply("Help Me With My LOOP", None), expected);
        assert_eq!(
            resolve_reply("help me with my loop", Some("if x > 5\n    print(1)")),
            expected
        );
    }

    #[test]
    fn categories_are_tried_in_order() {
        assert_eq!(resolve_reply("my list in a function", None), LIST_REPLY);
        assert_eq!(resolve_reply("a loop over a list", None), LOOP_REPLY);
        assert_eq!(resolve_reply("function returns None", None), FUNCTION_REPLY);
        assert_eq!(resolve_reply("SyntaxError on line 3", None), SYNTAX_REPLY);
    }

    #[test]
    fn code_is_analyzed_when_no_keyword_matches() {
        let reply = resolve_reply("what is wrong here?", Some("if x > 5\n    print(1)"));

        assert!(reply.contains("Line 1: Missing colon after if statement"));
    }

    #[test]
    fn default_greeting_without_keyword_or_code() {
        assert_eq!(resolve_reply("hello there", None), DEFAULT_REPLY);
    }

    #[test]
    fn empty_code_counts_as_no_code() {
        assert_eq!(resolve_reply("hello there", Some("")), DEFAULT_REPLY);
    }

    #[test]
    fn latency_bounds_are_normalized() {
        let latency = Latency::from_millis(2000, 800);

        assert_eq!(latency.min, Duration::from_millis(800));
        assert_eq!(latency.max, Duration::from_millis(2000));
    }

    #[test]
    fn sampled_latency_stays_in_range() {
        let latency = Latency::default();
        for _ in 0..100 {
            let delay = latency.sample();
            assert!(delay >= latency.min && delay <= latency.max);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn get_reply_waits_for_the_simulated_delay() {
        let responder = MockResponder::new(Latency::from_millis(1500, 1500));
        let started = tokio::time::Instant::now();

        let reply = responder.get_reply("syntax help", None).await;

        assert_eq!(reply, SYNTAX_REPLY);
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn trait_reply_carries_no_metadata() {
        let responder = MockResponder::new(Latency::NONE);
        let request = TutorRequest::new("anonymous", "hi", None);
        let started = Instant::now();

        let reply = responder.reply(&request).await;

        assert_eq!(reply.content, DEFAULT_REPLY);
        assert!(reply.explanation.is_none());
        assert!(reply.confidence.is_none());
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
