//! Rule-based routing strategy
//!
//! Scans the user text case-insensitively for the fixed RAG trigger phrases.
//! Deterministic, no I/O, pure function over its input.

use crate::routing::strategy::RoutingStrategy;
use tracing::debug;

/// Trigger phrases that select the RAG agent (matched as substrings)
const RAG_TRIGGER_PHRASES: [&str; 2] = ["use my local rag system", "use my local rag server"];

/// Keyword-rule routing strategy
#[derive(Debug, Clone)]
pub struct KeywordStrategy {
    rag_agent: String,
    default_agent: String,
}

impl KeywordStrategy {
    /// Create a keyword strategy routing between the given identities
    pub fn new<R: Into<String>, D: Into<String>>(rag_agent: R, default_agent: D) -> Self {
        Self {
            rag_agent: rag_agent.into(),
            default_agent: default_agent.into(),
        }
    }

    fn matches_rag_trigger(user_text: &str) -> bool {
        let lowered = user_text.to_lowercase();
        RAG_TRIGGER_PHRASES
            .iter()
            .any(|phrase| lowered.contains(phrase))
    }
}

#[async_trait::async_trait]
impl RoutingStrategy for KeywordStrategy {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn select_agent(&self, user_text: &str) -> String {
        if Self::matches_rag_trigger(user_text) {
            debug!(agent = %self.rag_agent, "trigger phrase matched");
            self.rag_agent.clone()
        } else {
            debug!(agent = %self.default_agent, "no trigger phrase, using default");
            self.default_agent.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy() -> KeywordStrategy {
        KeywordStrategy::new("rag", "search")
    }

    #[tokio::test]
    async fn test_trigger_phrases_select_rag() {
        assert_eq!(strategy().select_agent("use my local rag system").await, "rag");
        assert_eq!(strategy().select_agent("use my local rag server").await, "rag");
    }

    #[tokio::test]
    async fn test_matching_is_case_insensitive() {
        assert_eq!(
            strategy()
                .select_agent("Who built it? Use my local RAG SYSTEM to answer")
                .await,
            "rag"
        );
        assert_eq!(strategy().select_agent("USE MY LOCAL RAG SERVER").await, "rag");
    }

    #[tokio::test]
    async fn test_matching_is_substring_containment() {
        assert_eq!(
            strategy()
                .select_agent("please use my local rag system, thanks")
                .await,
            "rag"
        );
    }

    #[tokio::test]
    async fn test_untriggered_text_selects_default() {
        assert_eq!(strategy().select_agent("What is Go?").await, "search");
        assert_eq!(strategy().select_agent("tell me about rag rugs").await, "search");
    }

    #[tokio::test]
    async fn test_empty_text_selects_default() {
        assert_eq!(strategy().select_agent("").await, "search");
    }
}
