//! Query intent classification.
//!
//! Pure string inspection; no external calls.

/// Phrases treated as greetings.
const GREETINGS: [&str; 11] = [
    "hello",
    "hi",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
    "greetings",
    "howdy",
    "what's up",
    "whats up",
    "sup",
];

/// Substrings that signal a request for the institute listing.
const LIST_KEYWORDS: [&str; 8] = [
    "list",
    "all institutes",
    "certified",
    "verified",
    "which institutes",
    "show institutes",
    "available institutes",
    "what institutes",
];

/// The three paths a query can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// A greeting on the first turn of a session.
    Greeting,
    /// A request for the full institute listing.
    ListRequest,
    /// Anything else: retrieve context and generate an answer.
    ContentQuery,
}

/// Classify a query.
///
/// Greetings are only honored on the first turn; once history exists a
/// greeting-like query falls through to the content path so follow-ups like
/// "hi, and what about Athayog?" still get answered. The list check runs
/// regardless of turn count.
pub fn classify(query: &str, is_first_turn: bool) -> Intent {
    if is_first_turn && is_greeting(query) {
        return Intent::Greeting;
    }

    if is_list_request(query) {
        return Intent::ListRequest;
    }

    Intent::ContentQuery
}

/// Check if the query is a greeting or very short general chit-chat.
fn is_greeting(query: &str) -> bool {
    let query_lower = query.to_lowercase();
    let query_lower = query_lower.trim();

    if GREETINGS.contains(&query_lower) {
        return true;
    }

    query.split_whitespace().count() <= 2 && GREETINGS.iter().any(|g| query_lower.contains(g))
}

/// Check if the user is asking for the list of institutes.
fn is_list_request(query: &str) -> bool {
    let query_lower = query.to_lowercase();
    LIST_KEYWORDS.iter().any(|k| query_lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_greetings_on_first_turn() {
        for greeting in GREETINGS {
            assert_eq!(classify(greeting, true), Intent::Greeting, "{}", greeting);
        }
    }

    #[test]
    fn test_greeting_is_case_insensitive_and_trimmed() {
        assert_eq!(classify("  Hello  ", true), Intent::Greeting);
        assert_eq!(classify("GOOD MORNING", true), Intent::Greeting);
    }

    #[test]
    fn test_short_query_containing_greeting() {
        assert_eq!(classify("hey there", true), Intent::Greeting);
        assert_eq!(classify("hi!", true), Intent::Greeting);
    }

    #[test]
    fn test_greeting_with_history_becomes_content_query() {
        for greeting in GREETINGS {
            assert_eq!(classify(greeting, false), Intent::ContentQuery, "{}", greeting);
        }
    }

    #[test]
    fn test_long_query_with_greeting_word_is_not_greeting() {
        assert_eq!(
            classify("hello can you tell me about Niramaya", true),
            Intent::ContentQuery
        );
    }

    #[test]
    fn test_list_requests() {
        assert_eq!(classify("What institutes are available?", true), Intent::ListRequest);
        assert_eq!(classify("show institutes please", true), Intent::ListRequest);
        assert_eq!(classify("Give me the LIST", true), Intent::ListRequest);
        assert_eq!(classify("which are certified?", false), Intent::ListRequest);
    }

    #[test]
    fn test_list_request_regardless_of_turn_count() {
        assert_eq!(classify("list them all", true), Intent::ListRequest);
        assert_eq!(classify("list them all", false), Intent::ListRequest);
    }

    #[test]
    fn test_greeting_takes_priority_over_list_on_first_turn() {
        // "sup" contains no list keyword; craft one that hits both sets.
        assert_eq!(classify("hi list", true), Intent::Greeting);
        assert_eq!(classify("hi list", false), Intent::ListRequest);
    }

    #[test]
    fn test_default_is_content_query() {
        assert_eq!(
            classify("What is the validity of Niramaya's certification?", true),
            Intent::ContentQuery
        );
    }
}
