use serde::{Deserialize, Serialize};

/// How a player's guess compares to the expected source name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerMatch {
    /// Equal ignoring case.
    Exact,
    /// Equal once punctuation, whitespace and case are stripped.
    Fuzzy,
    Wrong,
}

impl AnswerMatch {
    /// Both exact and fuzzy matches count as a correct round.
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Exact | Self::Fuzzy)
    }

    /// Scoring penalty attached to the match; `None` for a wrong answer.
    #[must_use]
    pub fn penalty(self) -> Option<u32> {
        match self {
            Self::Exact => Some(0),
            Self::Fuzzy => Some(1),
            Self::Wrong => None,
        }
    }
}

/// Lowercase and keep only letters, digits and `_`.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Classify a guess against the expected answer.
#[must_use]
pub fn classify(user_text: &str, expected_text: &str) -> AnswerMatch {
    if user_text.to_lowercase() == expected_text.to_lowercase() {
        AnswerMatch::Exact
    } else if normalize(user_text) == normalize(expected_text) {
        AnswerMatch::Fuzzy
    } else {
        AnswerMatch::Wrong
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_is_exact() {
        for s in ["Lemon", "a", "夜に駆ける", "Don't Stop Me Now"] {
            assert_eq!(classify(s, s), AnswerMatch::Exact);
        }
        assert_eq!(classify("LEMON", "lemon"), AnswerMatch::Exact);
    }

    #[test]
    fn punctuation_differences_are_fuzzy() {
        assert_eq!(classify("foo-bar", "foobar"), AnswerMatch::Fuzzy);
        assert_eq!(classify("dont stop me now", "Don't Stop Me Now"), AnswerMatch::Fuzzy);
        assert_eq!(classify("snake_case", "snake_case!"), AnswerMatch::Fuzzy);
    }

    #[test]
    fn unrelated_text_is_wrong() {
        assert_eq!(classify("xyz", "abc"), AnswerMatch::Wrong);
        assert_eq!(classify("snakecase", "snake_case"), AnswerMatch::Wrong);
    }

    #[test]
    fn penalties_follow_match_kind() {
        assert_eq!(AnswerMatch::Exact.penalty(), Some(0));
        assert_eq!(AnswerMatch::Fuzzy.penalty(), Some(1));
        assert_eq!(AnswerMatch::Wrong.penalty(), None);
        assert!(AnswerMatch::Fuzzy.is_success());
        assert!(!AnswerMatch::Wrong.is_success());
    }
}
