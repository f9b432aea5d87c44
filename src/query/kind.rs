//! Query kinds and query line parsing.

use std::fmt;

use crate::error::{Result, TalaashError};

/// The closed set of query forms.
///
/// Tags outside the known three are kept as `Unrecognized` so that dispatch
/// stays exhaustive; evaluating one yields an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// All terms must occur (`type1`).
    Conjunctive,
    /// Any term may occur (`type2`).
    Disjunctive,
    /// A single `*` pattern matched against the vocabulary (`type3`).
    Wildcard,
    /// Any other tag.
    Unrecognized(String),
}

impl QueryKind {
    pub const CONJUNCTIVE_TAG: &'static str = "type1";
    pub const DISJUNCTIVE_TAG: &'static str = "type2";
    pub const WILDCARD_TAG: &'static str = "type3";

    /// Map a wire tag to a query kind. Matching is exact.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            Self::CONJUNCTIVE_TAG => QueryKind::Conjunctive,
            Self::DISJUNCTIVE_TAG => QueryKind::Disjunctive,
            Self::WILDCARD_TAG => QueryKind::Wildcard,
            other => QueryKind::Unrecognized(other.to_string()),
        }
    }

    /// The wire tag of this kind.
    pub fn tag(&self) -> &str {
        match self {
            QueryKind::Conjunctive => Self::CONJUNCTIVE_TAG,
            QueryKind::Disjunctive => Self::DISJUNCTIVE_TAG,
            QueryKind::Wildcard => Self::WILDCARD_TAG,
            QueryKind::Unrecognized(tag) => tag,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, QueryKind::Unrecognized(_))
    }
}

impl From<&str> for QueryKind {
    fn from(tag: &str) -> Self {
        QueryKind::from_tag(tag)
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A query line split into its kind and its raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub kind: QueryKind,
    pub text: String,
}

impl ParsedQuery {
    /// Parse a line of the form `<tag> <query text>`.
    ///
    /// The tag is everything up to the first whitespace. A line without a
    /// text part, or with an unknown tag, is rejected.
    ///
    /// ```
    /// use talaash::query::{ParsedQuery, QueryKind};
    ///
    /// let query = ParsedQuery::parse("type3 wh*t").unwrap();
    /// assert_eq!(query.kind, QueryKind::Wildcard);
    /// assert_eq!(query.text, "wh*t");
    ///
    /// assert!(ParsedQuery::parse("type1").is_err());
    /// assert!(ParsedQuery::parse("type9 wheat").is_err());
    /// ```
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (tag, text) = line.split_once(char::is_whitespace).ok_or_else(|| {
            TalaashError::query(
                "invalid query format, expected a type (type1, type2, type3) followed by search terms",
            )
        })?;

        let kind = QueryKind::from_tag(tag);
        if !kind.is_recognized() {
            return Err(TalaashError::query(format!(
                "invalid query type {tag:?}, use type1, type2 or type3"
            )));
        }

        Ok(ParsedQuery {
            kind,
            text: text.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for kind in [
            QueryKind::Conjunctive,
            QueryKind::Disjunctive,
            QueryKind::Wildcard,
        ] {
            assert_eq!(QueryKind::from_tag(kind.tag()), kind);
            assert!(kind.is_recognized());
        }

        let unknown = QueryKind::from("TYPE1");
        assert_eq!(unknown, QueryKind::Unrecognized("TYPE1".to_string()));
        assert!(!unknown.is_recognized());
        assert_eq!(unknown.to_string(), "TYPE1");
    }

    #[test]
    fn test_parse_query_line() {
        let query = ParsedQuery::parse("type1 wheat  prices ").unwrap();
        assert_eq!(query.kind, QueryKind::Conjunctive);
        assert_eq!(query.text, "wheat  prices");

        let query = ParsedQuery::parse("  type2\tprices fall").unwrap();
        assert_eq!(query.kind, QueryKind::Disjunctive);
        assert_eq!(query.text, "prices fall");
    }

    #[test]
    fn test_parse_rejects_bad_lines() {
        for line in ["", "   ", "type1", "wheat"] {
            let err = ParsedQuery::parse(line).unwrap_err();
            assert!(err.to_string().contains("invalid query format"), "{line:?}");
        }

        let err = ParsedQuery::parse("type4 wheat").unwrap_err();
        assert!(matches!(err, TalaashError::Query(_)));
        assert!(err.to_string().contains("invalid query type"));
    }
}
