//! Tab configuration errors.

/// A complaint about persisted tab configuration.
///
/// Raised by [`Tab::from_record`](crate::Tab::from_record),
/// [`TabList::validate`](crate::TabList::validate) and
/// [`TabList::deserialize`](crate::TabList::deserialize). Callers on the
/// persistence load path should surface it as a data-integrity problem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTabConfiguration {
    /// The record names a kind outside the catalog.
    #[error("Unknown tab type {kind}. Known types: {}", .known.join(", "))]
    UnknownKind {
        /// Offending kind id.
        kind: String,
        /// Every kind id the catalog accepts.
        known: Vec<&'static str>,
    },

    /// A key the kind requires is missing from the record.
    #[error("Key {key} not present in tab of type {kind}")]
    MissingKey {
        /// Kind id of the record.
        kind: String,
        /// Missing key.
        key: &'static str,
    },

    /// A non-empty list has fewer than two tabs.
    #[error("Expected at least two tabs, found {count}")]
    TooFewTabs {
        /// Number of tabs in the list.
        count: usize,
    },

    /// The first tab is not `courseware`.
    #[error("Expected first tab to have type 'courseware', found '{found}'")]
    UnexpectedFirstTab {
        /// Kind id actually found.
        found: String,
    },

    /// The second tab is not `course_info`.
    #[error("Expected second tab to have type 'course_info', found '{found}'")]
    UnexpectedSecondTab {
        /// Kind id actually found.
        found: String,
    },

    /// A kind appears more often than allowed.
    #[error("Tab of type '{kind}' appears {count} time(s). Expected maximum of {max} time(s)")]
    TooManyOfKind {
        /// Kind id.
        kind: &'static str,
        /// Occurrences in the list.
        count: usize,
        /// Allowed maximum.
        max: usize,
    },

    /// `url_slug` was set on a kind that has none.
    #[error("Tab of type '{kind}' has no url_slug")]
    NotSlugged {
        /// Kind id of the tab.
        kind: &'static str,
    },

    /// `link` was set on a kind whose link is resolved by route.
    #[error("Tab of type '{kind}' has no literal link")]
    NotLinked {
        /// Kind id of the tab.
        kind: &'static str,
    },

    /// Raw JSON is not a list of tab records.
    #[error("Malformed tab configuration: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_lists_known_kinds() {
        let err = InvalidTabConfiguration::UnknownKind {
            kind: "flying".to_owned(),
            known: vec!["courseware", "course_info"],
        };
        assert_eq!(
            err.to_string(),
            "Unknown tab type flying. Known types: courseware, course_info"
        );
    }

    #[test]
    fn test_missing_key_names_key() {
        let err = InvalidTabConfiguration::MissingKey {
            kind: "static_tab".to_owned(),
            key: "url_slug",
        };
        assert!(err.to_string().contains("url_slug"));
        assert!(err.to_string().contains("static_tab"));
    }

    #[test]
    fn test_too_many_of_kind_message() {
        let err = InvalidTabConfiguration::TooManyOfKind {
            kind: "pdf_textbooks",
            count: 2,
            max: 1,
        };
        assert_eq!(
            err.to_string(),
            "Tab of type 'pdf_textbooks' appears 2 time(s). Expected maximum of 1 time(s)"
        );
    }
}
