//! Tab variant catalog.
//!
//! Every tab kind is one row of a static dispatch table ([`KindSpec`]).
//! A row carries the kind's access capability, the keys it requires in
//! persisted form, how its name, active page and link are computed, the
//! course-level gate that hides it, and, for textbook collections, how it
//! expands into one tab per book.
//!
//! Rows are stored in [`TabKind`] declaration order so lookups are a plain
//! index.

use std::fmt;
use std::str::FromStr;

use crate::course::{Course, Textbook};

/// Discriminant selecting a tab's behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabKind {
    /// Course content.
    Courseware,
    /// Course information and updates.
    CourseInfo,
    /// Course syllabus.
    Syllabus,
    /// Collection of all textbooks.
    Textbooks,
    /// Collection of all PDF textbooks.
    PdfTextbooks,
    /// Collection of all HTML textbooks.
    HtmlTextbooks,
    /// Built-in discussion forum.
    Discussion,
    /// Discussion hosted elsewhere.
    ExternalDiscussion,
    /// Course wiki.
    Wiki,
    /// The learner's progress.
    Progress,
    /// Custom page addressed by a url slug.
    StaticTab,
    /// Arbitrary external link.
    ExternalLink,
    /// Peer grading.
    PeerGrading,
    /// Staff grading.
    StaffGrading,
    /// Open-ended grading panel.
    OpenEnded,
    /// Learner notes.
    Notes,
    /// Instructor dashboard. Synthesized on demand.
    Instructor,
    /// One book of a textbook collection. Ephemeral.
    SingleTextbook,
}

/// Who may see a tab, independent of course gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone, including anonymous users.
    Unrestricted,
    /// Authenticated users only.
    Authenticated,
    /// Users with staff access to the course only.
    Staff,
}

impl Access {
    /// Check the capability against a viewer's flags.
    #[must_use]
    pub fn allows(self, is_authenticated: bool, is_staff: bool) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Authenticated => is_authenticated,
            Self::Staff => is_staff,
        }
    }
}

/// How a tab's active page name is computed.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ActivePage {
    Fixed(&'static str),
    /// `static_tab_<url_slug>`.
    Slug,
    /// Never active.
    None,
}

/// How a tab's link is computed.
#[derive(Debug, Clone, Copy)]
pub(crate) enum LinkRule {
    /// Reverse the route with the course id.
    Route(&'static str),
    /// Reverse the `static_tab` route with course id and slug.
    Slug,
    /// Literal stored URL.
    Literal,
    /// No link of its own (textbook collections).
    None,
}

/// Expansion of a textbook collection into one tab per book.
#[derive(Clone, Copy)]
pub(crate) struct Expansion {
    /// Active page prefix; books become `{prefix}/{index}`.
    pub prefix: &'static str,
    /// Route reversed with `(course id, index)`.
    pub route: &'static str,
    /// Book list on the course.
    pub books: fn(&Course) -> &[Textbook],
}

/// One row of the catalog.
pub(crate) struct KindSpec {
    pub kind: TabKind,
    pub id: &'static str,
    pub access: Access,
    pub required_keys: &'static [&'static str],
    pub default_name: &'static str,
    /// Whether a persisted `name` overrides the default.
    pub name_from_record: bool,
    pub active_page: ActivePage,
    pub link: LinkRule,
    pub gate: Option<fn(&Course) -> bool>,
    pub expansion: Option<Expansion>,
    /// Whether the factory accepts this kind.
    pub in_catalog: bool,
    pub grading: bool,
}

const fn spec(kind: TabKind, id: &'static str, default_name: &'static str) -> KindSpec {
    KindSpec {
        kind,
        id,
        access: Access::Unrestricted,
        required_keys: &[],
        default_name,
        name_from_record: false,
        active_page: ActivePage::Fixed(id),
        link: LinkRule::Route(id),
        gate: None,
        expansion: None,
        in_catalog: true,
        grading: false,
    }
}

const NAME: &[&str] = &["name"];

static CATALOG: [KindSpec; 18] = [
    spec(TabKind::Courseware, "courseware", "Courseware"),
    KindSpec {
        required_keys: NAME,
        name_from_record: true,
        active_page: ActivePage::Fixed("info"),
        link: LinkRule::Route("info"),
        ..spec(TabKind::CourseInfo, "course_info", "Course Info")
    },
    KindSpec {
        gate: Some(syllabus_present),
        ..spec(TabKind::Syllabus, "syllabus", "Syllabus")
    },
    textbook_collection(
        TabKind::Textbooks,
        "textbooks",
        Expansion {
            prefix: "textbook",
            route: "book",
            books: textbooks,
        },
    ),
    textbook_collection(
        TabKind::PdfTextbooks,
        "pdf_textbooks",
        Expansion {
            prefix: "pdftextbook",
            route: "pdf_book",
            books: pdf_textbooks,
        },
    ),
    textbook_collection(
        TabKind::HtmlTextbooks,
        "html_textbooks",
        Expansion {
            prefix: "htmltextbook",
            route: "html_book",
            books: html_textbooks,
        },
    ),
    KindSpec {
        required_keys: NAME,
        name_from_record: true,
        link: LinkRule::Route("forum_form_discussion"),
        gate: Some(discussion_service_enabled),
        ..spec(TabKind::Discussion, "discussion", "Discussion")
    },
    KindSpec {
        required_keys: &["link"],
        active_page: ActivePage::Fixed("discussion"),
        link: LinkRule::Literal,
        ..spec(TabKind::ExternalDiscussion, "external_discussion", "Discussion")
    },
    KindSpec {
        required_keys: NAME,
        name_from_record: true,
        link: LinkRule::Route("course_wiki"),
        gate: Some(wiki_enabled),
        ..spec(TabKind::Wiki, "wiki", "Wiki")
    },
    KindSpec {
        access: Access::Authenticated,
        required_keys: NAME,
        name_from_record: true,
        gate: Some(progress_visible),
        ..spec(TabKind::Progress, "progress", "Progress")
    },
    KindSpec {
        required_keys: &["name", "url_slug"],
        name_from_record: true,
        active_page: ActivePage::Slug,
        link: LinkRule::Slug,
        ..spec(TabKind::StaticTab, "static_tab", "")
    },
    KindSpec {
        required_keys: &["name", "link"],
        name_from_record: true,
        active_page: ActivePage::None,
        link: LinkRule::Literal,
        ..spec(TabKind::ExternalLink, "external_link", "")
    },
    KindSpec {
        access: Access::Authenticated,
        grading: true,
        ..spec(TabKind::PeerGrading, "peer_grading", "Peer grading")
    },
    KindSpec {
        access: Access::Staff,
        grading: true,
        ..spec(TabKind::StaffGrading, "staff_grading", "Staff grading")
    },
    KindSpec {
        access: Access::Authenticated,
        link: LinkRule::Route("open_ended_notifications"),
        grading: true,
        ..spec(TabKind::OpenEnded, "open_ended", "Open Ended Panel")
    },
    KindSpec {
        access: Access::Authenticated,
        required_keys: NAME,
        name_from_record: true,
        gate: Some(notes_enabled),
        ..spec(TabKind::Notes, "notes", "My Notes")
    },
    KindSpec {
        access: Access::Staff,
        link: LinkRule::Route("instructor_dashboard"),
        ..spec(TabKind::Instructor, "instructor", "Instructor")
    },
    KindSpec {
        active_page: ActivePage::None,
        link: LinkRule::None,
        in_catalog: false,
        ..spec(TabKind::SingleTextbook, "single_textbook", "")
    },
];

const fn textbook_collection(kind: TabKind, id: &'static str, expansion: Expansion) -> KindSpec {
    KindSpec {
        access: Access::Authenticated,
        active_page: ActivePage::None,
        link: LinkRule::None,
        gate: Some(textbooks_enabled),
        expansion: Some(expansion),
        ..spec(kind, id, "")
    }
}

fn syllabus_present(course: &Course) -> bool {
    course.syllabus_present
}

fn discussion_service_enabled(course: &Course) -> bool {
    course.features.discussion_service
}

fn wiki_enabled(course: &Course) -> bool {
    course.features.wiki
}

fn progress_visible(course: &Course) -> bool {
    !course.hide_progress_tab
}

fn notes_enabled(course: &Course) -> bool {
    course.features.student_notes
}

fn textbooks_enabled(course: &Course) -> bool {
    course.features.textbooks
}

fn textbooks(course: &Course) -> &[Textbook] {
    &course.textbooks
}

fn pdf_textbooks(course: &Course) -> &[Textbook] {
    &course.pdf_textbooks
}

fn html_textbooks(course: &Course) -> &[Textbook] {
    &course.html_textbooks
}

impl TabKind {
    /// Every kind, in catalog order.
    pub const ALL: [Self; 18] = [
        Self::Courseware,
        Self::CourseInfo,
        Self::Syllabus,
        Self::Textbooks,
        Self::PdfTextbooks,
        Self::HtmlTextbooks,
        Self::Discussion,
        Self::ExternalDiscussion,
        Self::Wiki,
        Self::Progress,
        Self::StaticTab,
        Self::ExternalLink,
        Self::PeerGrading,
        Self::StaffGrading,
        Self::OpenEnded,
        Self::Notes,
        Self::Instructor,
        Self::SingleTextbook,
    ];

    pub(crate) fn spec(self) -> &'static KindSpec {
        &CATALOG[self as usize]
    }

    /// Persisted kind id (e.g. `"course_info"`).
    #[must_use]
    pub fn id(self) -> &'static str {
        self.spec().id
    }

    /// Access capability of the kind.
    #[must_use]
    pub fn access(self) -> Access {
        self.spec().access
    }

    /// Untranslated default display name.
    ///
    /// Localization is left to the caller; this is the source string.
    #[must_use]
    pub fn default_name(self) -> &'static str {
        self.spec().default_name
    }

    /// Keys a persisted record of this kind must carry.
    #[must_use]
    pub fn required_keys(self) -> &'static [&'static str] {
        self.spec().required_keys
    }

    /// True for textbook collections, which expand into one tab per book.
    #[must_use]
    pub fn is_textbook_collection(self) -> bool {
        self.spec().expansion.is_some()
    }

    /// True for grading tabs (peer, staff, open-ended).
    #[must_use]
    pub fn is_grading(self) -> bool {
        self.spec().grading
    }

    /// True for kinds whose link is a literal stored URL.
    #[must_use]
    pub fn has_literal_link(self) -> bool {
        matches!(self.spec().link, LinkRule::Literal)
    }

    /// True for kinds addressed by a `url_slug`.
    #[must_use]
    pub fn has_url_slug(self) -> bool {
        matches!(self.spec().link, LinkRule::Slug)
    }

    /// Ids accepted by the factory.
    #[must_use]
    pub fn known_ids() -> Vec<&'static str> {
        CATALOG
            .iter()
            .filter(|spec| spec.in_catalog)
            .map(|spec| spec.id)
            .collect()
    }

    /// Look up a kind the factory accepts by its persisted id.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        CATALOG
            .iter()
            .find(|spec| spec.in_catalog && spec.id == id)
            .map(|spec| spec.kind)
    }
}

impl fmt::Display for TabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TabKind {
    type Err = crate::InvalidTabConfiguration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| crate::InvalidTabConfiguration::UnknownKind {
            kind: s.to_owned(),
            known: Self::known_ids(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_matches_enum() {
        for kind in TabKind::ALL {
            assert_eq!(kind.spec().kind, kind, "catalog row out of order for {kind:?}");
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = TabKind::ALL.iter().map(|k| k.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), TabKind::ALL.len());
    }

    #[test]
    fn test_from_id_roundtrip() {
        for kind in TabKind::ALL {
            if kind == TabKind::SingleTextbook {
                continue;
            }
            assert_eq!(TabKind::from_id(kind.id()), Some(kind));
        }
    }

    #[test]
    fn test_single_textbook_not_in_catalog() {
        assert_eq!(TabKind::from_id("single_textbook"), None);
        assert!(!TabKind::known_ids().contains(&"single_textbook"));
        assert!(TabKind::known_ids().contains(&"instructor"));
    }

    #[test]
    fn test_from_str_unknown_kind() {
        let err = "flying".parse::<TabKind>().unwrap_err();
        assert!(matches!(
            err,
            crate::InvalidTabConfiguration::UnknownKind { ref kind, .. } if kind == "flying"
        ));
    }

    #[test]
    fn test_access_allows() {
        assert!(Access::Unrestricted.allows(false, false));
        assert!(Access::Authenticated.allows(true, false));
        assert!(!Access::Authenticated.allows(false, true));
        assert!(Access::Staff.allows(false, true));
        assert!(!Access::Staff.allows(true, false));
    }

    #[test]
    fn test_grading_kinds() {
        let grading: Vec<_> = TabKind::ALL.into_iter().filter(|k| k.is_grading()).collect();
        assert_eq!(
            grading,
            vec![TabKind::PeerGrading, TabKind::StaffGrading, TabKind::OpenEnded]
        );
    }

    #[test]
    fn test_textbook_collections() {
        let collections: Vec<_> = TabKind::ALL
            .into_iter()
            .filter(|k| k.is_textbook_collection())
            .collect();
        assert_eq!(
            collections,
            vec![TabKind::Textbooks, TabKind::PdfTextbooks, TabKind::HtmlTextbooks]
        );
    }

    #[test]
    fn test_link_and_slug_kinds() {
        assert!(TabKind::ExternalLink.has_literal_link());
        assert!(TabKind::ExternalDiscussion.has_literal_link());
        assert!(!TabKind::Discussion.has_literal_link());
        assert!(TabKind::StaticTab.has_url_slug());
        assert!(!TabKind::Wiki.has_url_slug());
    }
}
