//! Course data consulted by tab visibility and link resolution.
//!
//! [`Course`] is the read-only view of a course that the surrounding
//! application supplies. It owns the persisted [`TabList`] and exposes the
//! list-level queries: default initialization, discussion lookup, slug
//! lookup and per-viewer display iteration.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::displayable::DisplayableTabs;
use crate::kind::TabKind;
use crate::tab::{Tab, Viewer};
use crate::tab_list::TabList;

/// Platform features that gate individual tab kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseFeatures {
    /// Wiki is enabled.
    pub wiki: bool,
    /// Built-in discussion service is enabled.
    pub discussion_service: bool,
    /// Textbook tabs are enabled.
    pub textbooks: bool,
    /// Student notes are enabled.
    pub student_notes: bool,
}

/// A book attached to a course. Its index is its position in the list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Textbook {
    /// Title shown as the tab name.
    #[serde(alias = "tab_title")]
    pub title: String,
}

impl Textbook {
    /// Create a textbook with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Course data supplied by the surrounding application.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Course {
    /// Unique course identifier (e.g. `"edX/toy/2012_Fall"`).
    pub id: String,
    /// Explicit discussion URL. Overrides any persisted discussion tab.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discussion_link: Option<String>,
    /// Feature flags.
    pub features: CourseFeatures,
    /// Hide the progress tab.
    pub hide_progress_tab: bool,
    /// Course declares syllabus content.
    pub syllabus_present: bool,
    /// Textbooks.
    pub textbooks: Vec<Textbook>,
    /// PDF textbooks.
    pub pdf_textbooks: Vec<Textbook>,
    /// HTML textbooks.
    pub html_textbooks: Vec<Textbook>,
    /// Persisted tab list.
    pub tabs: TabList,
}

impl Course {
    /// Create a course with no tabs, books or features.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the discussion link override.
    #[must_use]
    pub fn with_discussion_link(mut self, link: impl Into<String>) -> Self {
        self.discussion_link = Some(link.into());
        self
    }

    /// Set the feature flags.
    #[must_use]
    pub fn with_features(mut self, features: CourseFeatures) -> Self {
        self.features = features;
        self
    }

    /// Set the persisted tab list.
    #[must_use]
    pub fn with_tabs(mut self, tabs: TabList) -> Self {
        self.tabs = tabs;
        self
    }

    /// Append the canonical default tabs to the course's tab list.
    ///
    /// Order: courseware, course info, syllabus, textbooks, discussion,
    /// wiki, progress. The discussion tab is an external discussion bound
    /// to [`Course::discussion_link`] when one is set. Existing tabs are
    /// kept in front.
    pub fn initialize_default_tabs(&mut self) -> &TabList {
        let discussion = match &self.discussion_link {
            Some(link) => Tab::external_discussion(link.clone()),
            None => Tab::new(TabKind::Discussion),
        };

        self.tabs.extend([
            Tab::new(TabKind::Courseware),
            Tab::new(TabKind::CourseInfo),
            Tab::new(TabKind::Syllabus),
            Tab::new(TabKind::Textbooks),
            discussion,
            Tab::new(TabKind::Wiki),
            Tab::new(TabKind::Progress),
        ]);
        &self.tabs
    }

    /// Discussion tab for this course.
    ///
    /// A configured [`Course::discussion_link`] wins over anything persisted
    /// and yields a synthesized external discussion tab. A course without
    /// persisted tabs gets the default discussion tab. Otherwise returns the
    /// first persisted discussion or external discussion tab.
    #[must_use]
    pub fn discussion_tab(&self) -> Option<Cow<'_, Tab>> {
        if let Some(link) = &self.discussion_link {
            return Some(Cow::Owned(Tab::external_discussion(link.clone())));
        }
        if self.tabs.is_empty() {
            return Some(Cow::Owned(Tab::new(TabKind::Discussion)));
        }
        self.tabs
            .iter()
            .find(|tab| {
                matches!(
                    tab.kind(),
                    TabKind::Discussion | TabKind::ExternalDiscussion
                )
            })
            .map(Cow::Borrowed)
    }

    /// First custom tab whose `url_slug` equals `slug`.
    #[must_use]
    pub fn tab_by_slug(&self, slug: &str) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.url_slug() == Some(slug))
    }

    /// Tabs the viewer may see, in navigation order.
    ///
    /// Textbook collections are replaced by one ephemeral tab per book. When
    /// `include_instructor_tab` is set, an instructor tab is appended if the
    /// viewer may see it. The iterator is lazy and recomputed on every call.
    #[must_use]
    pub fn displayable_tabs(
        &self,
        viewer: Viewer,
        include_instructor_tab: bool,
    ) -> DisplayableTabs<'_> {
        DisplayableTabs::new(self, viewer, include_instructor_tab)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::link::RouteTable;

    static_assertions::assert_impl_all!(super::Course: Send, Sync);

    fn course() -> Course {
        Course::new("edX/toy/2012_Fall")
    }

    fn kinds(tabs: &TabList) -> Vec<TabKind> {
        tabs.iter().map(Tab::kind).collect()
    }

    #[test]
    fn test_initialize_default_tabs() {
        let mut course = course();
        course.initialize_default_tabs();

        assert_eq!(
            kinds(&course.tabs),
            vec![
                TabKind::Courseware,
                TabKind::CourseInfo,
                TabKind::Syllabus,
                TabKind::Textbooks,
                TabKind::Discussion,
                TabKind::Wiki,
                TabKind::Progress,
            ]
        );
    }

    #[test]
    fn test_initialize_default_tabs_with_discussion_link() {
        let mut course = course().with_discussion_link("http://forum.example.com");
        course.initialize_default_tabs();

        let discussion = course.tabs.get(4).unwrap();
        assert_eq!(discussion.kind(), TabKind::ExternalDiscussion);
        assert_eq!(discussion.literal_link(), Some("http://forum.example.com"));
    }

    #[test]
    fn test_initialize_default_tabs_appends_to_existing() {
        let mut course = course();
        course.tabs.extend([Tab::external_link("Blog", "http://blog")]);
        let tabs = course.initialize_default_tabs();

        assert_eq!(tabs.len(), 8);
        assert_eq!(tabs.first().unwrap().kind(), TabKind::ExternalLink);
        assert_eq!(tabs.get(1).unwrap().kind(), TabKind::Courseware);
    }

    #[test]
    fn test_discussion_link_overrides_persisted_tab() {
        let mut course = course().with_discussion_link("other_discussion_link");
        course.features.discussion_service = false;
        course.initialize_default_tabs();
        course.tabs.extend([Tab::new(TabKind::Discussion)]);

        let discussion = course.discussion_tab().unwrap();
        let routes = RouteTable::new();
        assert_eq!(discussion.kind(), TabKind::ExternalDiscussion);
        assert_eq!(
            discussion.link(&course, &routes).as_deref(),
            Some("other_discussion_link")
        );
    }

    #[test]
    fn test_discussion_tab_without_tabs_links_to_forum() {
        let mut course = course();
        course.features.discussion_service = true;

        let discussion = course.discussion_tab().unwrap();
        let routes = RouteTable::new();
        assert_eq!(discussion.kind(), TabKind::Discussion);
        assert!(discussion.can_display(&course, Viewer::learner()));
        assert_eq!(
            discussion.link(&course, &routes).as_deref(),
            Some("/courses/edX/toy/2012_Fall/discussion/forum/")
        );
    }

    #[test]
    fn test_discussion_tab_for_course_json_without_tabs() {
        let course: Course =
            serde_json::from_value(json!({"id": "c1", "features": {"discussion_service": true}}))
                .unwrap();
        let routes = RouteTable::new();
        let link = course
            .discussion_tab()
            .and_then(|tab| tab.link(&course, &routes));
        assert_eq!(link.as_deref(), Some("/courses/c1/discussion/forum/"));
    }

    #[test]
    fn test_discussion_tab_with_default_tabs_links_to_forum() {
        let mut course = course();
        course.features.discussion_service = true;
        course.initialize_default_tabs();

        let discussion = course.discussion_tab().unwrap();
        let routes = RouteTable::new();
        assert!(discussion.can_display(&course, Viewer::staff()));
        assert_eq!(
            discussion.link(&course, &routes).as_deref(),
            Some("/courses/edX/toy/2012_Fall/discussion/forum/")
        );
    }

    #[test]
    fn test_discussion_tab_skips_other_tabs() {
        let mut course = course();
        course.tabs.extend([
            Tab::new(TabKind::Courseware),
            Tab::new(TabKind::CourseInfo),
            Tab::new(TabKind::Textbooks),
        ]);
        assert!(course.discussion_tab().is_none());
    }

    #[test]
    fn test_tab_by_slug() {
        let mut course = course();
        course.tabs.extend([
            Tab::new(TabKind::Courseware),
            Tab::new(TabKind::CourseInfo),
            Tab::static_tab("Handouts", "handouts"),
            Tab::static_tab("Schedule", "schedule"),
        ]);

        assert_eq!(
            course.tab_by_slug("schedule").map(Tab::name),
            Some("Schedule")
        );
        assert!(course.tab_by_slug("missing").is_none());
    }

    #[test]
    fn test_deserialize_course_json() {
        let value = json!({
            "id": "edX/toy/2012_Fall",
            "features": {"wiki": true},
            "pdf_textbooks": [{"tab_title": "Lecture notes"}],
            "tabs": [
                {"type": "courseware"},
                {"type": "course_info", "name": "Info"},
                {"type": "pdf_textbooks"}
            ]
        });
        let course: Course = serde_json::from_value(value).unwrap();

        assert_eq!(course.id, "edX/toy/2012_Fall");
        assert!(course.features.wiki);
        assert!(!course.features.textbooks);
        assert_eq!(course.pdf_textbooks, vec![Textbook::new("Lecture notes")]);
        assert_eq!(course.tabs.len(), 3);
    }

    #[test]
    fn test_deserialize_course_json_rejects_bad_tabs() {
        let value = json!({
            "id": "edX/toy/2012_Fall",
            "tabs": [{"type": "course_info", "name": "Info"}, {"type": "courseware"}]
        });
        let err = serde_json::from_value::<Course>(value).unwrap_err();
        assert!(err.to_string().contains("courseware"));
    }
}
