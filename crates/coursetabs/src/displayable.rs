//! Per-viewer display iteration.

use std::borrow::Cow;
use std::iter::Enumerate;
use std::slice;

use crate::course::{Course, Textbook};
use crate::kind::{Expansion, TabKind};
use crate::tab::{Tab, Viewer};

/// Lazy iterator over the tabs a viewer may see.
///
/// Persisted tabs are borrowed from the course. Books of textbook
/// collections and the instructor tab are built on the fly.
pub struct DisplayableTabs<'a> {
    course: &'a Course,
    viewer: Viewer,
    tabs: slice::Iter<'a, Tab>,
    books: Option<(Expansion, Enumerate<slice::Iter<'a, Textbook>>)>,
    include_instructor_tab: bool,
}

impl<'a> DisplayableTabs<'a> {
    pub(crate) fn new(course: &'a Course, viewer: Viewer, include_instructor_tab: bool) -> Self {
        Self {
            course,
            viewer,
            tabs: course.tabs.iter(),
            books: None,
            include_instructor_tab,
        }
    }

    fn next_book(&mut self) -> Option<Tab> {
        let (expansion, books) = self.books.as_mut()?;
        match books.next() {
            Some((index, book)) => Some(Tab::single_textbook(
                book.title.clone(),
                expansion.prefix,
                expansion.route,
                index,
            )),
            None => {
                self.books = None;
                None
            }
        }
    }
}

impl<'a> Iterator for DisplayableTabs<'a> {
    type Item = Cow<'a, Tab>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(book) = self.next_book() {
                return Some(Cow::Owned(book));
            }

            let Some(tab) = self.tabs.next() else {
                break;
            };
            if !tab.can_display(self.course, self.viewer) {
                continue;
            }
            match tab.kind().spec().expansion {
                Some(expansion) => {
                    let books = (expansion.books)(self.course).iter().enumerate();
                    self.books = Some((expansion, books));
                }
                None => return Some(Cow::Borrowed(tab)),
            }
        }

        if std::mem::take(&mut self.include_instructor_tab) {
            let instructor = Tab::new(TabKind::Instructor);
            if instructor.can_display(self.course, self.viewer) {
                return Some(Cow::Owned(instructor));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::course::CourseFeatures;
    use crate::link::RouteTable;

    fn course_with_books() -> Course {
        let mut course = Course::new("edX/toy/2012_Fall").with_features(CourseFeatures {
            textbooks: true,
            ..CourseFeatures::default()
        });
        course.textbooks = vec![
            Textbook::new("Book1: Algebra"),
            Textbook::new("Book2: Topology"),
        ];
        course.tabs.extend([
            Tab::new(TabKind::Courseware),
            Tab::new(TabKind::CourseInfo),
            Tab::new(TabKind::Textbooks),
        ]);
        course
    }

    fn active_pages(course: &Course, viewer: Viewer, instructor: bool) -> Vec<String> {
        course
            .displayable_tabs(viewer, instructor)
            .filter_map(|tab| tab.active_page_name().map(str::to_owned))
            .collect()
    }

    #[test]
    fn test_textbooks_expand_per_book() {
        let course = course_with_books();
        let routes = RouteTable::new();
        let books: Vec<_> = course
            .displayable_tabs(Viewer::learner(), false)
            .filter(|tab| tab.kind() == TabKind::SingleTextbook)
            .collect();

        assert_eq!(books.len(), 2);
        for (i, book) in books.iter().enumerate() {
            assert_eq!(book.active_page_name(), Some(format!("textbook/{i}").as_str()));
            assert!(book.name().starts_with(&format!("Book{}:", i + 1)));
            assert_eq!(
                book.link(&course, &routes),
                Some(format!("/courses/edX/toy/2012_Fall/book/{i}/"))
            );
        }
    }

    #[test]
    fn test_collection_tab_never_yielded() {
        let course = course_with_books();
        assert!(
            course
                .displayable_tabs(Viewer::staff(), true)
                .all(|tab| !tab.kind().is_textbook_collection())
        );
    }

    #[test]
    fn test_textbooks_hidden_when_feature_off() {
        let mut course = course_with_books();
        course.features.textbooks = false;
        assert_eq!(
            active_pages(&course, Viewer::staff(), false),
            vec!["courseware", "info"]
        );
    }

    #[test]
    fn test_textbooks_hidden_from_anonymous() {
        let course = course_with_books();
        assert_eq!(
            active_pages(&course, Viewer::anonymous(), false),
            vec!["courseware", "info"]
        );
    }

    #[test]
    fn test_pdf_and_html_books_use_their_prefix() {
        let mut course = course_with_books();
        course.pdf_textbooks = vec![Textbook::new("Slides")];
        course.html_textbooks = vec![Textbook::new("Notes"), Textbook::new("Labs")];
        course.tabs.extend([
            Tab::new(TabKind::PdfTextbooks),
            Tab::new(TabKind::HtmlTextbooks),
        ]);

        assert_eq!(
            active_pages(&course, Viewer::learner(), false),
            vec![
                "courseware",
                "info",
                "textbook/0",
                "textbook/1",
                "pdftextbook/0",
                "htmltextbook/0",
                "htmltextbook/1",
            ]
        );
    }

    #[test]
    fn test_empty_collection_yields_nothing() {
        let mut course = course_with_books();
        course.textbooks.clear();
        course.tabs.extend([Tab::new(TabKind::PeerGrading)]);
        assert_eq!(
            active_pages(&course, Viewer::learner(), false),
            vec!["courseware", "info", "peer_grading"]
        );
    }

    #[test]
    fn test_instructor_tab_appended_for_staff() {
        let course = course_with_books();
        let pages = active_pages(&course, Viewer::staff(), true);
        assert_eq!(pages.last().map(String::as_str), Some("instructor"));
    }

    #[test]
    fn test_instructor_tab_hidden_from_learners() {
        let course = course_with_books();
        let pages = active_pages(&course, Viewer::learner(), true);
        assert!(!pages.iter().any(|p| p == "instructor"));
    }

    #[test]
    fn test_instructor_tab_not_requested() {
        let course = course_with_books();
        let pages = active_pages(&course, Viewer::staff(), false);
        assert!(!pages.iter().any(|p| p == "instructor"));
    }

    #[test]
    fn test_iteration_is_restartable() {
        let course = course_with_books();
        let first = active_pages(&course, Viewer::learner(), false);
        let second = active_pages(&course, Viewer::learner(), false);
        assert_eq!(first, second);
    }

    #[test]
    fn test_persisted_tabs_are_borrowed() {
        let course = course_with_books();
        let first = course.displayable_tabs(Viewer::learner(), false).next().unwrap();
        assert!(matches!(first, Cow::Borrowed(_)));
    }
}
