//! Course navigation tabs.
//!
//! This crate provides:
//! - [`Tab`]: a navigation entry, one of a closed set of [`TabKind`]s
//! - [`TabList`]: the ordered, persisted tab configuration of a course
//! - [`Course`]: course data consulted for visibility, plus list queries
//! - [`LinkResolver`]: the seam to the host application's URL routing
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use coursetabs::{Course, RouteTable, TabList, Viewer};
//! use serde_json::json;
//!
//! let tabs = TabList::from_json_value(json!([
//!     {"type": "courseware"},
//!     {"type": "course_info", "name": "Course Info"},
//!     {"type": "static_tab", "name": "Handouts", "url_slug": "handouts"}
//! ]))?;
//! let course = Course::new("edX/toy/2012_Fall").with_tabs(tabs);
//!
//! let routes = RouteTable::new();
//! for tab in course.displayable_tabs(Viewer::anonymous(), false) {
//!     let _link = tab.link(&course, &routes);
//! }
//! # Ok(())
//! # }
//! ```

mod course;
mod displayable;
mod error;
mod kind;
mod link;
mod record;
mod tab;
mod tab_list;

pub use course::{Course, CourseFeatures, Textbook};
pub use displayable::DisplayableTabs;
pub use error::InvalidTabConfiguration;
pub use kind::{Access, TabKind};
pub use link::{LinkResolver, RouteTable};
pub use record::{TabEntry, TabRecord};
pub use tab::{Tab, TabField, Viewer};
pub use tab_list::{TabList, serialize_entries};
