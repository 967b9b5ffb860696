//! The [`Tab`] value type and its factory.

use std::str::FromStr;

use crate::course::Course;
use crate::error::InvalidTabConfiguration;
use crate::kind::{ActivePage, LinkRule, TabKind};
use crate::link::LinkResolver;
use crate::record::TabRecord;

/// Viewer flags consulted by [`Tab::can_display`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewer {
    /// The viewer is logged in.
    pub is_authenticated: bool,
    /// The viewer has staff access to the course.
    pub is_staff: bool,
}

impl Viewer {
    /// Anonymous visitor.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Authenticated learner without staff access.
    #[must_use]
    pub fn learner() -> Self {
        Self {
            is_authenticated: true,
            is_staff: false,
        }
    }

    /// Authenticated staff member.
    #[must_use]
    pub fn staff() -> Self {
        Self {
            is_authenticated: true,
            is_staff: true,
        }
    }
}

/// Keys readable through [`Tab::field`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TabField {
    /// Kind id (`"type"` or `"kind"`).
    Kind,
    /// Display name.
    Name,
    /// Literal link of link kinds.
    Link,
    /// Url slug of custom tabs.
    UrlSlug,
    /// Active page name.
    ActivePageName,
}

impl FromStr for TabField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "type" | "kind" => Ok(Self::Kind),
            "name" => Ok(Self::Name),
            "link" => Ok(Self::Link),
            "url_slug" => Ok(Self::UrlSlug),
            "active_page_name" => Ok(Self::ActivePageName),
            other => Err(format!("unknown tab field: {other}")),
        }
    }
}

/// Where a tab's link comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
enum TabLink {
    /// Route reversed with the course id.
    Route(&'static str),
    /// `static_tab` route reversed with the course id and the tab's slug.
    Slug,
    /// Stored URL.
    Literal(String),
    /// Route reversed with the course id and a book index.
    Book { route: &'static str, index: usize },
    None,
}

/// A navigation entry of a course.
///
/// The kind is fixed at construction. Name, active page name, slug and
/// literal link can be changed through the explicit setters.
#[derive(Clone, Debug)]
pub struct Tab {
    kind: TabKind,
    name: String,
    active_page_name: Option<String>,
    link: TabLink,
    url_slug: Option<String>,
}

impl Tab {
    /// Tab of `kind` with default name and settings.
    ///
    /// Kinds that need a slug or link get empty ones; use
    /// [`Tab::static_tab`], [`Tab::external_link`] or
    /// [`Tab::external_discussion`] for those.
    #[must_use]
    pub fn new(kind: TabKind) -> Self {
        Self::build(kind, kind.default_name().to_owned(), None, None)
    }

    /// Custom tab addressed by `url_slug`.
    pub fn static_tab(name: impl Into<String>, url_slug: impl Into<String>) -> Self {
        Self::build(
            TabKind::StaticTab,
            name.into(),
            Some(url_slug.into()),
            None,
        )
    }

    /// External link tab. Never active.
    pub fn external_link(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self::build(TabKind::ExternalLink, name.into(), None, Some(link.into()))
    }

    /// Discussion tab pointing at an externally hosted forum.
    pub fn external_discussion(link: impl Into<String>) -> Self {
        Self::build(
            TabKind::ExternalDiscussion,
            TabKind::ExternalDiscussion.default_name().to_owned(),
            None,
            Some(link.into()),
        )
    }

    /// Ephemeral tab for one book of a textbook collection.
    pub(crate) fn single_textbook(
        name: impl Into<String>,
        prefix: &str,
        route: &'static str,
        index: usize,
    ) -> Self {
        Self {
            kind: TabKind::SingleTextbook,
            name: name.into(),
            active_page_name: Some(format!("{prefix}/{index}")),
            link: TabLink::Book { route, index },
            url_slug: None,
        }
    }

    fn build(
        kind: TabKind,
        name: String,
        url_slug: Option<String>,
        literal: Option<String>,
    ) -> Self {
        let spec = kind.spec();
        let active_page_name = match spec.active_page {
            ActivePage::Fixed(page) => Some(page.to_owned()),
            ActivePage::Slug => Some(format!(
                "static_tab_{}",
                url_slug.as_deref().unwrap_or_default()
            )),
            ActivePage::None => None,
        };
        let link = match spec.link {
            LinkRule::Route(route) => TabLink::Route(route),
            LinkRule::Slug => TabLink::Slug,
            LinkRule::Literal => TabLink::Literal(literal.unwrap_or_default()),
            LinkRule::None => TabLink::None,
        };
        let url_slug = if kind.has_url_slug() {
            Some(url_slug.unwrap_or_default())
        } else {
            None
        };

        Self {
            kind,
            name,
            active_page_name,
            link,
            url_slug,
        }
    }

    /// Build a tab from its persisted record.
    ///
    /// Looks the kind up in the catalog, checks the keys it requires, then
    /// constructs the tab.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTabConfiguration::UnknownKind`] for kinds outside
    /// the catalog and [`InvalidTabConfiguration::MissingKey`] when a
    /// required key is absent.
    pub fn from_record(record: &TabRecord) -> Result<Self, InvalidTabConfiguration> {
        let kind: TabKind = record.kind.parse()?;
        Self::validate_record(kind, record)?;

        let name = if kind.spec().name_from_record {
            record
                .name
                .clone()
                .unwrap_or_else(|| kind.default_name().to_owned())
        } else {
            kind.default_name().to_owned()
        };
        Ok(Self::build(
            kind,
            name,
            record.url_slug.clone(),
            record.link.clone(),
        ))
    }

    /// Check that `record` carries every key `kind` requires.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTabConfiguration::MissingKey`] naming the first
    /// missing key.
    pub fn validate_record(
        kind: TabKind,
        record: &TabRecord,
    ) -> Result<(), InvalidTabConfiguration> {
        match kind.required_keys().iter().find(|key| !record.has_key(key)) {
            Some(&key) => Err(InvalidTabConfiguration::MissingKey {
                kind: record.kind.clone(),
                key,
            }),
            None => Ok(()),
        }
    }

    /// Kind of the tab.
    #[must_use]
    pub fn kind(&self) -> TabKind {
        self.kind
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier the caller matches against the current page.
    #[must_use]
    pub fn active_page_name(&self) -> Option<&str> {
        self.active_page_name.as_deref()
    }

    /// Url slug of custom tabs.
    #[must_use]
    pub fn url_slug(&self) -> Option<&str> {
        self.url_slug.as_deref()
    }

    /// Stored URL of link kinds.
    #[must_use]
    pub fn literal_link(&self) -> Option<&str> {
        match &self.link {
            TabLink::Literal(link) => Some(link),
            _ => None,
        }
    }

    /// Whether the tab is synthesized at display time and never persisted.
    #[must_use]
    pub fn is_ephemeral(&self) -> bool {
        self.kind == TabKind::SingleTextbook
    }

    /// Read one of the fixed tab keys.
    ///
    /// Returns `None` when the key does not apply to this kind.
    #[must_use]
    pub fn field(&self, field: TabField) -> Option<&str> {
        match field {
            TabField::Kind => Some(self.kind.id()),
            TabField::Name => Some(&self.name),
            TabField::Link => self.literal_link(),
            TabField::UrlSlug => self.url_slug(),
            TabField::ActivePageName => self.active_page_name(),
        }
    }

    /// Resolve the tab's URL for `course`.
    ///
    /// Literal links are returned as stored. Everything else goes through
    /// `resolver`, which returns `None` for routes it does not know.
    pub fn link(&self, course: &Course, resolver: &dyn LinkResolver) -> Option<String> {
        match &self.link {
            TabLink::Literal(link) => Some(link.clone()),
            TabLink::Route(route) => resolver.reverse(route, &[course.id.as_str()]),
            TabLink::Slug => {
                let slug = self.url_slug.as_deref().unwrap_or_default();
                resolver.reverse("static_tab", &[course.id.as_str(), slug])
            }
            TabLink::Book { route, index } => {
                resolver.reverse(route, &[course.id.as_str(), index.to_string().as_str()])
            }
            TabLink::None => None,
        }
    }

    /// Whether `viewer` may see this tab in `course`.
    ///
    /// Both the kind's access capability and its course gate must pass.
    #[must_use]
    pub fn can_display(&self, course: &Course, viewer: Viewer) -> bool {
        let spec = self.kind.spec();
        spec.access.allows(viewer.is_authenticated, viewer.is_staff)
            && spec.gate.is_none_or(|gate| gate(course))
    }

    /// Change the display name.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Change the active page name.
    pub fn set_active_page_name(&mut self, active_page_name: Option<String>) {
        self.active_page_name = active_page_name;
    }

    /// Change the url slug of a custom tab.
    ///
    /// The active page name is left as constructed.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTabConfiguration::NotSlugged`] for other kinds.
    pub fn set_url_slug(&mut self, url_slug: impl Into<String>) -> Result<(), InvalidTabConfiguration> {
        match &mut self.url_slug {
            Some(slug) => {
                *slug = url_slug.into();
                Ok(())
            }
            None => Err(InvalidTabConfiguration::NotSlugged {
                kind: self.kind.id(),
            }),
        }
    }

    /// Change the stored URL of a link kind.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTabConfiguration::NotLinked`] for kinds whose link
    /// is resolved by route.
    pub fn set_link(&mut self, link: impl Into<String>) -> Result<(), InvalidTabConfiguration> {
        match &mut self.link {
            TabLink::Literal(current) => {
                *current = link.into();
                Ok(())
            }
            _ => Err(InvalidTabConfiguration::NotLinked {
                kind: self.kind.id(),
            }),
        }
    }

    /// Persisted form of the tab.
    ///
    /// Textbook collections carry no name. Ephemeral tabs have no persisted
    /// form; callers skip them (see [`Tab::is_ephemeral`]).
    #[must_use]
    pub fn to_record(&self) -> TabRecord {
        let mut record = TabRecord::new(self.kind.id());
        if !self.kind.is_textbook_collection() {
            record.name = Some(self.name.clone());
        }
        record.link = self.literal_link().map(str::to_owned);
        record.url_slug.clone_from(&self.url_slug);
        record
    }
}

impl PartialEq for Tab {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.name == other.name
            && self.active_page_name == other.active_page_name
            && self.literal_link() == other.literal_link()
            && self.url_slug == other.url_slug
    }
}

impl Eq for Tab {}

impl PartialEq<TabRecord> for Tab {
    /// A record matches when it is valid for this tab's kind, names the same
    /// kind, carries no name or the same name, and matches the kind's extra
    /// fields.
    fn eq(&self, record: &TabRecord) -> bool {
        if Self::validate_record(self.kind, record).is_err() || record.kind != self.kind.id() {
            return false;
        }
        if record.name.as_ref().is_some_and(|name| *name != self.name) {
            return false;
        }
        if self.kind.has_literal_link() && record.link.as_deref() != self.literal_link() {
            return false;
        }
        if self.kind.has_url_slug() && record.url_slug != self.url_slug {
            return false;
        }
        true
    }
}

impl PartialEq<Tab> for TabRecord {
    fn eq(&self, tab: &Tab) -> bool {
        tab == self
    }
}
