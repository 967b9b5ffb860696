//! URL reversal for tab links.
//!
//! [`LinkResolver`] is the seam to the host application's routing. Tabs
//! call it with a route name and positional arguments (the course id, then
//! a slug or book index). [`RouteTable`] is a template-based implementation
//! with defaults for every route the tab catalog uses.

use std::collections::HashMap;

/// Maps a route name plus positional arguments to a URL.
pub trait LinkResolver {
    /// Reverse `route` with `args`.
    ///
    /// Returns `None` when the route is unknown.
    fn reverse(&self, route: &str, args: &[&str]) -> Option<String>;
}

/// Default route templates. `{0}` is the course id, `{1}` a slug or book index.
const DEFAULT_ROUTES: &[(&str, &str)] = &[
    ("courseware", "/courses/{0}/courseware/"),
    ("info", "/courses/{0}/info"),
    ("syllabus", "/courses/{0}/syllabus"),
    ("book", "/courses/{0}/book/{1}/"),
    ("pdf_book", "/courses/{0}/pdfbook/{1}/"),
    ("html_book", "/courses/{0}/htmlbook/{1}/"),
    ("forum_form_discussion", "/courses/{0}/discussion/forum/"),
    ("course_wiki", "/courses/{0}/course_wiki"),
    ("progress", "/courses/{0}/progress/"),
    ("static_tab", "/courses/{0}/{1}/"),
    ("peer_grading", "/courses/{0}/peer_grading"),
    ("staff_grading", "/courses/{0}/staff_grading"),
    ("open_ended_notifications", "/courses/{0}/open_ended_notifications"),
    ("notes", "/courses/{0}/notes/"),
    ("instructor_dashboard", "/courses/{0}/instructor"),
];

/// Template-based [`LinkResolver`].
///
/// Templates use positional placeholders `{0}`, `{1}`, ... An optional base
/// URL is prepended to every result.
#[derive(Clone, Debug)]
pub struct RouteTable {
    base_url: String,
    routes: HashMap<String, String>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTable {
    /// Route table with the default templates and no base URL.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
            routes: DEFAULT_ROUTES
                .iter()
                .map(|&(name, template)| (name.to_owned(), template.to_owned()))
                .collect(),
        }
    }

    /// Prepend `base_url` to every reversed URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Add or replace route templates.
    #[must_use]
    pub fn with_routes<I, K, V>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.routes
            .extend(routes.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Template registered for `route`.
    #[must_use]
    pub fn template(&self, route: &str) -> Option<&str> {
        self.routes.get(route).map(String::as_str)
    }
}

impl LinkResolver for RouteTable {
    fn reverse(&self, route: &str, args: &[&str]) -> Option<String> {
        let Some(template) = self.routes.get(route) else {
            tracing::warn!(route = %route, "No route template registered");
            return None;
        };

        Some(format!("{}{}", self.base_url, fill_template(template, args)))
    }
}

/// Substitute `{N}` placeholders in a single pass.
///
/// Argument text is never rescanned. Placeholders without a matching
/// argument are kept as written.
fn fill_template(template: &str, args: &[&str]) -> String {
    let mut url = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        url.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let arg = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            args.get(index).map(|arg| (close, *arg))
        });
        match arg {
            Some((close, arg)) => {
                url.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                url.push('{');
                rest = after;
            }
        }
    }
    url.push_str(rest);
    url
}

impl<F> LinkResolver for F
where
    F: Fn(&str, &[&str]) -> Option<String>,
{
    fn reverse(&self, route: &str, args: &[&str]) -> Option<String> {
        self(route, args)
    }
}
