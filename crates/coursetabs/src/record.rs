//! Persisted tab form.

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};

use crate::tab::Tab;

/// Flat key-value record a tab is persisted as.
///
/// `type` carries the kind id (`kind` is accepted on read). Keys outside the
/// known set are kept in [`TabRecord::extra`] so legacy records survive a
/// round trip unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TabRecord {
    /// Kind id.
    #[serde(rename = "type")]
    pub kind: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Literal link (link kinds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Url slug (custom tabs).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_slug: Option<String>,
    /// Any other keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TabRecord {
    /// Create a record with only a kind.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Set `name`.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set `link`.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Set `url_slug`.
    #[must_use]
    pub fn with_url_slug(mut self, url_slug: impl Into<String>) -> Self {
        self.url_slug = Some(url_slug.into());
        self
    }

    /// Flat JSON object form, as persisted.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("type".to_owned(), Value::String(self.kind.clone()));
        for (key, value) in [
            ("name", &self.name),
            ("link", &self.link),
            ("url_slug", &self.url_slug),
        ] {
            if let Some(value) = value {
                map.insert(key.to_owned(), Value::String(value.clone()));
            }
        }
        map.extend(self.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        map
    }

    /// Whether the record carries `key`.
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        match key {
            "type" | "kind" => true,
            "name" => self.name.is_some(),
            "link" => self.link.is_some(),
            "url_slug" => self.url_slug.is_some(),
            other => self.extra.contains_key(other),
        }
    }
}

impl TryFrom<Map<String, Value>> for TabRecord {
    type Error = String;

    fn try_from(mut map: Map<String, Value>) -> Result<Self, Self::Error> {
        let kind = match map.remove("type").or_else(|| map.remove("kind")) {
            Some(Value::String(kind)) => kind,
            Some(other) => return Err(format!("tab type must be a string, got {other}")),
            None => return Err("missing field `type`".to_owned()),
        };
        let name = take_string(&mut map, "name")?;
        let link = take_string(&mut map, "link")?;
        let url_slug = take_string(&mut map, "url_slug")?;

        Ok(Self {
            kind,
            name,
            link,
            url_slug,
            extra: map,
        })
    }
}

/// Remove an optional string key. `null` counts as absent.
fn take_string(map: &mut Map<String, Value>, key: &str) -> Result<Option<String>, String> {
    match map.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value)),
        Some(other) => Err(format!("tab key `{key}` must be a string, got {other}")),
    }
}

impl<'de> Deserialize<'de> for TabRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Self::try_from(map).map_err(de::Error::custom)
    }
}

/// Entry of a legacy tab list that may mix live tabs, raw records and junk.
#[derive(Clone, Debug)]
pub enum TabEntry {
    /// A constructed tab.
    Tab(Tab),
    /// A raw persisted record, passed through unchanged.
    Record(TabRecord),
    /// An object without a usable `type`, passed through unchanged.
    Object(Map<String, Value>),
    /// Any non-object value. Skipped on serialization.
    Other(Value),
}

impl From<Tab> for TabEntry {
    fn from(tab: Tab) -> Self {
        Self::Tab(tab)
    }
}

impl From<TabRecord> for TabEntry {
    fn from(record: TabRecord) -> Self {
        Self::Record(record)
    }
}

impl From<Value> for TabEntry {
    /// Objects with a string `type` become records, other objects stay raw
    /// and non-objects become [`TabEntry::Other`].
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => match TabRecord::try_from(map.clone()) {
                Ok(record) => Self::Record(record),
                Err(_) => Self::Object(map),
            },
            other => Self::Other(other),
        }
    }
}
