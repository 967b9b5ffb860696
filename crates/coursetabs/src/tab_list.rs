//! Ordered tab list: validation and (de)serialization.
//!
//! The list is the unit of persistence. A non-empty persisted list must
//! start with `courseware` then `course_info`, and may hold at most one
//! `courseware` and one `pdf_textbooks` tab. Deserialization is
//! all-or-nothing: one bad record fails the whole list.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_json::Value;

use crate::error::InvalidTabConfiguration;
use crate::kind::TabKind;
use crate::record::{TabEntry, TabRecord};
use crate::tab::Tab;

/// Kinds limited to a number of occurrences in a persisted list.
const MAX_OCCURRENCES: &[(TabKind, usize)] =
    &[(TabKind::Courseware, 1), (TabKind::PdfTextbooks, 1)];

/// Ordered sequence of tabs. Order is navigation order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TabList {
    tabs: Vec<Tab>,
}

impl TabList {
    /// Empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check ordering and cardinality of a persisted list.
    ///
    /// An absent or empty list is valid.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTabConfiguration`] naming the rule that failed.
    pub fn validate(records: Option<&[TabRecord]>) -> Result<(), InvalidTabConfiguration> {
        let records = match records {
            None | Some([]) => return Ok(()),
            Some(records) => records,
        };

        let [first, second, ..] = records else {
            return Err(InvalidTabConfiguration::TooFewTabs {
                count: records.len(),
            });
        };

        if first.kind != TabKind::Courseware.id() {
            return Err(InvalidTabConfiguration::UnexpectedFirstTab {
                found: first.kind.clone(),
            });
        }
        if second.kind != TabKind::CourseInfo.id() {
            return Err(InvalidTabConfiguration::UnexpectedSecondTab {
                found: second.kind.clone(),
            });
        }

        for &(kind, max) in MAX_OCCURRENCES {
            let count = records.iter().filter(|r| r.kind == kind.id()).count();
            if count > max {
                return Err(InvalidTabConfiguration::TooManyOfKind {
                    kind: kind.id(),
                    count,
                    max,
                });
            }
        }

        Ok(())
    }

    /// Validate `records` and build every tab through the factory.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidTabConfiguration`] hit by list validation
    /// or by any record.
    pub fn deserialize(records: Option<&[TabRecord]>) -> Result<Self, InvalidTabConfiguration> {
        Self::validate(records)?;
        let tabs = records
            .unwrap_or_default()
            .iter()
            .map(Tab::from_record)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(tab_count = tabs.len(), "Deserialized tab list");
        Ok(Self { tabs })
    }

    /// Parse a raw JSON value (`null` or an array of records).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTabConfiguration::Malformed`] when the value is not a
    /// list of records, otherwise whatever [`TabList::deserialize`] returns.
    pub fn from_json_value(value: Value) -> Result<Self, InvalidTabConfiguration> {
        let records: Option<Vec<TabRecord>> = serde_json::from_value(value)
            .map_err(|e| InvalidTabConfiguration::Malformed(e.to_string()))?;
        Self::deserialize(records.as_deref())
    }

    /// Persisted form of every tab.
    ///
    /// Ephemeral tabs are skipped.
    #[must_use]
    pub fn serialize(&self) -> Vec<TabRecord> {
        self.tabs.iter().filter_map(persisted_record).collect()
    }

    /// Append tabs.
    pub fn extend(&mut self, tabs: impl IntoIterator<Item = Tab>) {
        self.tabs.extend(tabs);
    }

    /// Iterate in navigation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tab> {
        self.tabs.iter()
    }

    /// Number of tabs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Tab at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    /// Mutable tab at `index`, for renames and slug updates.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Tab> {
        self.tabs.get_mut(index)
    }

    /// First tab.
    #[must_use]
    pub fn first(&self) -> Option<&Tab> {
        self.tabs.first()
    }
}

/// Serialize a legacy list mixing tabs, raw objects and other values.
///
/// Tabs become record objects, records and other objects pass through
/// unchanged, and non-object values are dropped.
#[must_use]
pub fn serialize_entries(entries: &[TabEntry]) -> Vec<Value> {
    entries
        .iter()
        .filter_map(|entry| match entry {
            TabEntry::Tab(tab) => persisted_record(tab).map(|record| record.to_map()),
            TabEntry::Record(record) => Some(record.to_map()),
            TabEntry::Object(map) => Some(map.clone()),
            TabEntry::Other(_) => None,
        })
        .map(Value::Object)
        .collect()
}

fn persisted_record(tab: &Tab) -> Option<TabRecord> {
    if tab.is_ephemeral() {
        tracing::warn!(name = %tab.name(), "Skipping ephemeral tab during serialization");
        return None;
    }
    Some(tab.to_record())
}

impl<'a> IntoIterator for &'a TabList {
    type Item = &'a Tab;
    type IntoIter = std::slice::Iter<'a, Tab>;

    fn into_iter(self) -> Self::IntoIter {
        self.tabs.iter()
    }
}

impl Serialize for TabList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TabList::serialize(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TabList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let records = Option::<Vec<TabRecord>>::deserialize(deserializer)?;
        TabList::deserialize(records.as_deref()).map_err(de::Error::custom)
    }
}
