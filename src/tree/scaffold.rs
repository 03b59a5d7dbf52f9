//! Ordered name→children mapping used for tree structure on load, save and
//! scaffolding requests.
//!
//! Serialized as nested JSON objects (`{"family": {"mother": {}}}`). Sibling
//! order is kept as written; duplicate sibling names are rejected.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scaffold {
    entries: Vec<(String, Scaffold)>,
}

impl Scaffold {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, children: Scaffold) -> Self {
        self.insert(name, children);
        self
    }

    /// Insert or replace the entry named `name`, keeping its position.
    pub fn insert(&mut self, name: impl Into<String>, children: Scaffold) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = children,
            None => self.entries.push((name, children)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Scaffold> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, children)| children)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Scaffold)> {
        self.entries.iter().map(|(name, children)| (name.as_str(), children))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of names in this mapping, at every depth.
    pub fn node_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, children)| 1 + children.node_count())
            .sum()
    }
}

impl Serialize for Scaffold {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, children) in &self.entries {
            map.serialize_entry(name, children)?;
        }
        map.end()
    }
}

struct ScaffoldVisitor;

impl<'de> Visitor<'de> for ScaffoldVisitor {
    type Value = Scaffold;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a nested mapping of node names to children")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Scaffold, A::Error> {
        let mut scaffold = Scaffold::new();
        while let Some((name, children)) = access.next_entry::<String, Scaffold>()? {
            if scaffold.get(&name).is_some() {
                return Err(serde::de::Error::custom(format!(
                    "duplicate node name '{}'",
                    name
                )));
            }
            scaffold.entries.push((name, children));
        }
        Ok(scaffold)
    }

    // `null` leaves are accepted as empty children.
    fn visit_unit<E: serde::de::Error>(self) -> Result<Scaffold, E> {
        Ok(Scaffold::new())
    }
}

impl<'de> Deserialize<'de> for Scaffold {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScaffoldVisitor)
    }
}
