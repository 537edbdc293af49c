use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One labeled observation: the region it belongs to plus one value per series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub id: String,
    pub value_bar: f64,
    pub value_area: f64,
}

impl ChartPoint {
    pub fn new(id: impl Into<String>, value_bar: f64, value_area: f64) -> Self {
        Self {
            id: id.into(),
            value_bar,
            value_area,
        }
    }
}

/// Ordered mapping `label -> ChartPoint`.
///
/// Labels are unique and insertion order is the x-axis order. JSON objects are
/// read in document order, so a dataset round-trips without reordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    entries: Vec<(String, ChartPoint)>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(label, point)` pairs, rejecting duplicate labels.
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, ChartPoint)>,
        S: Into<String>,
    {
        let mut out = Self::new();
        for (label, point) in entries {
            out.insert(label, point)?;
        }
        Ok(out)
    }

    /// Append an entry. Fails when `label` is already present.
    pub fn insert(&mut self, label: impl Into<String>, point: ChartPoint) -> Result<()> {
        let label = label.into();
        if self.entries.iter().any(|(l, _)| *l == label) {
            return Err(Error::DuplicateLabel { label });
        }
        self.entries.push((label, point));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&ChartPoint> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, p)| p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChartPoint)> {
        self.entries.iter().map(|(l, p)| (l.as_str(), p))
    }

    /// X-axis labels in insertion order.
    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(l, _)| l.clone()).collect()
    }

    /// Y-axis points in insertion order.
    pub fn points(&self) -> Vec<ChartPoint> {
        self.entries.iter().map(|(_, p)| p.clone()).collect()
    }

    /// Distinct region ids in order of first appearance.
    pub fn regions(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        self.entries
            .iter()
            .filter(|(_, p)| seen.insert(p.id.as_str()))
            .map(|(_, p)| p.id.clone())
            .collect()
    }
}

impl Serialize for Dataset {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, point) in &self.entries {
            map.serialize_entry(label, point)?;
        }
        map.end()
    }
}

/// Every `(label, point)` pair of a JSON object, in document order and with
/// duplicate labels kept, so the caller decides how to reject them.
#[derive(Debug, Default)]
pub(crate) struct RawEntries(pub(crate) Vec<(String, ChartPoint)>);

impl<'de> Deserialize<'de> for RawEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{MapAccess, Visitor};
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawEntries;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "an object mapping labels to {{id, value_bar, value_area}}")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, ChartPoint>()? {
                    out.push(entry);
                }
                Ok(RawEntries(out))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl<'de> Deserialize<'de> for Dataset {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let RawEntries(entries) = RawEntries::deserialize(deserializer)?;
        Dataset::from_entries(entries).map_err(serde::de::Error::custom)
    }
}
