use std::collections::BTreeMap;

use bytestream_types::{BridgeError, LogicLong, TagBridge};

/// Tag bridge backed by an explicit table.
///
/// Tags are compared verbatim. Each tag maps to one identifier and each
/// identifier to one tag; inserting either side again replaces the old pair.
#[derive(Clone, Debug, Default)]
pub struct StaticBridge {
    by_tag: BTreeMap<String, LogicLong>,
    by_id: BTreeMap<LogicLong, String>,
}

impl StaticBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_entry(mut self, tag: impl Into<String>, id: LogicLong) -> Self {
        self.insert(tag, id);
        self
    }

    pub fn insert(&mut self, tag: impl Into<String>, id: LogicLong) {
        let tag = tag.into();
        if let Some(old_id) = self.by_tag.remove(&tag) {
            self.by_id.remove(&old_id);
        }
        if let Some(old_tag) = self.by_id.remove(&id) {
            self.by_tag.remove(&old_tag);
        }
        self.by_tag.insert(tag.clone(), id);
        self.by_id.insert(id, tag);
    }

    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }
}

impl TagBridge for StaticBridge {
    fn tag_to_id(&self, tag: &str) -> Result<LogicLong, BridgeError> {
        self.by_tag
            .get(tag)
            .copied()
            .ok_or_else(|| BridgeError::UnknownTag(tag.to_string()))
    }

    fn id_to_tag(&self, id: LogicLong) -> Result<String, BridgeError> {
        self.by_id.get(&id).cloned().ok_or(BridgeError::UnmappedId {
            low: id.low,
            high: id.high,
        })
    }
}
