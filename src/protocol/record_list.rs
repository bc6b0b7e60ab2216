//! Ordered list of mapping records forming an Update body

use bytes::{BufMut, Bytes, BytesMut};
use tracing::{instrument, trace};

use super::{BindingTree, MappingRecord, Result, UpdateOptions, VersionPolicy, changed_filter};

/// Mapping records in wire order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingRecordList {
    records: Vec<MappingRecord>,
}

impl MappingRecordList {
    /// Create an empty list
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Collect every binding in `tree` that may be sent under `options`
    ///
    /// Sources, groups and bindings are visited in container order.
    ///
    /// # Errors
    ///
    /// Returns [`super::Error::UnsupportedTarget`] if the target version has no
    /// legacy rules.
    #[instrument(level = "trace", skip(tree))]
    pub fn from_tree(tree: &BindingTree, options: &UpdateOptions) -> Result<Self> {
        let policy = VersionPolicy::for_version(options.version())?;

        let mut list = Self::new();
        for (sgt, binding) in tree.iter() {
            if !changed_filter(binding, options.is_changed_only()) {
                trace!(prefix = %binding.prefix(), "skipping unchanged binding");
                continue;
            }

            match MappingRecord::from_binding(sgt, binding, &policy) {
                Some(record) => list.push(record),
                None => trace!(
                    prefix = %binding.prefix(),
                    action = ?binding.action(),
                    version = %policy.version(),
                    "binding not representable, skipping"
                ),
            }
        }

        Ok(list)
    }

    /// Append a record
    pub fn push(&mut self, record: MappingRecord) {
        self.records.push(record);
    }

    /// Get the number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the list holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get records in wire order
    #[must_use]
    pub fn records(&self) -> &[MappingRecord] {
        &self.records
    }

    /// Iterate over records in wire order
    pub fn iter(&self) -> std::slice::Iter<'_, MappingRecord> {
        self.records.iter()
    }

    /// Get encoded length of all records
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.records.iter().map(MappingRecord::encoded_len).sum()
    }

    /// Write every record to `buf`
    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        for record in &self.records {
            record.encode(buf);
        }
    }

    /// Concatenate every record into a fresh buffer
    #[must_use]
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode(&mut buf);
        buf.freeze()
    }

    /// Decode records until `payload` is exhausted
    ///
    /// # Errors
    ///
    /// Returns the first record error; no partial list is produced.
    #[instrument(level = "trace", skip(payload), fields(len = payload.len()))]
    pub fn decode(mut payload: Bytes) -> Result<Self> {
        let mut list = Self::new();
        while !payload.is_empty() {
            list.push(MappingRecord::decode(&mut payload)?);
        }
        Ok(list)
    }
}

impl<'a> IntoIterator for &'a MappingRecordList {
    type Item = &'a MappingRecord;
    type IntoIter = std::slice::Iter<'a, MappingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
