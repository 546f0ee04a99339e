//! The requirements manifest as an ordered list of records.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use regex::RegexBuilder;
use tracing::debug;

use crate::error::{ReqzError, Result};
use crate::files::SafeFileWriter;

use super::record::{is_option_line, RequirementRecord};

/// Outcome of [`RequirementCollection::add_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddResult {
    /// A new entry was appended.
    Added,
    /// An entry with the same name was replaced; holds the old record.
    Replaced(RequirementRecord),
}

/// Ordered, name-addressable list of requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementCollection {
    records: Vec<RequirementRecord>,
}

impl RequirementCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse manifest lines, keeping their order.
    ///
    /// Blank lines, `#` comments and pip option lines are skipped.
    /// Duplicate names are kept as written.
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut records = Vec::new();
        for (index, line) in lines.into_iter().enumerate() {
            let text = line.as_ref().trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            if is_option_line(text) {
                debug!("Skipping option line {}: {}", index + 1, text);
                continue;
            }
            let record = RequirementRecord::parse(text).map_err(|err| match err {
                ReqzError::Parse { line, message } => ReqzError::Parse {
                    line,
                    message: format!("line {}: {}", index + 1, message),
                },
                other => other,
            })?;
            records.push(record);
        }
        Ok(Self { records })
    }

    /// Read and parse a manifest file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading requirements from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| ReqzError::from_io(path, e))?;
        Self::from_lines(content.lines())
    }

    /// Parse `line` and add it, replacing an entry with the same name.
    ///
    /// Fails with [`ReqzError::Duplicate`] when the existing entry overlaps
    /// the new one; the collection is left unchanged.
    pub fn add_line(&mut self, line: &str) -> Result<AddResult> {
        let record = RequirementRecord::parse(line)?;
        let key = record.key();

        match self.records.iter().position(|r| r.key() == key) {
            Some(index) => {
                let existing = &self.records[index];
                if existing.overlaps(&record) {
                    return Err(ReqzError::Duplicate {
                        existing: existing.to_string(),
                    });
                }
                debug!("Replacing {} with {}", existing, record);
                let previous = std::mem::replace(&mut self.records[index], record);
                Ok(AddResult::Replaced(previous))
            }
            None => {
                debug!("Adding {}", record);
                self.records.push(record);
                Ok(AddResult::Added)
            }
        }
    }

    /// Names appearing more than once, mapped to their extra occurrences.
    ///
    /// Grouping ignores case; the key is the first occurrence's name.
    pub fn duplicates(&self) -> BTreeMap<String, usize> {
        let mut counts: Vec<(String, String, usize)> = Vec::new();
        for record in &self.records {
            let key = record.key();
            match counts.iter_mut().find(|(k, _, _)| *k == key) {
                Some(entry) => entry.2 += 1,
                None => counts.push((key, record.name().to_string(), 1)),
            }
        }
        counts
            .into_iter()
            .filter(|(_, _, count)| *count > 1)
            .map(|(_, name, count)| (name, count - 1))
            .collect()
    }

    /// Records whose manifest form matches `pattern`.
    pub fn search(&self, pattern: &str, ignore_case: bool) -> Result<Vec<&RequirementRecord>> {
        self.search_filtered(pattern, ignore_case, true)
    }

    /// Records whose manifest form does not match `pattern`.
    pub fn search_inverted(
        &self,
        pattern: &str,
        ignore_case: bool,
    ) -> Result<Vec<&RequirementRecord>> {
        self.search_filtered(pattern, ignore_case, false)
    }

    fn search_filtered(
        &self,
        pattern: &str,
        ignore_case: bool,
        keep_matches: bool,
    ) -> Result<Vec<&RequirementRecord>> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(ignore_case)
            .build()
            .map_err(|source| ReqzError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(self
            .records
            .iter()
            .filter(|r| regex.is_match(&r.to_string()) == keep_matches)
            .collect())
    }

    /// Record names in manifest order.
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(RequirementRecord::name).collect()
    }

    /// First record with `name`, ignoring case.
    pub fn get_by_name(&self, name: &str) -> Option<&RequirementRecord> {
        self.records
            .iter()
            .find(|r| r.name().eq_ignore_ascii_case(name))
    }

    /// Iterate records in manifest order.
    pub fn iter(&self) -> std::slice::Iter<'_, RequirementRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records sorted by name (ordinal, case-sensitive, stable).
    pub fn sorted(&self) -> Vec<&RequirementRecord> {
        let mut sorted: Vec<_> = self.records.iter().collect();
        sorted.sort_by(|a, b| a.name().cmp(b.name()));
        sorted
    }

    /// Widest name and widest spec string, for aligned listings.
    pub fn column_widths(&self) -> (usize, usize) {
        self.records.iter().fold((0, 0), |(name, spec), r| {
            (
                name.max(r.name().chars().count()),
                spec.max(r.spec_string().chars().count()),
            )
        })
    }

    /// The sorted manifest text: one record per line, trailing newline.
    pub fn to_manifest_string(&self) -> String {
        self.sorted()
            .iter()
            .map(|r| format!("{}\n", r))
            .collect()
    }

    /// Write the sorted manifest to `path`, keeping a backup until done.
    pub fn write(&self, path: &Path) -> Result<()> {
        debug!("Writing sorted file: {}", path.display());
        let content = self.to_manifest_string();
        SafeFileWriter::write_with(path, |writer| {
            writer
                .write_all(content.as_bytes())
                .map_err(|e| ReqzError::from_io(path, e))
        })
    }
}

impl<'a> IntoIterator for &'a RequirementCollection {
    type Item = &'a RequirementRecord;
    type IntoIter = std::slice::Iter<'a, RequirementRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<RequirementRecord> for RequirementCollection {
    fn from_iter<T: IntoIterator<Item = RequirementRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
