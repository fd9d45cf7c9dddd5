//! Tree builder: assembles tributary records into a rooted binary tree.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use generational_arena::Index;
use tracing::{instrument, warn};

use crate::domain::arena::{NodeData, RiverTree};
use crate::domain::entities::TributaryRecord;
use crate::domain::error::{DomainError, TreeResult};

/// A record the builder refused, with the reason. Non-fatal: the build
/// continues with the next record.
#[derive(Debug)]
pub struct SkippedRecord {
    /// 1-based line number in the record source
    pub line: usize,
    pub reason: DomainError,
}

impl std::fmt::Display for SkippedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

/// Constructs a binary tributary tree from node-descriptor records.
///
/// Parent references are resolved through a name index scoped to one build,
/// making the per-record insert O(1) amortized. Nodes are registered under
/// their own name only after successful attachment, so an orphaned record
/// can never acquire children later.
pub struct TreeBuilder {
    index: HashMap<String, Index>,
    skipped: Vec<SkippedRecord>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            skipped: Vec::new(),
        }
    }

    /// Records refused during the last build, in source order.
    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    /// Build a tree from a CSV record source. The first line is a header
    /// and is discarded; blank lines are ignored.
    ///
    /// An unreadable source is `SourceUnavailable`; a source without any
    /// root record is `NoRoot`. Everything record-level is a skip, not a
    /// failure.
    #[instrument(level = "debug", skip(self))]
    pub fn build_from_csv(&mut self, path: &Path) -> TreeResult<RiverTree> {
        let file =
            File::open(path).map_err(|_| DomainError::SourceUnavailable(path.to_path_buf()))?;
        let reader = BufReader::new(file);

        self.index.clear();
        self.skipped.clear();

        let mut tree = RiverTree::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line_no == 0 || line.trim().is_empty() {
                continue;
            }
            match TributaryRecord::parse(&line) {
                Ok(record) => self.insert_record(&mut tree, record, line_no + 1),
                Err(reason) => self.skip(line_no + 1, reason),
            }
        }

        if tree.root().is_none() {
            return Err(DomainError::NoRoot);
        }
        Ok(tree)
    }

    /// Build a tree from pre-parsed records. Same insertion policy as
    /// `build_from_csv`; skip diagnostics use 1-based record ordinals.
    #[instrument(level = "debug", skip(self, records))]
    pub fn build_from_records(
        &mut self,
        records: impl IntoIterator<Item = TributaryRecord>,
    ) -> TreeResult<RiverTree> {
        self.index.clear();
        self.skipped.clear();

        let mut tree = RiverTree::new();
        for (ordinal, record) in records.into_iter().enumerate() {
            self.insert_record(&mut tree, record, ordinal + 1);
        }

        if tree.root().is_none() {
            return Err(DomainError::NoRoot);
        }
        Ok(tree)
    }

    /// Insert one record: root records set the root, others attach to the
    /// first empty child slot of their parent, found via the name index.
    fn insert_record(&mut self, tree: &mut RiverTree, record: TributaryRecord, line: usize) {
        if self.index.contains_key(&record.name) {
            return self.skip(line, DomainError::DuplicateName(record.name));
        }

        let TributaryRecord {
            name,
            parent,
            flow_rate,
            dams,
        } = record;
        let data = NodeData {
            name: name.clone(),
            flow_rate,
            dams,
        };

        let attached = match parent {
            None => {
                if tree.root().is_some() {
                    return self.skip(line, DomainError::DuplicateRoot(name));
                }
                Ok(tree.set_root(data))
            }
            Some(parent_name) => match self.index.get(&parent_name) {
                Some(&parent_idx) => tree.attach_child(parent_idx, data),
                None => Err(DomainError::OrphanRecord(parent_name)),
            },
        };

        match attached {
            Ok(idx) => {
                self.index.insert(name, idx);
            }
            Err(reason) => self.skip(line, reason),
        }
    }

    fn skip(&mut self, line: usize, reason: DomainError) {
        warn!("skipping record at line {}: {}", line, reason);
        self.skipped.push(SkippedRecord { line, reason });
    }
}
