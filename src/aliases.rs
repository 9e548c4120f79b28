//! The in-memory alias table.
//!
//! A fixed number of slots maps user-chosen names to command names. Removal
//! leaves a hole that later insertions reuse, so slot order is stable for
//! the lifetime of an entry; `listnewnames` and `savenewnames` both walk
//! the table in slot order.

use thiserror::Error;

/// Number of alias slots in a table built with [`AliasTable::new`].
pub const DEFAULT_CAPACITY: usize = 10;

/// Errors produced by alias table mutations.
///
/// Both are user-level errors: the interactive loop reports them and keeps
/// running.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AliasError {
    /// Every slot is occupied and neither replace rule applied.
    #[error("max number of aliases exceeded ({0})")]
    TableFull(usize),
    /// No occupied slot carries the requested name.
    #[error("alias \"{0}\" does not exist")]
    NotFound(String),
}

/// A single `name -> target` mapping.
///
/// The target is the literal first token of a command line (builtin or
/// external program name), stored verbatim. It is never resolved again, so
/// alias chains cannot form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub name: String,
    pub target: String,
}

/// Fixed-capacity alias storage with tombstone slots.
#[derive(Debug)]
pub struct AliasTable {
    slots: Vec<Option<AliasEntry>>,
}

impl AliasTable {
    /// An empty table with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// An empty table with a caller-chosen slot count.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// First occupied slot whose name matches, if any.
    pub fn lookup_by_name(&self, name: &str) -> Option<&AliasEntry> {
        self.slots.iter().flatten().find(|entry| entry.name == name)
    }

    /// First occupied slot whose target matches, if any.
    pub fn lookup_by_target(&self, target: &str) -> Option<&AliasEntry> {
        self.slots
            .iter()
            .flatten()
            .find(|entry| entry.target == target)
    }

    /// Target stored for `name`, if an alias with that name exists.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.lookup_by_name(name).map(|entry| entry.target.as_str())
    }

    /// Add or replace an alias.
    ///
    /// Replace-by-name takes priority: redefining an existing alias
    /// overwrites its target in place. Otherwise, if some entry already
    /// points at `target`, that slot is re-pointed to the new name. Only
    /// when neither rule applies is a fresh entry written to the first
    /// empty slot; with no empty slot left the table is unchanged and
    /// [`AliasError::TableFull`] is returned.
    pub fn define(&mut self, name: &str, target: &str) -> Result<(), AliasError> {
        let slot = self
            .position_by_name(name)
            .or_else(|| self.position_by_target(target))
            .or_else(|| self.slots.iter().position(Option::is_none));
        match slot {
            Some(i) => {
                self.slots[i] = Some(AliasEntry {
                    name: name.to_owned(),
                    target: target.to_owned(),
                });
                Ok(())
            }
            None => Err(AliasError::TableFull(self.slots.len())),
        }
    }

    /// Clear the slot holding `name`. The slot becomes empty; entries after
    /// it are not compacted.
    pub fn remove(&mut self, name: &str) -> Result<(), AliasError> {
        match self.position_by_name(name) {
            Some(i) => {
                self.slots[i] = None;
                Ok(())
            }
            None => Err(AliasError::NotFound(name.to_owned())),
        }
    }

    /// Occupied slots in slot order.
    pub fn entries(&self) -> impl Iterator<Item = &AliasEntry> {
        self.slots.iter().flatten()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn position_by_name(&self, name: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|entry| entry.name == name))
    }

    fn position_by_target(&self, target: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|entry| entry.target == target))
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(table: &AliasTable) -> Vec<(&str, &str)> {
        table
            .entries()
            .map(|e| (e.name.as_str(), e.target.as_str()))
            .collect()
    }

    #[test]
    fn test_define_and_lookup() {
        let mut table = AliasTable::new();
        table.define("ll", "ls").unwrap();

        let entry = table.lookup_by_name("ll").unwrap();
        assert_eq!(entry.name, "ll");
        assert_eq!(entry.target, "ls");
        assert_eq!(table.resolve("ll"), Some("ls"));
        assert_eq!(table.resolve("ls"), None);
    }

    #[test]
    fn test_multi_word_target_is_stored_verbatim() {
        let mut table = AliasTable::new();
        table.define("ll", "ls -l").unwrap();
        assert_eq!(
            table.lookup_by_name("ll").unwrap().target,
            "ls -l",
            "the target is one string, not a pre-tokenized command line"
        );
    }

    #[test]
    fn test_redefining_a_name_overwrites_in_place() {
        let mut table = AliasTable::new();
        table.define("g", "git").unwrap();
        table.define("g", "grep").unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(names(&table), [("g", "grep")]);
    }

    #[test]
    fn test_defining_an_existing_target_repoints_its_slot() {
        let mut table = AliasTable::new();
        table.define("g", "git").unwrap();
        table.define("other", "ls").unwrap();
        table.define("gr", "git").unwrap();

        // "gr" took over the slot that mapped "g" to git.
        assert_eq!(table.len(), 2);
        assert_eq!(names(&table), [("gr", "git"), ("other", "ls")]);
        assert_eq!(table.resolve("g"), None);
        assert_eq!(table.lookup_by_target("git").unwrap().name, "gr");
    }

    #[test]
    fn test_replace_by_name_beats_replace_by_target() {
        let mut table = AliasTable::new();
        table.define("g", "git").unwrap();
        table.define("x", "grep").unwrap();
        table.define("g", "grep").unwrap();

        // The "g" slot was rewritten; the "x" slot is untouched even though
        // its target matched.
        assert_eq!(names(&table), [("g", "grep"), ("x", "grep")]);
    }

    #[test]
    fn test_remove_clears_the_slot() {
        let mut table = AliasTable::new();
        table.define("g", "git").unwrap();
        table.remove("g").unwrap();

        assert!(table.is_empty());
        assert_eq!(table.resolve("g"), None);
    }

    #[test]
    fn test_remove_missing_alias_is_not_found() {
        let mut table = AliasTable::new();
        table.define("g", "git").unwrap();

        let err = table.remove("nope").unwrap_err();
        assert_eq!(err, AliasError::NotFound("nope".to_owned()));
        assert_eq!(names(&table), [("g", "git")]);
    }

    #[test]
    fn test_removed_slot_is_reused_in_slot_order() {
        let mut table = AliasTable::new();
        table.define("a", "one").unwrap();
        table.define("b", "two").unwrap();
        table.define("c", "three").unwrap();
        table.remove("b").unwrap();
        table.define("d", "four").unwrap();

        // "d" filled the hole left by "b", not a slot after "c".
        assert_eq!(
            names(&table),
            [("a", "one"), ("d", "four"), ("c", "three")]
        );
    }

    #[test]
    fn test_full_table_rejects_new_names() {
        let mut table = AliasTable::new();
        for i in 0..DEFAULT_CAPACITY {
            table.define(&format!("name{i}"), &format!("cmd{i}")).unwrap();
        }

        let err = table.define("extra", "cmd-extra").unwrap_err();
        assert_eq!(err, AliasError::TableFull(DEFAULT_CAPACITY));
        assert_eq!(table.len(), DEFAULT_CAPACITY);
        assert_eq!(table.resolve("extra"), None);
    }

    #[test]
    fn test_full_table_still_replaces_existing_entries() {
        let mut table = AliasTable::with_capacity(2);
        table.define("a", "one").unwrap();
        table.define("b", "two").unwrap();

        table.define("a", "uno").unwrap();
        table.define("c", "two").unwrap();

        assert_eq!(names(&table), [("a", "uno"), ("c", "two")]);
    }
}
