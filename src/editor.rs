//! The editable-document state machine. One [`Editor`] holds a flavor of
//! top-level records (configurations or clusters) loaded from the service,
//! tracks which of them differ from their stored form, gates navigation away
//! from unsaved work, and turns save/discard into explicit two-phase steps so
//! the remote call stays outside of it.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::compare::objects_equal;
use crate::model::{AUDIT_KEYS, NEW_DOCUMENT_ID, natural_cmp};
use crate::selection::{SelectionPath, changed_top_level};
use crate::validate::ValidationError;

mod edits;
mod kinds;

/// Behavior an editable top-level record flavor plugs into the editor.
pub trait TopLevel: Clone + Serialize {
    /// Human label for messages, e.g. "configuration".
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn name(&self) -> &str;

    /// A fresh unsaved record carrying the sentinel id, audit fields
    /// pre-filled from its creator. The server restamps them on create.
    fn placeholder(creator: &str, now: &str) -> Self;

    fn validate(&self, siblings: &[Self]) -> Vec<ValidationError>;

    /// Maps a selection path that was valid against the `request` snapshot
    /// onto the `canonical` record the server returned. Matching is by
    /// position, so a server-side rename (trimming, say) keeps the same node
    /// selected under its new name. Segments that no longer resolve are
    /// dropped.
    fn remap_selection(request: &Self, canonical: &Self, path: &SelectionPath) -> SelectionPath;

    /// Longest prefix of `path` that still resolves inside this record.
    fn deepest_resolvable(&self, path: &SelectionPath) -> SelectionPath;
}

/// Outcome of a selection request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    Applied,
    /// The move leaves a record with unsaved changes; nothing happened. The
    /// target is parked until save, discard, or cancel resolves it.
    ConfirmationRequired,
}

/// Snapshot handed out by [`Editor::save_prepare`]; the caller sends
/// `request` to the service and feeds the canonical response back into
/// [`Editor::save_commit`].
#[derive(Clone, Debug)]
pub struct SavePlan<T> {
    pub id: String,
    pub is_new: bool,
    pub request: T,
}

/// Outcome of [`Editor::save_prepare`].
#[derive(Clone, Debug)]
pub enum SaveOutcome<T> {
    Ready(SavePlan<T>),
    /// Validation failed; no state changed beyond recording the findings.
    Blocked(Vec<ValidationError>),
}

pub struct Editor<T: TopLevel> {
    documents: Vec<T>,
    originals: Vec<T>,
    modified: BTreeSet<String>,
    selection: Option<SelectionPath>,
    /// Copy of the selected record as it looked when the selection landed on
    /// it; discard restores this, not the stored original.
    selected_baseline: Option<T>,
    /// Parked navigation target while the guard waits for a decision.
    /// `Some(None)` parks a move to "nothing selected".
    pending: Option<Option<SelectionPath>>,
    errors: Vec<ValidationError>,
}

impl<T: TopLevel> Default for Editor<T> {
    fn default() -> Self {
        Editor {
            documents: Vec::new(),
            originals: Vec::new(),
            modified: BTreeSet::new(),
            selection: None,
            selected_baseline: None,
            pending: None,
            errors: Vec::new(),
        }
    }
}

impl<T: TopLevel> Editor<T> {
    /// Replaces the whole collection with freshly fetched records. All edit
    /// state is reset; the records are kept name-sorted from here on.
    pub fn load(&mut self, mut records: Vec<T>) {
        records.sort_by(|a, b| natural_cmp(a.name(), b.name()));
        self.originals = records.clone();
        self.documents = records;
        self.modified.clear();
        self.selection = None;
        self.selected_baseline = None;
        self.pending = None;
        self.errors.clear();
    }

    pub fn documents(&self) -> &[T] {
        &self.documents
    }

    pub fn document(&self, id: &str) -> Option<&T> {
        self.documents.iter().find(|d| d.id() == id)
    }

    pub fn selection(&self) -> Option<&SelectionPath> {
        self.selection.as_ref()
    }

    pub fn current_document(&self) -> Option<&T> {
        self.selection
            .as_ref()
            .and_then(|p| self.document(p.top_level()))
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn is_modified(&self, id: &str) -> bool {
        self.modified.contains(id)
    }

    pub fn any_modified(&self) -> bool {
        !self.modified.is_empty()
    }

    /// True when the record the selection sits on has unsaved changes.
    pub fn current_dirty(&self) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|p| self.modified.contains(p.top_level()))
    }

    pub fn guard_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Requests a selection change. Moves that leave a dirty record do not
    /// happen; the target is parked and `ConfirmationRequired` comes back so
    /// the caller can ask the user. Everything else applies immediately.
    pub fn select(&mut self, target: Option<SelectionPath>) -> SelectOutcome {
        if self.pending.is_some() {
            return SelectOutcome::ConfirmationRequired;
        }
        if changed_top_level(self.selection.as_ref(), target.as_ref()) && self.current_dirty() {
            self.pending = Some(target);
            return SelectOutcome::ConfirmationRequired;
        }
        self.apply_selection(target);
        SelectOutcome::Applied
    }

    fn apply_selection(&mut self, target: Option<SelectionPath>) {
        if changed_top_level(self.selection.as_ref(), target.as_ref()) {
            self.selected_baseline = target
                .as_ref()
                .and_then(|p| self.document(p.top_level()))
                .cloned();
        }
        self.selection = target;
    }

    /// Mutates the record with `id` in place and re-derives its dirty state
    /// by comparing the wire shape against the stored original. A record
    /// without a stored original (an unsaved one) always stays dirty.
    pub fn apply_edit(&mut self, id: &str, edit: impl FnOnce(&mut T)) -> Result<()> {
        let Some(doc) = self.documents.iter_mut().find(|d| d.id() == id) else {
            anyhow::bail!("no {} with id {}", T::KIND, id);
        };
        edit(doc);
        self.sort_documents();
        self.recompute_dirty(id)
    }

    fn recompute_dirty(&mut self, id: &str) -> Result<()> {
        let current = match self.document(id) {
            Some(doc) => {
                Some(serde_json::to_value(doc).with_context(|| format!("serialize {}", T::KIND))?)
            }
            None => None,
        };
        let original = match self.originals.iter().find(|d| d.id() == id) {
            Some(doc) => {
                Some(serde_json::to_value(doc).with_context(|| format!("serialize {}", T::KIND))?)
            }
            None => None,
        };
        if objects_equal(original.as_ref(), current.as_ref(), AUDIT_KEYS) {
            self.modified.remove(id);
        } else {
            self.modified.insert(id.to_string());
        }
        Ok(())
    }

    /// Adds a fresh placeholder record and selects it. At most one unsaved
    /// record can exist at a time; callers also keep this off the menu while
    /// the current record is dirty.
    pub fn add_top_level(&mut self, creator: &str) -> Result<SelectionPath> {
        if self.document(NEW_DOCUMENT_ID).is_some() {
            anyhow::bail!(
                "an unsaved {} already exists; save or discard it first",
                T::KIND
            );
        }
        let now = OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default();
        let record = T::placeholder(creator, &now);
        let path = SelectionPath::root(record.id().to_string());
        self.documents.push(record.clone());
        self.sort_documents();
        self.modified.insert(record.id().to_string());
        self.selected_baseline = Some(record);
        self.selection = Some(path.clone());
        Ok(path)
    }

    /// First half of a save: validates the selected record against its
    /// siblings and hands out the request snapshot. On validation failure
    /// the findings are recorded and nothing else changes.
    pub fn save_prepare(&mut self) -> Result<SaveOutcome<T>> {
        let Some(path) = self.selection.clone() else {
            anyhow::bail!("nothing is selected");
        };
        let id = path.top_level().to_string();
        let Some(record) = self.document(&id).cloned() else {
            anyhow::bail!("no {} with id {}", T::KIND, id);
        };
        let siblings: Vec<T> = self
            .documents
            .iter()
            .filter(|d| d.id() != id)
            .cloned()
            .collect();
        let findings = record.validate(&siblings);
        if !findings.is_empty() {
            self.errors = findings.clone();
            return Ok(SaveOutcome::Blocked(findings));
        }
        self.errors.clear();
        Ok(SaveOutcome::Ready(SavePlan {
            is_new: id == NEW_DOCUMENT_ID,
            id,
            request: record,
        }))
    }

    /// Second half of a save: replaces the saved record with the canonical
    /// form the server returned, rebases every record as clean, and follows
    /// the selection through id assignment and server-side renames.
    pub fn save_commit(&mut self, plan: &SavePlan<T>, canonical: T) {
        if let Some(slot) = self.documents.iter_mut().find(|d| d.id() == plan.id) {
            *slot = canonical.clone();
        } else {
            self.documents.push(canonical.clone());
        }
        self.sort_documents();
        self.originals = self.documents.clone();
        self.modified.clear();
        self.errors.clear();
        if let Some(path) = self.selection.take() {
            if path.top_level() == plan.id {
                self.selected_baseline = Some(canonical.clone());
                self.selection = Some(T::remap_selection(&plan.request, &canonical, &path));
            } else {
                self.selection = Some(path);
            }
        }
    }

    /// Throws away the selected record's unsaved changes. A record that was
    /// never saved disappears; anything else snaps back to the baseline
    /// captured when it was selected. A parked navigation target, if any,
    /// is applied afterwards.
    pub fn discard(&mut self) {
        let pending = self.pending.take();
        let Some(path) = self.selection.clone() else {
            if let Some(target) = pending {
                self.apply_selection(target);
            }
            return;
        };
        let id = path.top_level().to_string();

        if id == NEW_DOCUMENT_ID {
            self.documents.retain(|d| d.id() != NEW_DOCUMENT_ID);
            self.modified.remove(NEW_DOCUMENT_ID);
            self.errors.clear();
            self.selection = None;
            self.selected_baseline = None;
            if let Some(target) = pending {
                self.apply_selection(target);
            }
            return;
        }

        if let Some(baseline) = self.selected_baseline.clone() {
            if let Some(slot) = self.documents.iter_mut().find(|d| d.id() == id) {
                *slot = baseline;
            }
            self.sort_documents();
        }
        self.modified.remove(&id);
        self.errors.clear();
        match pending {
            Some(target) => self.apply_selection(target),
            None => {
                // Stay put, trimmed to whatever still resolves after the
                // restore (restored records can lose children).
                self.selection = self.document(&id).map(|d| d.deepest_resolvable(&path));
            }
        }
    }

    /// Drops the parked navigation target; the selection stays where it is.
    pub fn cancel_navigation(&mut self) {
        self.pending = None;
    }

    /// Hands the parked navigation target to the caller, for applying after
    /// a guard-save succeeds.
    pub fn take_pending(&mut self) -> Option<Option<SelectionPath>> {
        self.pending.take()
    }

    fn sort_documents(&mut self) {
        self.documents.sort_by(|a, b| natural_cmp(a.name(), b.name()));
    }
}

#[cfg(test)]
#[path = "tests/editor_tests.rs"]
mod tests;
