use crate::snapshot::Snapshot;

/// Maximum number of committed snapshots retained.
///
/// Full-frame snapshots are memory-heavy, so history is bounded; committing
/// past the cap evicts the oldest entry, which then becomes the new undo
/// floor.
pub const MAX_HISTORY_DEPTH: usize = 64;

/// Manages the committed snapshots for undo/redo functionality.
///
/// Linear-undo semantics: any new commit invalidates the redo stack. The undo
/// stack always keeps at least one entry (the initial blank snapshot) once
/// seeded, so undo can never empty the history.
pub struct History {
    /// Committed snapshots, most recent last
    undo_stack: Vec<Snapshot>,
    /// Undone snapshots, most recently undone last
    redo_stack: Vec<Snapshot>,
}

impl History {
    /// Creates an empty history; call `reset` with the initial snapshot
    /// before using undo/redo
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Drop everything and seed the history with the initial snapshot
    pub fn reset(&mut self, initial: Snapshot) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.undo_stack.push(initial);
    }

    /// Record a finished stroke. Clears the redo stack and enforces the
    /// history cap.
    pub fn commit(&mut self, snapshot: Snapshot) {
        log::debug!("committing snapshot ({} bytes)", snapshot.size_bytes());
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();
        while self.undo_stack.len() > MAX_HISTORY_DEPTH {
            self.undo_stack.remove(0);
        }
    }

    /// Drop any redoable snapshots; new work invalidates the redo branch
    pub fn invalidate_redo(&mut self) {
        self.redo_stack.clear();
    }

    /// Step back one commit, returning the snapshot to restore.
    ///
    /// `None` when the history is at its floor; callers treat that as a
    /// silent no-op.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.undo_stack.len() <= 1 {
            log::debug!("undo ignored: history at floor");
            return None;
        }
        let top = self.undo_stack.pop()?;
        self.redo_stack.push(top);
        self.undo_stack.last()
    }

    /// Step forward one undone commit, returning the snapshot to restore.
    ///
    /// `None` when nothing has been undone.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.redo_stack.is_empty() {
            log::debug!("redo ignored: nothing to redo");
            return None;
        }
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(snapshot);
        self.undo_stack.last()
    }

    /// Returns true if a commit beyond the floor entry can be undone
    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    /// Returns true if there are snapshots that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
