//! Snapshot undo/redo.
//!
//! Every committed edit first pushes a deep copy of the scene as it was
//! before the edit. Undo swaps the current scene with the top of the undo
//! stack and moves the current one onto the redo stack; redo does the
//! reverse. A new edit invalidates the redo stack.
//!
//! Freehand drawing uses **lazy batching**: `begin_batch` captures the
//! scene at pointer-down but pushes it only when the first segment is
//! actually committed, so a click without movement leaves no entry and a
//! whole stroke trail undoes as one step.

use ink_core::model::Scene;
use ink_core::store::SceneStore;

use crate::edit::SceneEdit;

#[derive(Debug, Clone)]
struct Checkpoint {
    scene: Scene,
    description: &'static str,
}

#[derive(Debug)]
enum Batch {
    Idle,
    /// Snapshot taken at gesture start, not yet pushed.
    Pending(Scene),
    /// Snapshot already pushed; later edits in the gesture share it.
    Committed,
}

/// Bounded undo/redo stacks of scene snapshots.
#[derive(Debug)]
pub struct History {
    undo_stack: Vec<Checkpoint>,
    redo_stack: Vec<Checkpoint>,
    /// Maximum undo depth; the oldest entry is dropped past it.
    max_depth: usize,
    batch: Batch,
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        let max_depth = max_depth.max(1);
        Self {
            undo_stack: Vec::with_capacity(max_depth.min(64)),
            redo_stack: Vec::new(),
            max_depth,
            batch: Batch::Idle,
        }
    }

    /// Start a gesture. Edits until `end_batch()` share one undo entry,
    /// pushed lazily on the first edit that changes the scene.
    pub fn begin_batch(&mut self, store: &SceneStore) {
        self.batch = Batch::Pending(store.snapshot());
    }

    pub fn end_batch(&mut self) {
        self.batch = Batch::Idle;
    }

    pub fn in_batch(&self) -> bool {
        !matches!(self.batch, Batch::Idle)
    }

    /// Apply an edit, recording a checkpoint first if it changes the
    /// scene. Returns whether the scene changed.
    pub fn execute(&mut self, store: &mut SceneStore, edit: SceneEdit) -> bool {
        if !edit.changes(store.scene()) {
            return false;
        }
        let description = edit.description();
        match std::mem::replace(&mut self.batch, Batch::Idle) {
            Batch::Idle => self.push(store.snapshot(), description),
            Batch::Pending(before) => {
                self.push(before, description);
                self.batch = Batch::Committed;
            }
            Batch::Committed => self.batch = Batch::Committed,
        }
        edit.apply(store)
    }

    fn push(&mut self, scene: Scene, description: &'static str) {
        self.undo_stack.push(Checkpoint { scene, description });
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
        // A new edit forks history.
        self.redo_stack.clear();
    }

    /// Restore the previous scene. Returns the description of the undone
    /// edit, or `None` when there is nothing to undo.
    pub fn undo(&mut self, store: &mut SceneStore) -> Option<&'static str> {
        let Checkpoint { scene, description } = self.undo_stack.pop()?;
        self.batch = Batch::Idle;
        let current = store.restore(scene);
        self.redo_stack.push(Checkpoint {
            scene: current,
            description,
        });
        Some(description)
    }

    /// Reapply the last undone edit.
    pub fn redo(&mut self, store: &mut SceneStore) -> Option<&'static str> {
        let Checkpoint { scene, description } = self.redo_stack.pop()?;
        self.batch = Batch::Idle;
        let current = store.restore(scene);
        self.undo_stack.push(Checkpoint {
            scene: current,
            description,
        });
        Some(description)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.batch = Batch::Idle;
    }
}
