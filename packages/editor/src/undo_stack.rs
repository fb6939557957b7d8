//! # Undo/Redo Stack
//!
//! Tracks mutation history and enables undo/redo operations.
//!
//! - Each mutation records its inverse before being applied
//! - Undo applies the inverses and moves the batch to the redo stack
//! - Redo reapplies the original mutations
//! - New mutations clear the redo stack
//! - Batches group several mutations into one undo step

use crate::errors::EditorResult;
use crate::mutations::Mutation;
use letter_schema::EditorDocument;
use tracing::debug;

/// A group of mutations that should be undone/redone together
#[derive(Debug, Clone)]
pub struct MutationBatch {
    /// In application order
    pub mutations: Vec<Mutation>,

    /// In undo order (reverse of application)
    pub inverses: Vec<Mutation>,

    pub description: Option<String>,
}

impl MutationBatch {
    pub fn single(mutation: Mutation, inverse: Mutation) -> Self {
        Self {
            mutations: vec![mutation],
            inverses: vec![inverse],
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Undo/redo stack for document editing
#[derive(Debug)]
pub struct UndoStack {
    undo_stack: Vec<MutationBatch>,
    redo_stack: Vec<MutationBatch>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    current_batch: Option<MutationBatch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Apply a mutation and record it for undo
    pub fn apply(&mut self, mutation: &Mutation, doc: &mut EditorDocument) -> EditorResult<()> {
        if !mutation.is_undoable() {
            return mutation.apply(doc);
        }

        let inverse = mutation.to_inverse(doc)?;
        mutation.apply(doc)?;

        if let Some(batch) = &mut self.current_batch {
            batch.mutations.push(mutation.clone());
            batch.inverses.insert(0, inverse);
        } else {
            self.push_batch(MutationBatch::single(mutation.clone(), inverse));
        }

        Ok(())
    }

    /// Start a batch of mutations (will be undone/redone together)
    pub fn begin_batch(&mut self, description: Option<String>) {
        self.current_batch = Some(MutationBatch {
            mutations: Vec::new(),
            inverses: Vec::new(),
            description,
        });
    }

    /// End the current batch and push to undo stack
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if !batch.mutations.is_empty() {
                self.push_batch(batch);
            }
        }
    }

    fn push_batch(&mut self, batch: MutationBatch) {
        self.undo_stack.push(batch);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        self.redo_stack.clear();
    }

    /// Undo the most recent batch; `false` when there is nothing to undo
    pub fn undo(&mut self, doc: &mut EditorDocument) -> EditorResult<bool> {
        let Some(batch) = self.undo_stack.pop() else {
            return Ok(false);
        };

        for inverse in &batch.inverses {
            inverse.apply(doc)?;
        }
        debug!(mutations = batch.mutations.len(), "Undo");

        self.redo_stack.push(batch);
        Ok(true)
    }

    /// Redo the most recently undone batch
    pub fn redo(&mut self, doc: &mut EditorDocument) -> EditorResult<bool> {
        let Some(batch) = self.redo_stack.pop() else {
            return Ok(false);
        };

        for mutation in &batch.mutations {
            mutation.apply(doc)?;
        }
        debug!(mutations = batch.mutations.len(), "Redo");

        self.undo_stack.push(batch);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
