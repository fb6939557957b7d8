//! # Edit Session Management
//!
//! One user's view of a document: the target being edited, the current
//! block selection and the undo history.

use crate::errors::{EditorError, EditorResult};
use crate::mutations::Mutation;
use crate::target::EditTarget;
use crate::undo_stack::UndoStack;
use letter_renderer::{
    render_document, ChangePhase, GeometryChange, RenderOptions, RenderedDocument,
};
use letter_schema::EditorDocument;
use tracing::{debug, info, instrument};

pub struct EditSession {
    pub id: String,
    target: EditTarget,
    selected_block: Option<String>,
    undo: UndoStack,
}

impl EditSession {
    pub fn new(id: impl Into<String>, target: EditTarget) -> Self {
        Self {
            id: id.into(),
            target,
            selected_block: None,
            undo: UndoStack::new(),
        }
    }

    pub fn target(&self) -> &EditTarget {
        &self.target
    }

    pub fn document(&self) -> &EditorDocument {
        self.target.document()
    }

    pub fn selected_block(&self) -> Option<&str> {
        self.selected_block.as_deref()
    }

    pub fn history(&self) -> &UndoStack {
        &self.undo
    }

    /// Apply a mutation and record it for undo
    #[instrument(skip(self, mutation), fields(session = %self.id, mutation = mutation.name()))]
    pub fn apply(&mut self, mutation: Mutation) -> EditorResult<()> {
        if self.target.is_branch() && mutation.touches_data() {
            return Err(EditorError::ReadOnly);
        }

        self.undo.apply(&mutation, self.target.document_mut())?;
        self.sync_selection();
        debug!("Applied mutation");
        Ok(())
    }

    /// Apply several mutations as one undo step
    ///
    /// Stops at the first failure; mutations already applied stay applied
    /// and are undoable as a group.
    pub fn apply_batch(
        &mut self,
        description: impl Into<String>,
        mutations: Vec<Mutation>,
    ) -> EditorResult<()> {
        self.undo.begin_batch(Some(description.into()));
        let result = mutations.into_iter().try_for_each(|mutation| self.apply(mutation));
        self.undo.end_batch();
        result
    }

    pub fn undo(&mut self) -> EditorResult<bool> {
        let undone = self.undo.undo(self.target.document_mut())?;
        self.sync_selection();
        Ok(undone)
    }

    pub fn redo(&mut self) -> EditorResult<bool> {
        let redone = self.undo.redo(self.target.document_mut())?;
        self.sync_selection();
        Ok(redone)
    }

    /// Select a block, or clear the selection with `None`
    pub fn select(&mut self, block_id: Option<&str>) -> EditorResult<()> {
        match block_id {
            Some(id) if !self.document().blocks.iter().any(|block| block.id == id) => {
                Err(EditorError::BlockNotFound(id.to_string()))
            }
            _ => {
                self.selected_block = block_id.map(str::to_string);
                Ok(())
            }
        }
    }

    /// Persist a finished drag; updates and cancels leave the document alone
    pub fn apply_geometry_change(&mut self, change: &GeometryChange) -> EditorResult<bool> {
        if change.phase != ChangePhase::Commit || change.geometry == change.original {
            return Ok(false);
        }

        self.apply(Mutation::SetElementGeometry {
            block_id: change.target.block_id.clone(),
            element_id: change.target.element_id.clone(),
            geometry: change.geometry,
        })?;
        Ok(true)
    }

    pub fn render(&self, options: &RenderOptions) -> EditorResult<RenderedDocument> {
        let rendered = render_document(self.document(), options)?;
        info!(
            session = %self.id,
            blocks = rendered.block_count,
            warnings = rendered.warnings.len(),
            "Rendered session document"
        );
        Ok(rendered)
    }

    pub fn into_target(self) -> EditTarget {
        self.target
    }

    /// Drop a selection that points at a block that no longer exists
    fn sync_selection(&mut self) {
        if let Some(selected) = &self.selected_block {
            if !self.document().blocks.iter().any(|block| &block.id == selected) {
                self.selected_block = None;
            }
        }
    }
}
