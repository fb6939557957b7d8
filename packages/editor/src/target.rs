use letter_schema::EditorDocument;

/// What an edit session is editing
///
/// A branch carries its merged document (parent data plus branch design)
/// but only owns the design half of it.
#[derive(Debug, Clone, PartialEq)]
pub enum EditTarget {
    Document(EditorDocument),
    Branch {
        branch_id: String,
        parent_document_id: String,
        document: EditorDocument,
    },
}

impl EditTarget {
    pub fn branch(parent_document_id: impl Into<String>, document: EditorDocument) -> Self {
        EditTarget::Branch {
            branch_id: document.id.clone(),
            parent_document_id: parent_document_id.into(),
            document,
        }
    }

    pub fn document(&self) -> &EditorDocument {
        match self {
            EditTarget::Document(document) | EditTarget::Branch { document, .. } => document,
        }
    }

    pub(crate) fn document_mut(&mut self) -> &mut EditorDocument {
        match self {
            EditTarget::Document(document) | EditTarget::Branch { document, .. } => document,
        }
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, EditTarget::Branch { .. })
    }

    pub fn into_document(self) -> EditorDocument {
        match self {
            EditTarget::Document(document) | EditTarget::Branch { document, .. } => document,
        }
    }
}
