//! # Document Mutations
//!
//! Every edit the editor can make to an [`EditorDocument`]. A mutation is
//! validated against the current document before anything is touched, so a
//! failed mutation leaves the document exactly as it was.
//!
//! Each mutation can produce its inverse from the pre-edit document, which
//! is what the undo stack stores.

use crate::errors::{EditorError, EditorResult};
use letter_schema::{
    compose, Block, DocumentStatus, EditorDocument, Geometry, StyleSystem, WeddingData,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Insert a block; `index == len` appends
    AddBlock { block: Block, index: usize },

    RemoveBlock { block_id: String },

    /// Move a block so it ends up at `index`
    MoveBlock { block_id: String, index: usize },

    SetBlockEnabled { block_id: String, enabled: bool },

    /// Merge keys into block settings; a `null` value removes the key
    UpdateBlockSettings {
        block_id: String,
        settings: Map<String, Value>,
    },

    SetElementGeometry {
        block_id: String,
        element_id: String,
        geometry: Geometry,
    },

    /// Compose a partial style over the current one
    UpdateStyle { patch: StyleSystem },

    ReplaceStyle { style: StyleSystem },

    /// Set one wedding data field by dotted path; `null` clears it
    UpdateData { path: String, value: Value },

    ReplaceData { data: WeddingData },

    SetStatus { status: DocumentStatus },
}

impl Mutation {
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddBlock { .. } => "add-block",
            Mutation::RemoveBlock { .. } => "remove-block",
            Mutation::MoveBlock { .. } => "move-block",
            Mutation::SetBlockEnabled { .. } => "set-block-enabled",
            Mutation::UpdateBlockSettings { .. } => "update-block-settings",
            Mutation::SetElementGeometry { .. } => "set-element-geometry",
            Mutation::UpdateStyle { .. } => "update-style",
            Mutation::ReplaceStyle { .. } => "replace-style",
            Mutation::UpdateData { .. } => "update-data",
            Mutation::ReplaceData { .. } => "replace-data",
            Mutation::SetStatus { .. } => "set-status",
        }
    }

    /// Whether this mutation writes wedding data
    pub fn touches_data(&self) -> bool {
        matches!(self, Mutation::UpdateData { .. } | Mutation::ReplaceData { .. })
    }

    /// Status changes follow the publish lifecycle and are not undoable
    pub fn is_undoable(&self) -> bool {
        !matches!(self, Mutation::SetStatus { .. })
    }

    /// Check that the mutation can be applied without changing anything
    pub fn validate(&self, doc: &EditorDocument) -> EditorResult<()> {
        match self {
            Mutation::AddBlock { block, index } => {
                if doc.blocks.iter().any(|b| b.id == block.id) {
                    return Err(EditorError::DuplicateBlockId(block.id.clone()));
                }
                check_index(*index, doc.blocks.len(), true)
            }

            Mutation::RemoveBlock { block_id }
            | Mutation::SetBlockEnabled { block_id, .. }
            | Mutation::UpdateBlockSettings { block_id, .. } => {
                block_position(doc, block_id).map(|_| ())
            }

            Mutation::MoveBlock { block_id, index } => {
                block_position(doc, block_id)?;
                check_index(*index, doc.blocks.len(), false)
            }

            Mutation::SetElementGeometry {
                block_id,
                element_id,
                ..
            } => {
                let position = block_position(doc, block_id)?;
                doc.blocks[position]
                    .find_element(element_id)
                    .map(|_| ())
                    .ok_or_else(|| EditorError::ElementNotFound {
                        block_id: block_id.clone(),
                        element_id: element_id.clone(),
                    })
            }

            Mutation::UpdateData { path, value } => {
                data_with_path(&doc.data, path, value.clone()).map(|_| ())
            }

            Mutation::SetStatus { status } => {
                if doc.status.can_transition_to(*status) {
                    Ok(())
                } else {
                    Err(EditorError::InvalidTransition {
                        from: doc.status,
                        to: *status,
                    })
                }
            }

            Mutation::UpdateStyle { .. }
            | Mutation::ReplaceStyle { .. }
            | Mutation::ReplaceData { .. } => Ok(()),
        }
    }

    /// Apply mutation with validation
    pub fn apply(&self, doc: &mut EditorDocument) -> EditorResult<()> {
        self.validate(doc)?;

        match self {
            Mutation::AddBlock { block, index } => {
                doc.blocks.insert(*index, block.clone());
            }

            Mutation::RemoveBlock { block_id } => {
                let position = block_position(doc, block_id)?;
                doc.blocks.remove(position);
            }

            Mutation::MoveBlock { block_id, index } => {
                let position = block_position(doc, block_id)?;
                let block = doc.blocks.remove(position);
                doc.blocks.insert(*index, block);
            }

            Mutation::SetBlockEnabled { block_id, enabled } => {
                let position = block_position(doc, block_id)?;
                doc.blocks[position].enabled = *enabled;
            }

            Mutation::UpdateBlockSettings { block_id, settings } => {
                let position = block_position(doc, block_id)?;
                let target = &mut doc.blocks[position].settings;
                for (key, value) in settings {
                    if value.is_null() {
                        target.remove(key);
                    } else {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }

            Mutation::SetElementGeometry {
                block_id,
                element_id,
                geometry,
            } => {
                let position = block_position(doc, block_id)?;
                let element = doc.blocks[position]
                    .find_element_mut(element_id)
                    .ok_or_else(|| EditorError::ElementNotFound {
                        block_id: block_id.clone(),
                        element_id: element_id.clone(),
                    })?;
                element.geometry = *geometry;
            }

            Mutation::UpdateStyle { patch } => {
                doc.style = compose(&doc.style, patch);
            }

            Mutation::ReplaceStyle { style } => {
                doc.style = style.clone();
            }

            Mutation::UpdateData { path, value } => {
                doc.data = data_with_path(&doc.data, path, value.clone())?;
            }

            Mutation::ReplaceData { data } => {
                doc.data = data.clone();
            }

            Mutation::SetStatus { status } => {
                doc.status = *status;
            }
        }

        Ok(())
    }

    /// Build the mutation that undoes `self`, from the document before it is applied
    pub fn to_inverse(&self, doc: &EditorDocument) -> EditorResult<Mutation> {
        self.validate(doc)?;

        let inverse = match self {
            Mutation::AddBlock { block, .. } => Mutation::RemoveBlock {
                block_id: block.id.clone(),
            },

            Mutation::RemoveBlock { block_id } => {
                let index = block_position(doc, block_id)?;
                Mutation::AddBlock {
                    block: doc.blocks[index].clone(),
                    index,
                }
            }

            Mutation::MoveBlock { block_id, .. } => Mutation::MoveBlock {
                block_id: block_id.clone(),
                index: block_position(doc, block_id)?,
            },

            Mutation::SetBlockEnabled { block_id, .. } => {
                let index = block_position(doc, block_id)?;
                Mutation::SetBlockEnabled {
                    block_id: block_id.clone(),
                    enabled: doc.blocks[index].enabled,
                }
            }

            Mutation::UpdateBlockSettings { block_id, settings } => {
                let current = &doc.blocks[block_position(doc, block_id)?].settings;
                let previous = settings
                    .keys()
                    .map(|key| (key.clone(), current.get(key).cloned().unwrap_or(Value::Null)))
                    .collect();
                Mutation::UpdateBlockSettings {
                    block_id: block_id.clone(),
                    settings: previous,
                }
            }

            Mutation::SetElementGeometry {
                block_id,
                element_id,
                ..
            } => {
                let index = block_position(doc, block_id)?;
                let element = doc.blocks[index].find_element(element_id).ok_or_else(|| {
                    EditorError::ElementNotFound {
                        block_id: block_id.clone(),
                        element_id: element_id.clone(),
                    }
                })?;
                Mutation::SetElementGeometry {
                    block_id: block_id.clone(),
                    element_id: element_id.clone(),
                    geometry: element.geometry,
                }
            }

            Mutation::UpdateStyle { .. } | Mutation::ReplaceStyle { .. } => {
                Mutation::ReplaceStyle {
                    style: doc.style.clone(),
                }
            }

            Mutation::UpdateData { .. } | Mutation::ReplaceData { .. } => Mutation::ReplaceData {
                data: doc.data.clone(),
            },

            Mutation::SetStatus { .. } => Mutation::SetStatus { status: doc.status },
        };

        Ok(inverse)
    }
}

fn block_position(doc: &EditorDocument, block_id: &str) -> EditorResult<usize> {
    doc.blocks
        .iter()
        .position(|block| block.id == block_id)
        .ok_or_else(|| EditorError::BlockNotFound(block_id.to_string()))
}

/// Insertion may target one past the end; moves may not
fn check_index(index: usize, len: usize, allow_end: bool) -> EditorResult<()> {
    let valid = if allow_end { index <= len } else { index < len };
    if valid {
        Ok(())
    } else {
        Err(EditorError::IndexOutOfBounds { index, len })
    }
}

/// Produce a copy of `data` with one dotted path set
///
/// The write goes through the JSON form of the data, so a path is only
/// accepted if it still resolves after reading the data back. Unknown
/// top-level keys and type mismatches are rejected this way.
fn data_with_path(data: &WeddingData, path: &str, value: Value) -> EditorResult<WeddingData> {
    let invalid = || EditorError::InvalidPath(path.to_string());

    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(invalid());
    }
    let (last, parents) = segments.split_last().ok_or_else(invalid)?;

    let mut tree = serde_json::to_value(data).map_err(|_| invalid())?;
    let clearing = value.is_null();

    let mut node = &mut tree;
    for segment in parents {
        node = match node {
            Value::Object(map) => map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new())),
            Value::Array(items) => {
                let index: usize = segment.parse().map_err(|_| invalid())?;
                items.get_mut(index).ok_or_else(invalid)?
            }
            _ => return Err(invalid()),
        };
        if node.is_null() {
            *node = Value::Object(Map::new());
        }
    }

    match node {
        Value::Object(map) => {
            if clearing {
                map.remove(*last);
            } else {
                map.insert(last.to_string(), value.clone());
            }
        }
        Value::Array(items) => {
            let index: usize = last.parse().map_err(|_| invalid())?;
            let slot = items.get_mut(index).ok_or_else(invalid)?;
            *slot = value.clone();
        }
        _ => return Err(invalid()),
    }

    let updated: WeddingData = serde_json::from_value(tree).map_err(|_| invalid())?;

    // Stored data parses leniently, so a mistyped value only shows up as a
    // mismatch after the round trip.
    if !clearing {
        let check = serde_json::to_value(&updated).map_err(|_| invalid())?;
        let resolved = segments.iter().try_fold(&check, |node, segment| match node {
            Value::Object(map) => map.get(*segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        });
        match resolved {
            Some(stored) if same_json(stored, &value) => {}
            _ => return Err(invalid()),
        }
    }

    Ok(updated)
}

/// JSON equality where `64` equals `64.0` and a `null` member counts as absent
fn same_json(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| same_json(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            let present =
                |map: &Map<String, Value>| map.values().filter(|v| !v.is_null()).count();
            present(xs) == present(ys)
                && ys
                    .iter()
                    .filter(|(_, y)| !y.is_null())
                    .all(|(key, y)| xs.get(key).map_or(false, |x| same_json(x, y)))
        }
        _ => a == b,
    }
}
