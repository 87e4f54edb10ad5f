//! Hierarchy reconstruction over a flat layer sequence.
//!
//! The elements that produce visible layers are a sparse subset of the
//! source document tree, so parent/child relationships among emitted layers
//! cannot be read off the document directly: each layer's parent must be
//! the nearest *emitted* ancestor, and when two placed layers turn out to
//! share an ancestor that emitted nothing, a synthetic group frame is
//! materialized on demand.
//!
//! The algorithm is a bounded fixpoint iteration: re-parenting passes
//! repeat until a full pass produces no change. Each mutation restarts the
//! pass; exceeding the pass ceiling is a fatal internal-invariant error,
//! never a silent truncation.

use std::collections::HashMap;

use crate::error::{ConvertError, ConvertWarning, ConvertWarningCode};
use crate::layer::{Layer, LayerArena, LayerData, LayerId};

/// Identity of a node in the source snapshot.
///
/// This is the transient back-reference carried by layers under
/// construction; it never appears in serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(usize);

impl SourceId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Ancestor access into the source document, scoped to the selected root.
pub trait SourceTree {
    /// The parent of a source node, if any.
    fn parent(&self, node: SourceId) -> Option<SourceId>;

    /// Whether a node is the page boundary (the selected conversion root).
    /// Ancestor walks stop here.
    fn is_boundary(&self, node: SourceId) -> bool;
}

/// Outcome of attempting to place one layer during a pass.
enum Placement {
    /// The tree was mutated; the pass must restart.
    Changed,
    /// Nothing moved.
    Unchanged,
}

/// Reassemble the minimal nesting of the layers in `arena` under `root`.
///
/// On success the tree is structurally stable, every child coordinate is
/// parent-relative, and all back-references have been cleared. Returns the
/// number of passes taken.
///
/// # Errors
///
/// [`ConvertError::NestingDiverged`] if the fixpoint does not settle within
/// `max_passes` passes. This indicates a document/layer correspondence bug,
/// not bad input.
pub fn reconstruct(
    arena: &mut LayerArena,
    root: LayerId,
    tree: &dyn SourceTree,
    max_passes: usize,
    warnings: &mut Vec<ConvertWarning>,
) -> Result<usize, ConvertError> {
    // Reverse index: source identity -> currently assigned layer. Layers
    // sharing a source (hairlines and their owning rectangle) resolve to
    // the later emission, the owning rectangle.
    let mut index: HashMap<SourceId, LayerId> = HashMap::new();
    for id in arena.ids() {
        if let Some(source) = arena.get(id).source {
            index.insert(source, id);
        }
    }

    let mut passes = 0usize;
    loop {
        passes += 1;
        if passes > max_passes {
            return Err(ConvertError::NestingDiverged { passes: max_passes });
        }
        if !run_pass(arena, root, tree, &mut index, warnings) {
            break;
        }
    }

    // Only safe once structure is final: re-parenting changes which frame
    // offset applies to a node.
    normalize_to_parent_relative(arena, root);
    arena.clear_sources();

    Ok(passes)
}

/// One pre-order pass. Returns true (and stops) at the first mutation.
fn run_pass(
    arena: &mut LayerArena,
    root: LayerId,
    tree: &dyn SourceTree,
    index: &mut HashMap<SourceId, LayerId>,
    warnings: &mut Vec<ConvertWarning>,
) -> bool {
    let mut stack: Vec<(LayerId, Option<LayerId>)> = vec![(root, None)];

    while let Some((id, parent)) = stack.pop() {
        if let Placement::Changed = place_layer(arena, root, tree, index, id, parent, warnings) {
            return true;
        }
        for &child in arena.children(id).iter().rev() {
            stack.push((child, Some(id)));
        }
    }
    false
}

/// Walk a layer's source ancestors looking for an already-emitted layer to
/// nest under, moving the layer or synthesizing a group frame as needed.
fn place_layer(
    arena: &mut LayerArena,
    root: LayerId,
    tree: &dyn SourceTree,
    index: &mut HashMap<SourceId, LayerId>,
    id: LayerId,
    current_parent: Option<LayerId>,
    warnings: &mut Vec<ConvertWarning>,
) -> Placement {
    let Some(source) = arena.get(id).source else {
        return Placement::Unchanged;
    };

    let mut cursor = tree.parent(source);
    while let Some(ancestor) = cursor {
        if tree.is_boundary(ancestor) {
            break;
        }

        if let Some(&mapped) = index.get(&ancestor) {
            if current_parent == Some(mapped) {
                // Already nested under the nearest emitted ancestor.
                break;
            }
            if mapped != root {
                let Some(parent) = current_parent else {
                    break;
                };

                if arena.get(mapped).is_frame() {
                    return move_into_frame(arena, id, parent, mapped, warnings);
                }

                // The mapped ancestor layer cannot hold children: wrap it
                // and the current layer in a new synthetic frame spliced
                // into the mapped layer's former position.
                let Some(grandparent) = find_parent(arena, root, mapped) else {
                    // The node must not escape to a farther ancestor on
                    // the strength of a broken mapping.
                    warnings.push(
                        ConvertWarning::with_code(
                            ConvertWarningCode::MissingParent,
                            "mapped ancestor layer not found in the tree; leaving node in place",
                        )
                        .at_node(ancestor.index()),
                    );
                    return Placement::Unchanged;
                };
                return wrap_in_group(
                    arena,
                    id,
                    parent,
                    mapped,
                    grandparent,
                    ancestor,
                    index,
                    warnings,
                );
            }
        }

        cursor = tree.parent(ancestor);
    }

    Placement::Unchanged
}

/// Move `id` from `parent`'s children into the frame `target`.
fn move_into_frame(
    arena: &mut LayerArena,
    id: LayerId,
    parent: LayerId,
    target: LayerId,
    warnings: &mut Vec<ConvertWarning>,
) -> Placement {
    if !detach_child(arena, parent, id, warnings) {
        return Placement::Unchanged;
    }
    if let Some(children) = arena.children_mut(target) {
        children.push(id);
    }
    Placement::Changed
}

/// Synthesize a group frame holding `[absorbed, id]`, splice it into
/// `absorbed`'s former slot under `grandparent`, and register it under the
/// shared `ancestor` identity.
#[allow(clippy::too_many_arguments)]
fn wrap_in_group(
    arena: &mut LayerArena,
    id: LayerId,
    parent: LayerId,
    absorbed: LayerId,
    grandparent: LayerId,
    ancestor: SourceId,
    index: &mut HashMap<SourceId, LayerId>,
    warnings: &mut Vec<ConvertWarning>,
) -> Placement {
    if !detach_child(arena, parent, id, warnings) {
        return Placement::Unchanged;
    }

    let mut group = Layer::frame(arena.get(absorbed).rect, Some(ancestor));
    if let LayerData::Frame {
        clips_content,
        children,
        ..
    } = &mut group.data
    {
        *clips_content = Some(false);
        children.push(absorbed);
        children.push(id);
    }
    let group_id = arena.push(group);

    // The absorbed layer must never be matched directly again.
    arena.get_mut(absorbed).source = None;
    index.insert(ancestor, group_id);

    if let Some(siblings) = arena.children_mut(grandparent) {
        if let Some(pos) = siblings.iter().position(|&c| c == absorbed) {
            siblings[pos] = group_id;
        }
    }

    Placement::Changed
}

/// Remove `child` from `parent`'s children. A child missing from its
/// claimed parent is an invariant violation: it is logged as a recoverable
/// anomaly and the move is skipped for this pass.
fn detach_child(
    arena: &mut LayerArena,
    parent: LayerId,
    child: LayerId,
    warnings: &mut Vec<ConvertWarning>,
) -> bool {
    let Some(children) = arena.children_mut(parent) else {
        warnings.push(ConvertWarning::with_code(
            ConvertWarningCode::MissingParent,
            "layer's current parent is not a frame; leaving node in place",
        ));
        return false;
    };
    match children.iter().position(|&c| c == child) {
        Some(pos) => {
            children.remove(pos);
            true
        }
        None => {
            warnings.push(ConvertWarning::with_code(
                ConvertWarningCode::MissingParent,
                "layer not found in its claimed parent's children; leaving node in place",
            ));
            false
        }
    }
}

/// Early-return depth-first search for the frame whose children contain
/// `target`.
fn find_parent(arena: &LayerArena, root: LayerId, target: LayerId) -> Option<LayerId> {
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        for &child in arena.children(id) {
            if child == target {
                return Some(id);
            }
            stack.push(child);
        }
    }
    None
}

/// Convert every frame's direct children from document-absolute to
/// parent-relative coordinates. The root frame keeps its absolute position.
fn normalize_to_parent_relative(arena: &mut LayerArena, root: LayerId) {
    let origin = {
        let rect = arena.get(root).rect;
        (rect.x, rect.y)
    };
    offset_children(arena, root, origin);
}

fn offset_children(arena: &mut LayerArena, frame: LayerId, origin: (i32, i32)) {
    let children: Vec<LayerId> = arena.children(frame).to_vec();
    for child in children {
        let absolute = {
            let rect = &mut arena.get_mut(child).rect;
            let absolute = (rect.x, rect.y);
            rect.x -= origin.0;
            rect.y -= origin.1;
            absolute
        };
        if arena.get(child).is_frame() {
            offset_children(arena, child, absolute);
        }
    }
}
