//! The public conversion entry points.

use std::path::Path;

use layerize_core::error::{ConvertError, ConvertOptions, ConvertOutcome, OutputMode};
use layerize_core::layer::LayerNode;
use layerize_core::nesting::reconstruct;
use layerize_snapshot::Snapshot;

use crate::builder::LayerBuilder;

/// Convert a snapshot into the layer sequence or tree selected by
/// `options`.
///
/// Flat output is the raw emission order (synthetic root frame first,
/// document-absolute coordinates). Nested output is a single root frame
/// whose descendants carry parent-relative coordinates.
///
/// # Errors
///
/// [`ConvertError::MissingRoot`] when the selector matches nothing, and
/// [`ConvertError::NestingDiverged`] when hierarchy reconstruction fails to
/// settle within the configured pass ceiling.
pub fn convert(
    snapshot: &Snapshot,
    options: &ConvertOptions,
) -> Result<ConvertOutcome<Vec<LayerNode>>, ConvertError> {
    let root_source = match &options.selector {
        Some(selector) => snapshot
            .select(selector)
            .ok_or_else(|| ConvertError::MissingRoot(selector.clone()))?,
        None => snapshot.root(),
    };

    let mut builder = LayerBuilder::new(snapshot, root_source);
    builder.build();
    let (mut arena, root, mut warnings) = builder.finish();

    #[cfg(feature = "tracing")]
    tracing::trace!(layers = arena.len(), "extraction finished");

    let nodes = match options.mode {
        OutputMode::Flat => {
            arena.clear_sources();
            arena.into_flat()
        }
        OutputMode::Nested => {
            let flat: Vec<_> = arena.ids().filter(|&id| id != root).collect();
            if let Some(children) = arena.children_mut(root) {
                children.extend(flat);
            }

            let tree = snapshot.scoped(root_source);
            let _passes = reconstruct(
                &mut arena,
                root,
                &tree,
                options.max_nesting_passes,
                &mut warnings,
            )?;
            #[cfg(feature = "tracing")]
            tracing::trace!(passes = _passes, "hierarchy settled");

            vec![arena.into_nested(root)]
        }
    };

    #[cfg(feature = "tracing")]
    for warning in &warnings {
        tracing::warn!(%warning, "conversion anomaly");
    }

    if !options.collect_warnings {
        warnings.clear();
    }
    Ok(ConvertOutcome::with_warnings(nodes, warnings))
}

/// Read a snapshot file and convert it.
pub fn convert_file(
    path: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<ConvertOutcome<Vec<LayerNode>>, ConvertError> {
    let snapshot = Snapshot::open_file(path).map_err(ConvertError::from)?;
    convert(&snapshot, options)
}
