//! The `set-type` step: changes the geometry type of layers and features.
//!
//! Target types are either given explicitly (`--geometry-type`) or derived
//! from each source type by changing its cardinality (`--multi`,
//! `--single`), its form (`--linear`, `--curve`) and its coordinate
//! dimension (`--xy`, `--xyz`, `--xym`, `--xyzm`).

use std::sync::Arc;

use log::{debug, info, warn};

use crate::errors::*;
use crate::programs::vector::PassthroughLayer;
use crate::vector::{Dataset, LayerAccess};

mod flags;
mod layer;
mod options;

pub use flags::{Cardinality, CoordinateDimension, Form, GeometryTypeFlags, Scope, TypeRule};
pub use layer::SetTypeLayer;
pub use options::SetTypeOptions;

/// Wraps the layers of `src` so that reading them yields features with
/// converted geometry types.
///
/// Options are validated before any layer is touched. Layers other than
/// the active layer, when one is set, are passed through unchanged.
/// Conversion happens lazily, as features are read from the returned
/// dataset.
pub fn set_type(src: Dataset, options: &SetTypeOptions) -> Result<Dataset> {
    let flags = Arc::new(options.validate()?);
    info!(
        "Setting geometry type of dataset '{}': {:?}, scope {:?}",
        src.description(),
        flags.rule,
        flags.scope
    );

    let active_layer = options.active_layer.as_deref().filter(|name| !name.is_empty());
    if let Some(name) = active_layer {
        if !src.layer_names().iter().any(|layer| layer == name) {
            warn!("No layer named '{name}' in dataset '{}'", src.description());
        }
    }

    let mut output = Dataset::new(src.description());
    for layer in src.into_layers() {
        if active_layer.map_or(true, |name| name == layer.name()) {
            output.add_layer(SetTypeLayer::new(layer, Arc::clone(&flags)));
        } else {
            debug!("Passing layer '{}' through unchanged", layer.name());
            output.add_layer(PassthroughLayer::new(layer));
        }
    }
    Ok(output)
}
