use crate::errors::*;
use crate::vector::LayerAccess;

/// A layer owned by a [`Dataset`].
pub type BoxedLayer = Box<dyn LayerAccess + Send>;

/// Vector dataset
///
/// An ordered collection of layers of possibly different implementations.
///
/// ```
/// use ogr_set_type::vector::{Dataset, Defn, MemLayer};
/// use std::sync::Arc;
///
/// let mut dataset = Dataset::new("memory");
/// dataset.add_layer(MemLayer::new(Arc::new(Defn::new("roads"))));
/// println!("Dataset has {} layers", dataset.layer_count());
/// ```
pub struct Dataset {
    description: String,
    layers: Vec<BoxedLayer>,
}

impl Dataset {
    pub fn new(description: &str) -> Dataset {
        Dataset {
            description: description.to_string(),
            layers: Vec::new(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Appends a layer and returns its index.
    pub fn add_layer<L: LayerAccess + Send + 'static>(&mut self, layer: L) -> usize {
        self.add_boxed_layer(Box::new(layer))
    }

    pub fn add_boxed_layer(&mut self, layer: BoxedLayer) -> usize {
        self.layers.push(layer);
        self.layers.len() - 1
    }

    /// Get number of layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Get layer number `idx`.
    pub fn layer(&mut self, idx: usize) -> Result<&mut BoxedLayer> {
        self.layers
            .get_mut(idx)
            .ok_or(GdalError::InvalidLayerIndex(idx))
    }

    /// Get layer with `name`.
    pub fn layer_by_name(&mut self, name: &str) -> Result<&mut BoxedLayer> {
        self.layers
            .iter_mut()
            .find(|layer| layer.name() == name)
            .ok_or_else(|| GdalError::LayerNotFound(name.to_string()))
    }

    pub fn layer_names(&self) -> Vec<String> {
        self.layers.iter().map(|l| l.name().to_string()).collect()
    }

    /// Takes the layers out of the dataset.
    pub fn into_layers(self) -> Vec<BoxedLayer> {
        self.layers
    }
}

impl std::fmt::Debug for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dataset")
            .field("description", &self.description)
            .field("layers", &self.layer_names())
            .finish()
    }
}
