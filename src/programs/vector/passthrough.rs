use std::sync::Arc;

use crate::errors::*;
use crate::metadata::{Metadata, MetadataStore};
use crate::vector::{Defn, Envelope, Feature, LayerAccess, LayerCaps};

/// A pipeline output layer that hands out the features of its source
/// unchanged.
pub struct PassthroughLayer<L> {
    src: L,
}

impl<L: LayerAccess> PassthroughLayer<L> {
    pub fn new(src: L) -> Self {
        PassthroughLayer { src }
    }

    pub fn into_inner(self) -> L {
        self.src
    }
}

impl<L: LayerAccess> Metadata for PassthroughLayer<L> {
    fn metadata(&self) -> &MetadataStore {
        self.src.metadata()
    }

    fn metadata_mut(&mut self) -> &mut MetadataStore {
        self.src.metadata_mut()
    }
}

impl<L: LayerAccess> LayerAccess for PassthroughLayer<L> {
    fn name(&self) -> &str {
        self.src.name()
    }

    fn defn(&self) -> &Arc<Defn> {
        self.src.defn()
    }

    fn reset_reading(&mut self) {
        self.src.reset_reading()
    }

    fn next_feature(&mut self) -> Option<Feature> {
        self.src.next_feature()
    }

    fn feature(&mut self, fid: u64) -> Option<Feature> {
        self.src.feature(fid)
    }

    fn try_feature_count(&mut self, force: bool) -> Option<u64> {
        self.src.try_feature_count(force)
    }

    fn try_get_extent(&mut self, geom_field: usize, force: bool) -> Result<Option<Envelope>> {
        self.src.try_get_extent(geom_field, force)
    }

    fn has_capability(&self, capability: LayerCaps) -> bool {
        self.src.has_capability(capability)
    }

    fn set_attribute_filter(&mut self, query: &str) -> Result<()> {
        self.src.set_attribute_filter(query)
    }

    fn clear_attribute_filter(&mut self) {
        self.src.clear_attribute_filter()
    }

    fn set_spatial_filter_rect(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) {
        self.src.set_spatial_filter_rect(min_x, min_y, max_x, max_y)
    }

    fn clear_spatial_filter(&mut self) {
        self.src.clear_spatial_filter()
    }
}
