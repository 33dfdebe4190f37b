use std::sync::Arc;

use log::{debug, error};

use super::flags::{GeometryTypeFlags, Scope};
use crate::errors::*;
use crate::metadata::{Metadata, MetadataStore};
use crate::vector::{
    count_features_by_iteration, AttributeFilter, BaseType, Defn, Envelope, Feature,
    FeatureFilters, Geometry, GeometryType, LayerAccess, LayerCaps,
};

/// A layer presenting the features of `src` with their geometry types
/// rewritten.
///
/// The layer definition is adapted once, at construction. Features are
/// translated one at a time as they are read.
pub struct SetTypeLayer<L> {
    src: L,
    flags: Arc<GeometryTypeFlags>,
    defn: Arc<Defn>,
    filters: FeatureFilters,
    metadata: MetadataStore,
}

impl<L: LayerAccess> SetTypeLayer<L> {
    pub fn new(src: L, flags: Arc<GeometryTypeFlags>) -> Self {
        let mut defn = Defn::clone(src.defn());
        if flags.scope != Scope::FeatureOnly {
            for field in defn.geom_fields_mut() {
                if flags.applies_to_field(field.name()) {
                    let field_type = flags.convert_type(field.field_type());
                    field.set_field_type(field_type);
                }
            }
        }
        let metadata = src.metadata().clone();
        SetTypeLayer {
            src,
            flags,
            defn: Arc::new(defn),
            filters: FeatureFilters::default(),
            metadata,
        }
    }

    pub fn source(&self) -> &L {
        &self.src
    }

    pub fn flags(&self) -> &GeometryTypeFlags {
        &self.flags
    }

    pub fn into_inner(self) -> L {
        self.src
    }

    /// Rebinds a source feature to the adapted definition and converts its
    /// geometries. Returns `None` when the feature is dropped because a
    /// geometry could not be converted.
    ///
    /// Features whose layout differs from the layer definition are rejected
    /// with an error log.
    pub fn translate_feature(&self, mut feature: Feature) -> Option<Feature> {
        if !feature.defn().same_layout(&self.defn) {
            error!(
                "Feature {:?} does not match the definition of layer '{}'",
                feature.fid(),
                self.defn.name()
            );
            return None;
        }
        feature.set_defn_unchecked(Arc::clone(&self.defn));
        for (idx, field) in self.defn.geom_fields().enumerate() {
            let declared_srs = field.spatial_ref().cloned();
            if self.flags.scope == Scope::LayerOnly || !self.flags.applies_to_field(field.name())
            {
                if let Some(geom) = feature.geometry_mut(idx) {
                    geom.set_spatial_ref(declared_srs);
                }
                continue;
            }
            let Some(geom) = feature.take_geometry(idx) else {
                continue;
            };

            let source_type = geom.geometry_type();
            let target = self.flags.convert_type(source_type);
            let converted = geom.force_to(target);
            if !is_converted(converted.as_ref(), target) {
                if self.flags.skip_on_failure {
                    debug!(
                        "Skipping feature {:?} of layer '{}': cannot convert {} to {}",
                        feature.fid(),
                        self.defn.name(),
                        source_type,
                        target
                    );
                    return None;
                }
                if converted.is_none() {
                    debug!(
                        "Feature {:?} of layer '{}': cannot convert {} to {}, geometry set to null",
                        feature.fid(),
                        self.defn.name(),
                        source_type,
                        target
                    );
                }
            }
            let converted = converted.map(|mut geom| {
                geom.set_spatial_ref(declared_srs);
                geom
            });
            if let Err(err) = feature.set_geometry_by_index(idx, converted) {
                error!(
                    "Feature {:?} of layer '{}': {err}",
                    feature.fid(),
                    self.defn.name()
                );
                return None;
            }
        }
        Some(feature)
    }

    /// Whether the source layer's count is the count of this layer.
    fn counts_like_source(&self) -> bool {
        !self.flags.skip_on_failure && !self.filters.is_active()
    }
}

/// Whether `result` is an acceptable conversion to `target`, comparing
/// types without dimensions. Any result is accepted for a generic target.
fn is_converted(result: Option<&Geometry>, target: GeometryType) -> bool {
    match result {
        None => false,
        Some(_) if target.base() == BaseType::Unknown => true,
        Some(geom) => geom.geometry_type().flatten() == target.flatten(),
    }
}

impl<L: LayerAccess> Metadata for SetTypeLayer<L> {
    fn metadata(&self) -> &MetadataStore {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut MetadataStore {
        &mut self.metadata
    }
}

impl<L: LayerAccess> LayerAccess for SetTypeLayer<L> {
    fn name(&self) -> &str {
        self.src.name()
    }

    fn defn(&self) -> &Arc<Defn> {
        &self.defn
    }

    fn reset_reading(&mut self) {
        self.src.reset_reading();
    }

    fn next_feature(&mut self) -> Option<Feature> {
        loop {
            let feature = self.src.next_feature()?;
            if let Some(feature) = self.translate_feature(feature) {
                if self.filters.matches(&feature) {
                    return Some(feature);
                }
            }
        }
    }

    fn feature(&mut self, fid: u64) -> Option<Feature> {
        let feature = self.src.feature(fid)?;
        self.translate_feature(feature)
    }

    fn try_feature_count(&mut self, force: bool) -> Option<u64> {
        if self.counts_like_source() {
            return self.src.try_feature_count(force);
        }
        if force {
            Some(count_features_by_iteration(self))
        } else {
            None
        }
    }

    fn try_get_extent(&mut self, geom_field: usize, force: bool) -> Result<Option<Envelope>> {
        self.src.try_get_extent(geom_field, force)
    }

    fn has_capability(&self, capability: LayerCaps) -> bool {
        match capability {
            LayerCaps::OLCRandomRead
            | LayerCaps::OLCCurveGeometries
            | LayerCaps::OLCMeasuredGeometries
            | LayerCaps::OLCZGeometries
            | LayerCaps::OLCFastGetExtent
            | LayerCaps::OLCStringsAsUTF8 => self.src.has_capability(capability),
            LayerCaps::OLCFastFeatureCount => {
                self.counts_like_source() && self.src.has_capability(capability)
            }
            _ => false,
        }
    }

    fn set_attribute_filter(&mut self, query: &str) -> Result<()> {
        self.filters.attribute = Some(AttributeFilter::parse(query, &self.defn)?);
        Ok(())
    }

    fn clear_attribute_filter(&mut self) {
        self.filters.attribute = None;
    }

    fn set_spatial_filter_rect(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) {
        self.filters.spatial = Some(Envelope::new(min_x, min_y, max_x, max_y));
    }

    fn clear_spatial_filter(&mut self) {
        self.filters.spatial = None;
    }
}
