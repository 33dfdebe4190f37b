use std::collections::BTreeMap;
use std::sync::Arc;

use crate::errors::*;
use crate::metadata::{Metadata, MetadataStore};
use crate::vector::filter::{AttributeFilter, FeatureFilters};
use crate::vector::{Defn, Envelope, Feature, FieldDefn, LayerAccess, LayerCaps};

/// A layer keeping its features in memory, in increasing FID order.
#[derive(Clone, Debug)]
pub struct MemLayer {
    defn: Arc<Defn>,
    features: BTreeMap<u64, Feature>,
    next_fid: u64,
    cursor: u64,
    filters: FeatureFilters,
    metadata: MetadataStore,
}

impl MemLayer {
    pub fn new(defn: Arc<Defn>) -> MemLayer {
        MemLayer {
            defn,
            features: BTreeMap::new(),
            next_fid: 0,
            cursor: 0,
            filters: FeatureFilters::default(),
            metadata: MetadataStore::default(),
        }
    }

    /// Adds a feature and returns its FID. Features without a FID get the
    /// next free one.
    pub fn create_feature(&mut self, mut feature: Feature) -> Result<u64> {
        if !feature.defn().same_layout(&self.defn) {
            return Err(GdalError::FeatureDefnMismatch {
                layer: self.defn.name().to_string(),
            });
        }
        let fid = match feature.fid() {
            Some(fid) if self.features.contains_key(&fid) => {
                return Err(GdalError::BadArgument(format!(
                    "feature {fid} already exists in layer '{}'",
                    self.defn.name()
                )));
            }
            Some(fid) => fid,
            None => self.next_fid,
        };
        self.next_fid = self.next_fid.max(fid + 1);
        feature.set_fid(Some(fid));
        feature.set_defn_unchecked(Arc::clone(&self.defn));
        self.features.insert(fid, feature);
        Ok(fid)
    }

    /// Replaces the feature having the same FID.
    pub fn set_feature(&mut self, mut feature: Feature) -> Result<()> {
        if !feature.defn().same_layout(&self.defn) {
            return Err(GdalError::FeatureDefnMismatch {
                layer: self.defn.name().to_string(),
            });
        }
        let fid = feature
            .fid()
            .ok_or_else(|| GdalError::BadArgument("feature has no FID".to_string()))?;
        let slot = self.features.get_mut(&fid).ok_or_else(|| {
            GdalError::BadArgument(format!("no feature {fid} in layer '{}'", self.defn.name()))
        })?;
        feature.set_defn_unchecked(Arc::clone(&self.defn));
        *slot = feature;
        Ok(())
    }

    /// Removes a feature, returning whether it existed.
    pub fn delete_feature(&mut self, fid: u64) -> bool {
        self.features.remove(&fid).is_some()
    }

    /// Appends an attribute field. Existing features get a null value.
    pub fn create_field(&mut self, field: FieldDefn) -> Result<()> {
        if self.defn.field_index(field.name()).is_ok() {
            return Err(GdalError::BadArgument(format!(
                "field '{}' already exists",
                field.name()
            )));
        }
        Arc::make_mut(&mut self.defn).add_field(field);
        let defn = Arc::clone(&self.defn);
        self.features = std::mem::take(&mut self.features)
            .into_iter()
            .map(|(fid, old)| (fid, widen(old, &defn)))
            .collect();
        Ok(())
    }
}

fn widen(old: Feature, defn: &Arc<Defn>) -> Feature {
    let mut feature = Feature::new(Arc::clone(defn));
    feature.set_fid(old.fid());
    for (idx, (_, value)) in old.fields().enumerate() {
        if let Some(value) = value {
            let _ = feature.set_field_by_index(idx, value);
        }
    }
    for idx in 0..old.geom_field_count() {
        if let Ok(Some(geom)) = old.geometry_by_index(idx) {
            let _ = feature.set_geometry_by_index(idx, Some(geom.clone()));
        }
    }
    feature
}

impl Metadata for MemLayer {
    fn metadata(&self) -> &MetadataStore {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut MetadataStore {
        &mut self.metadata
    }
}

impl LayerAccess for MemLayer {
    fn name(&self) -> &str {
        self.defn.name()
    }

    fn defn(&self) -> &Arc<Defn> {
        &self.defn
    }

    fn reset_reading(&mut self) {
        self.cursor = 0;
    }

    fn next_feature(&mut self) -> Option<Feature> {
        for (&fid, feature) in self.features.range(self.cursor..) {
            self.cursor = fid + 1;
            if self.filters.matches(feature) {
                return Some(feature.clone());
            }
        }
        self.cursor = self.next_fid;
        None
    }

    fn feature(&mut self, fid: u64) -> Option<Feature> {
        self.features.get(&fid).cloned()
    }

    fn try_feature_count(&mut self, force: bool) -> Option<u64> {
        if !self.filters.is_active() {
            return Some(self.features.len() as u64);
        }
        if !force {
            return None;
        }
        Some(
            self.features
                .values()
                .filter(|f| self.filters.matches(f))
                .count() as u64,
        )
    }

    /// Extent of all geometries of the field, regardless of filters.
    fn try_get_extent(&mut self, geom_field: usize, _force: bool) -> Result<Option<Envelope>> {
        if geom_field >= self.defn.geom_field_count() {
            return Err(GdalError::InvalidFieldIndex {
                index: geom_field,
                method_name: "try_get_extent",
            });
        }
        let mut extent: Option<Envelope> = None;
        for feature in self.features.values() {
            let env = feature
                .geometry_by_index(geom_field)
                .ok()
                .flatten()
                .and_then(|geom| geom.envelope());
            match (extent.as_mut(), env) {
                (Some(extent), Some(env)) => extent.merge(&env),
                (None, Some(env)) => extent = Some(env),
                _ => {}
            }
        }
        Ok(extent)
    }

    fn has_capability(&self, capability: LayerCaps) -> bool {
        match capability {
            LayerCaps::OLCRandomRead
            | LayerCaps::OLCSequentialWrite
            | LayerCaps::OLCRandomWrite
            | LayerCaps::OLCFastGetExtent
            | LayerCaps::OLCCreateField
            | LayerCaps::OLCDeleteFeature
            | LayerCaps::OLCFastSetNextByIndex
            | LayerCaps::OLCStringsAsUTF8
            | LayerCaps::OLCCurveGeometries
            | LayerCaps::OLCMeasuredGeometries
            | LayerCaps::OLCZGeometries => true,
            LayerCaps::OLCFastFeatureCount => !self.filters.is_active(),
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
