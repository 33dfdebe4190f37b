use crate::errors::*;
use crate::metadata::{Metadata, MetadataStore};
use crate::spatial_ref::SpatialRef;
use crate::vector::{Defn, Envelope, Feature};
use std::sync::Arc;

/// Layer capabilities, as named by OGR's `OLC*` constants.
#[allow(clippy::enum_variant_names)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerCaps {
    /// Layer capability for random read
    OLCRandomRead,
    /// Layer capability for sequential write
    OLCSequentialWrite,
    /// Layer capability for random write
    OLCRandomWrite,
    /// Layer capability for fast spatial filter
    OLCFastSpatialFilter,
    /// Layer capability for fast feature count retrieval
    OLCFastFeatureCount,
    /// Layer capability for fast extent retrieval
    OLCFastGetExtent,
    /// Layer capability for field creation
    OLCCreateField,
    /// Layer capability for field deletion
    OLCDeleteField,
    /// Layer capability for field reordering
    OLCReorderFields,
    /// Layer capability for field alteration
    OLCAlterFieldDefn,
    /// Layer capability for transactions
    OLCTransactions,
    /// Layer capability for feature deletion
    OLCDeleteFeature,
    /// Layer capability for setting next feature index
    OLCFastSetNextByIndex,
    /// Layer capability for strings returned with UTF-8 encoding
    OLCStringsAsUTF8,
    /// Layer capability for field ignoring
    OLCIgnoreFields,
    /// Layer capability for geometry field creation
    OLCCreateGeomField,
    /// Layer capability for curve geometries support
    OLCCurveGeometries,
    /// Layer capability for measured geometries support
    OLCMeasuredGeometries,
    /// Layer capability for geometries with Z dimension support
    OLCZGeometries,
}

impl LayerCaps {
    pub const ALL: [LayerCaps; 19] = [
        LayerCaps::OLCRandomRead,
        LayerCaps::OLCSequentialWrite,
        LayerCaps::OLCRandomWrite,
        LayerCaps::OLCFastSpatialFilter,
        LayerCaps::OLCFastFeatureCount,
        LayerCaps::OLCFastGetExtent,
        LayerCaps::OLCCreateField,
        LayerCaps::OLCDeleteField,
        LayerCaps::OLCReorderFields,
        LayerCaps::OLCAlterFieldDefn,
        LayerCaps::OLCTransactions,
        LayerCaps::OLCDeleteFeature,
        LayerCaps::OLCFastSetNextByIndex,
        LayerCaps::OLCStringsAsUTF8,
        LayerCaps::OLCIgnoreFields,
        LayerCaps::OLCCreateGeomField,
        LayerCaps::OLCCurveGeometries,
        LayerCaps::OLCMeasuredGeometries,
        LayerCaps::OLCZGeometries,
    ];

    /// The capability name used by OGR, e.g. `"RandomRead"`.
    pub fn as_str(self) -> &'static str {
        match self {
            LayerCaps::OLCRandomRead => "RandomRead",
            LayerCaps::OLCSequentialWrite => "SequentialWrite",
            LayerCaps::OLCRandomWrite => "RandomWrite",
            LayerCaps::OLCFastSpatialFilter => "FastSpatialFilter",
            LayerCaps::OLCFastFeatureCount => "FastFeatureCount",
            LayerCaps::OLCFastGetExtent => "FastGetExtent",
            LayerCaps::OLCCreateField => "CreateField",
            LayerCaps::OLCDeleteField => "DeleteField",
            LayerCaps::OLCReorderFields => "ReorderFields",
            LayerCaps::OLCAlterFieldDefn => "AlterFieldDefn",
            LayerCaps::OLCTransactions => "Transactions",
            LayerCaps::OLCDeleteFeature => "DeleteFeature",
            LayerCaps::OLCFastSetNextByIndex => "FastSetNextByIndex",
            LayerCaps::OLCStringsAsUTF8 => "StringsAsUTF8",
            LayerCaps::OLCIgnoreFields => "IgnoreFields",
            LayerCaps::OLCCreateGeomField => "CreateGeomField",
            LayerCaps::OLCCurveGeometries => "CurveGeometries",
            LayerCaps::OLCMeasuredGeometries => "MeasuredGeometries",
            LayerCaps::OLCZGeometries => "ZGeometries",
        }
    }

    /// Looks a capability up by its OGR name, case-insensitively.
    pub fn from_name(name: &str) -> Option<LayerCaps> {
        let found = LayerCaps::ALL
            .into_iter()
            .find(|cap| cap.as_str().eq_ignore_ascii_case(name));
        if found.is_none() {
            log::warn!("Unknown layer capability '{name}'");
        }
        found
    }
}

/// Read access to a vector layer.
///
/// Reading methods take `&mut self` since layers keep a read cursor.
/// Implementors must provide the core methods; [`features`](LayerAccess::features),
/// [`feature_count`](LayerAccess::feature_count) and
/// [`get_extent`](LayerAccess::get_extent) build on them.
///
/// Layers carry [`Metadata`].
pub trait LayerAccess: Metadata {
    /// Layer name.
    fn name(&self) -> &str;

    /// Definition of the features produced by this layer.
    fn defn(&self) -> &Arc<Defn>;

    /// Rewinds the read cursor to the first feature.
    fn reset_reading(&mut self);

    /// Next feature passing the installed filters, `None` at the end.
    fn next_feature(&mut self) -> Option<Feature>;

    /// Fetch a feature by its identifier, ignoring filters and the read
    /// cursor. Returns `None` when there is no such feature.
    fn feature(&mut self, fid: u64) -> Option<Feature>;

    /// Number of features passing the installed filters.
    ///
    /// Returns `None` when counting would require a full scan and `force` is
    /// false.
    fn try_feature_count(&mut self, force: bool) -> Option<u64> {
        if force {
            Some(count_features_by_iteration(self))
        } else {
            None
        }
    }

    /// Number of features, scanning the layer if needed.
    fn feature_count(&mut self) -> u64 {
        self.try_feature_count(true).unwrap_or(0)
    }

    /// Extent of the geometries of field `geom_field`.
    ///
    /// Returns `Ok(None)` when the extent is not readily available and
    /// `force` is false, or when the layer holds no geometry.
    fn try_get_extent(&mut self, geom_field: usize, force: bool) -> Result<Option<Envelope>>;

    /// Extent of the first geometry field, computing it if needed.
    fn get_extent(&mut self) -> Result<Envelope> {
        self.try_get_extent(0, true)?.ok_or(GdalError::EmptyExtent)
    }

    fn has_capability(&self, capability: LayerCaps) -> bool;

    /// Restricts reading to features matching an attribute query such as
    /// `"highway = 'primary' AND lanes >= 2"`.
    fn set_attribute_filter(&mut self, query: &str) -> Result<()>;

    fn clear_attribute_filter(&mut self);

    /// Restricts reading to features whose first geometry's envelope
    /// intersects the rectangle.
    fn set_spatial_filter_rect(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64);

    fn clear_spatial_filter(&mut self);

    /// Spatial reference of the first geometry field.
    fn spatial_ref(&self) -> Option<SpatialRef> {
        self.defn()
            .geom_fields()
            .next()
            .and_then(|field| field.spatial_ref().cloned())
    }

    /// Iterate over the features of this layer, from the first one.
    fn features(&mut self) -> FeatureIterator<'_, Self>
    where
        Self: Sized,
    {
        self.reset_reading();
        FeatureIterator { layer: self }
    }
}

/// Counts the features of a layer by reading all of them. The read cursor is
/// rewound before and after.
pub fn count_features_by_iteration<L: LayerAccess + ?Sized>(layer: &mut L) -> u64 {
    layer.reset_reading();
    let mut count = 0;
    while layer.next_feature().is_some() {
        count += 1;
    }
    layer.reset_reading();
    count
}

impl<L: Metadata + ?Sized> Metadata for Box<L> {
    fn metadata(&self) -> &MetadataStore {
        (**self).metadata()
    }

    fn metadata_mut(&mut self) -> &mut MetadataStore {
        (**self).metadata_mut()
    }
}

/// Boxed layers, such as the ones held by a [`Dataset`](crate::vector::Dataset),
/// are layers themselves.
impl<L: LayerAccess + ?Sized> LayerAccess for Box<L> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn defn(&self) -> &Arc<Defn> {
        (**self).defn()
    }

    fn reset_reading(&mut self) {
        (**self).reset_reading()
    }

    fn next_feature(&mut self) -> Option<Feature> {
        (**self).next_feature()
    }

    fn feature(&mut self, fid: u64) -> Option<Feature> {
        (**self).feature(fid)
    }

    fn try_feature_count(&mut self, force: bool) -> Option<u64> {
        (**self).try_feature_count(force)
    }

    fn feature_count(&mut self) -> u64 {
        (**self).feature_count()
    }

    fn try_get_extent(&mut self, geom_field: usize, force: bool) -> Result<Option<Envelope>> {
        (**self).try_get_extent(geom_field, force)
    }

    fn get_extent(&mut self) -> Result<Envelope> {
        (**self).get_extent()
    }

    fn has_capability(&self, capability: LayerCaps) -> bool {
        (**self).has_capability(capability)
    }

    fn set_attribute_filter(&mut self, query: &str) -> Result<()> {
        (**self).set_attribute_filter(query)
    }

    fn clear_attribute_filter(&mut self) {
        (**self).clear_attribute_filter()
    }

    fn set_spatial_filter_rect(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) {
        (**self).set_spatial_filter_rect(min_x, min_y, max_x, max_y)
    }

    fn clear_spatial_filter(&mut self) {
        (**self).clear_spatial_filter()
    }

    fn spatial_ref(&self) -> Option<SpatialRef> {
        (**self).spatial_ref()
    }
}

pub struct FeatureIterator<'a, L: LayerAccess + ?Sized> {
    layer: &'a mut L,
}

impl<'a, L: LayerAccess + ?Sized> Iterator for FeatureIterator<'a, L> {
    type Item = Feature;

    #[inline]
    fn next(&mut self) -> Option<Feature> {
        self.layer.next_feature()
    }
}
