use std::collections::BTreeMap;

use crate::errors::*;

/// Key/value metadata grouped by domain. The default domain is `""`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetadataStore {
    domains: BTreeMap<String, BTreeMap<String, String>>,
}

impl MetadataStore {
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Metadata attached to a layer.
///
/// ```
/// use ogr_set_type::metadata::Metadata;
/// use ogr_set_type::vector::{Defn, MemLayer};
/// use std::sync::Arc;
///
/// let mut layer = MemLayer::new(Arc::new(Defn::new("roads")));
/// layer.set_metadata_item("SOURCE", "survey 2021", "").unwrap();
/// assert_eq!(layer.metadata_item("SOURCE", ""), Some("survey 2021".to_string()));
/// ```
pub trait Metadata {
    fn metadata(&self) -> &MetadataStore;

    fn metadata_mut(&mut self) -> &mut MetadataStore;

    /// Value of `key` in `domain`.
    fn metadata_item(&self, key: &str, domain: &str) -> Option<String> {
        self.metadata()
            .domains
            .get(domain)
            .and_then(|items| items.get(key))
            .cloned()
    }

    /// Sets `key` to `value` in `domain`. Keys must be non-empty and may not
    /// contain `=`.
    fn set_metadata_item(&mut self, key: &str, value: &str, domain: &str) -> Result<()> {
        if key.is_empty() || key.contains('=') {
            return Err(GdalError::BadArgument(format!(
                "invalid metadata key '{key}'"
            )));
        }
        self.metadata_mut()
            .domains
            .entry(domain.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Names of the domains holding at least one item.
    fn metadata_domains(&self) -> Vec<String> {
        self.metadata().domains.keys().cloned().collect()
    }

    /// Items of `domain` as `KEY=VALUE` strings, in key order.
    fn metadata_domain(&self, domain: &str) -> Option<Vec<String>> {
        self.metadata()
            .domains
            .get(domain)
            .map(|items| items.iter().map(|(k, v)| format!("{k}={v}")).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Holder(MetadataStore);

    impl Metadata for Holder {
        fn metadata(&self) -> &MetadataStore {
            &self.0
        }

        fn metadata_mut(&mut self) -> &mut MetadataStore {
            &mut self.0
        }
    }

    #[test]
    fn test_items_and_domains() {
        let mut holder = Holder::default();
        assert!(holder.metadata().is_empty());
        assert_eq!(holder.metadata_item("A", ""), None);
        holder.set_metadata_item("B", "2", "").unwrap();
        holder.set_metadata_item("A", "1", "").unwrap();
        holder.set_metadata_item("A", "x", "IMAGE").unwrap();
        assert_eq!(holder.metadata_item("A", ""), Some("1".to_string()));
        assert_eq!(holder.metadata_item("A", "IMAGE"), Some("x".to_string()));
        assert_eq!(holder.metadata_domains(), ["", "IMAGE"]);
        assert_eq!(
            holder.metadata_domain(""),
            Some(vec!["A=1".to_string(), "B=2".to_string()])
        );
        assert_eq!(holder.metadata_domain("missing"), None);
    }

    #[test]
    fn test_invalid_keys() {
        let mut holder = Holder::default();
        assert!(holder.set_metadata_item("", "1", "").is_err());
        assert!(holder.set_metadata_item("A=B", "1", "").is_err());
        assert!(holder.metadata().is_empty());
    }
}
