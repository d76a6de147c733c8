use std::collections::BTreeMap;
use std::sync::Arc;

use crate::LaymentError;
use crate::geometry::geo_traits::Bounded;
use crate::geometry::primitives::Silhouette;

/// A contour available in the catalog manifest.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogItem {
    pub id: String,
    pub article: String,
    pub name: String,
    pub category: Option<String>,
    /// Disabled items cannot be placed anew but still resolve when restoring a workspace
    pub enabled: bool,
    /// Length of the cut path of one instance, in metres
    pub cutting_length_meters: f32,
    /// Multiplicative scale applied on top of the silhouette's own size
    pub scale_override: f32,
    pub assets: CatalogAssets,
    /// The true cut-out shape, `None` when no geometry is available
    pub silhouette: Option<Silhouette>,
    /// Width and height (mm) of the unrotated contour before the scale override
    pub size: (f32, f32),
}

impl CatalogItem {
    /// Width and height (mm) of the unrotated contour with the scale override applied.
    pub fn footprint(&self, scale_override: f32) -> (f32, f32) {
        let (w, h) = match &self.silhouette {
            Some(s) => (s.bbox().width(), s.bbox().height()),
            None => self.size,
        };
        (w * scale_override, h * scale_override)
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct CatalogAssets {
    pub svg: String,
    pub preview: Option<String>,
}

/// Read-only lookup table of [`CatalogItem`]s keyed by their id.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    items: BTreeMap<String, Arc<CatalogItem>>,
    /// Display names of the categories
    pub categories: BTreeMap<String, String>,
}

impl Catalog {
    pub fn new(items: impl IntoIterator<Item = CatalogItem>) -> Self {
        Catalog {
            items: items
                .into_iter()
                .map(|i| (i.id.clone(), Arc::new(i)))
                .collect(),
            categories: BTreeMap::new(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Arc<CatalogItem>> {
        self.items.get(id)
    }

    pub fn resolve(&self, id: &str) -> Result<Arc<CatalogItem>, LaymentError> {
        self.get(id)
            .cloned()
            .ok_or_else(|| LaymentError::CatalogItemNotFound(id.to_string()))
    }

    pub fn items(&self) -> impl Iterator<Item = &Arc<CatalogItem>> {
        self.items.values()
    }

    /// Items that can be offered for placement
    pub fn enabled(&self) -> impl Iterator<Item = &Arc<CatalogItem>> {
        self.items().filter(|i| i.enabled)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
