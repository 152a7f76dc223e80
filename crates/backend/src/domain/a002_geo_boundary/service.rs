use contracts::domain::a002_geo_boundary::BoundaryCollection;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Boundary feature name -> country name used in the sales data
pub type AliasTable = BTreeMap<String, String>;

static DEFAULT_ALIASES: Lazy<AliasTable> = Lazy::new(|| {
    BTreeMap::from([
        ("USA".to_string(), "United States".to_string()),
        ("England".to_string(), "United Kingdom".to_string()),
    ])
});

pub fn default_aliases() -> AliasTable {
    DEFAULT_ALIASES.clone()
}

/// Rename boundary features so they join against `SalesRecord::country`.
///
/// Names outside the table stay as they are and simply never match. Returns
/// the number of renamed features.
pub fn reconcile_geography(boundaries: &mut BoundaryCollection, aliases: &AliasTable) -> usize {
    let mut renamed = 0;
    for feature in boundaries.features.iter_mut() {
        if let Some(target) = aliases.get(&feature.properties.name) {
            feature.properties.name = target.clone();
            renamed += 1;
        }
    }
    tracing::debug!(
        "Reconciled geography: {} of {} features renamed",
        renamed,
        boundaries.features.len()
    );
    renamed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_aliases_rename() {
        let mut world = BoundaryCollection::from_names(["USA", "France", "England"]);
        let renamed = reconcile_geography(&mut world, &default_aliases());
        assert_eq!(renamed, 2);
        let names: Vec<&str> = world.names().collect();
        assert_eq!(names, vec!["United States", "France", "United Kingdom"]);
    }

    #[test]
    fn test_rename_is_not_chained() {
        let aliases = AliasTable::from([
            ("A".to_string(), "B".to_string()),
            ("B".to_string(), "C".to_string()),
        ]);
        let mut world = BoundaryCollection::from_names(["A"]);
        reconcile_geography(&mut world, &aliases);
        assert_eq!(world.features[0].name(), "B");
    }
}
