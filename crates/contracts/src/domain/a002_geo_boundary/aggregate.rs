use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn feature_collection() -> String {
    "FeatureCollection".to_string()
}

fn feature() -> String {
    "Feature".to_string()
}

/// GeoJSON FeatureCollection of country borders.
///
/// Only `properties.name` is interpreted; geometry and any other properties
/// pass through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryCollection {
    #[serde(rename = "type", default = "feature_collection")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<BoundaryFeature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryFeature {
    #[serde(rename = "type", default = "feature")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub properties: BoundaryProperties,
    #[serde(default)]
    pub geometry: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryProperties {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BoundaryFeature {
    /// Feature with a name and no geometry.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            kind: feature(),
            id: None,
            properties: BoundaryProperties {
                name: name.into(),
                extra: Map::new(),
            },
            geometry: Value::Null,
        }
    }

    pub fn name(&self) -> &str {
        &self.properties.name
    }
}

impl BoundaryCollection {
    pub fn new(features: Vec<BoundaryFeature>) -> Self {
        Self {
            kind: feature_collection(),
            features,
        }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(BoundaryFeature::named).collect())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|f| f.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_geojson_and_keeps_extra_properties() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "id": "USA",
                 "properties": {"name": "USA", "iso": "US"},
                 "geometry": {"type": "Polygon", "coordinates": []}}
            ]
        }"#;
        let collection: BoundaryCollection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.features.len(), 1);
        assert_eq!(collection.features[0].name(), "USA");
        assert_eq!(
            collection.features[0].properties.extra.get("iso"),
            Some(&Value::String("US".to_string()))
        );
    }

    #[test]
    fn test_missing_properties_default_to_empty_name() {
        let json = r#"{"features": [{"geometry": null}]}"#;
        let collection: BoundaryCollection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.kind, "FeatureCollection");
        assert_eq!(collection.features[0].name(), "");
    }
}
