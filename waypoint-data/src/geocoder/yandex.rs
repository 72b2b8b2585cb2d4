//! Response types for the Yandex-style HTTP geocoder.
//!
//! Only the fields the engine consumes are modelled. The provider nests each
//! result as `response.GeoObjectCollection.featureMember[].GeoObject`, with
//! the position as a `"<lon> <lat>"` string and the classification and full
//! address under `metaDataProperty.GeocoderMetaData`.

use log::warn;
use serde::Deserialize;
use waypoint_core::{CoordinatePair, GeoKind, GeoResult, ReverseGeocodeResult};

/// Top-level geocoder response.
#[derive(Debug, Deserialize)]
pub struct GeocodeEnvelope {
    /// The response body.
    pub response: GeocodeResponse,
}

/// Wrapper around the result collection.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    /// The collection of matched objects.
    #[serde(rename = "GeoObjectCollection")]
    pub collection: GeoObjectCollection,
}

/// Ordered matches for one request.
#[derive(Debug, Deserialize)]
pub struct GeoObjectCollection {
    /// Matches in provider order; absent when nothing matched.
    #[serde(rename = "featureMember", default)]
    pub members: Vec<FeatureMember>,
}

/// One entry of the collection.
#[derive(Debug, Deserialize)]
pub struct FeatureMember {
    /// The matched object.
    #[serde(rename = "GeoObject")]
    pub object: GeoObject,
}

/// A matched geographic object.
#[derive(Debug, Deserialize)]
pub struct GeoObject {
    /// Short display name.
    pub name: String,
    /// Parent description, e.g. `"Moscow, Russia"`.
    #[serde(default)]
    pub description: Option<String>,
    /// Classification and formatted address.
    #[serde(rename = "metaDataProperty")]
    pub meta: MetaDataProperty,
    /// Position of the object.
    #[serde(rename = "Point")]
    pub point: Point,
}

/// Container for geocoder metadata.
#[derive(Debug, Deserialize)]
pub struct MetaDataProperty {
    /// Geocoder-specific metadata.
    #[serde(rename = "GeocoderMetaData")]
    pub geocoder: GeocoderMetaData,
}

/// Classification and address of a match.
#[derive(Debug, Deserialize)]
pub struct GeocoderMetaData {
    /// Provider classification.
    pub kind: GeoKind,
    /// Full formatted address, country first.
    pub text: String,
    /// Structured address.
    #[serde(rename = "Address", default)]
    pub address: Option<StructuredAddress>,
}

/// Structured address split into components.
#[derive(Debug, Default, Deserialize)]
pub struct StructuredAddress {
    /// Components from the widest (country) to the narrowest.
    #[serde(rename = "Components", default)]
    pub components: Vec<AddressComponent>,
}

/// One named level of a structured address.
#[derive(Debug, Deserialize)]
pub struct AddressComponent {
    /// Component classification.
    pub kind: GeoKind,
    /// Component name.
    pub name: String,
}

/// Position as `"<lon> <lat>"`.
#[derive(Debug, Deserialize)]
pub struct Point {
    /// Space-separated longitude and latitude.
    pub pos: String,
}

impl GeoObject {
    fn position(&self) -> Option<CoordinatePair> {
        CoordinatePair::from_provider_str(&self.point.pos)
            .inspect_err(|err| warn!("skipping geocoder result {:?}: {err}", self.name))
            .ok()
    }

    fn country(&self) -> Option<&str> {
        self.meta
            .geocoder
            .address
            .as_ref()?
            .components
            .iter()
            .find(|component| component.kind == GeoKind::Country)
            .map(|component| component.name.as_str())
    }

    /// Convert into a forward-geocoding result.
    ///
    /// Returns `None` when the position is malformed.
    #[must_use]
    pub fn into_geo_result(self) -> Option<GeoResult> {
        let pos = self.position()?;
        Some(GeoResult {
            pos,
            name: self.name,
            address: self.meta.geocoder.text,
            kind: self.meta.geocoder.kind,
            parent: self.description,
        })
    }

    /// Convert into a reverse-geocoding result.
    ///
    /// The address line is the formatted address without its leading
    /// country.
    #[must_use]
    pub fn into_reverse_result(self) -> ReverseGeocodeResult {
        let country = self.country().unwrap_or_default().to_owned();
        let text = &self.meta.geocoder.text;
        let address_line = text
            .strip_prefix(country.as_str())
            .filter(|_| !country.is_empty())
            .map(|rest| rest.trim_start_matches([',', ' ']))
            .unwrap_or(text)
            .to_owned();
        ReverseGeocodeResult {
            country,
            address_line,
        }
    }
}

impl GeocodeEnvelope {
    /// Matched objects in provider order.
    #[must_use]
    pub fn into_objects(self) -> Vec<GeoObject> {
        self.response
            .collection
            .members
            .into_iter()
            .map(|member| member.object)
            .collect()
    }

    /// Convert every well-formed match into a [`GeoResult`].
    #[must_use]
    pub fn into_geo_results(self) -> Vec<GeoResult> {
        self.into_objects()
            .into_iter()
            .filter_map(GeoObject::into_geo_result)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TVERSKAYA: &str = r#"{
        "response": {
            "GeoObjectCollection": {
                "metaDataProperty": {
                    "GeocoderResponseMetaData": { "request": "Tverskaya 7", "found": "2" }
                },
                "featureMember": [
                    {
                        "GeoObject": {
                            "metaDataProperty": {
                                "GeocoderMetaData": {
                                    "precision": "exact",
                                    "text": "Russia, Moscow, Tverskaya Street, 7",
                                    "kind": "house",
                                    "Address": {
                                        "country_code": "RU",
                                        "Components": [
                                            { "kind": "country", "name": "Russia" },
                                            { "kind": "locality", "name": "Moscow" },
                                            { "kind": "street", "name": "Tverskaya Street" },
                                            { "kind": "house", "name": "7" }
                                        ]
                                    }
                                }
                            },
                            "name": "Tverskaya Street, 7",
                            "description": "Moscow, Russia",
                            "Point": { "pos": "37.611347 55.757654" }
                        }
                    },
                    {
                        "GeoObject": {
                            "metaDataProperty": {
                                "GeocoderMetaData": {
                                    "text": "Russia, Tver",
                                    "kind": "locality"
                                }
                            },
                            "name": "Tver",
                            "Point": { "pos": "not a position" }
                        }
                    }
                ]
            }
        }
    }"#;

    fn parse(json: &str) -> GeocodeEnvelope {
        serde_json::from_str(json).expect("should deserialise")
    }

    #[test]
    fn deserialise_matches_in_order() {
        let objects = parse(TVERSKAYA).into_objects();

        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].name, "Tverskaya Street, 7");
        assert_eq!(objects[0].meta.geocoder.kind, GeoKind::House);
        assert_eq!(objects[1].description, None);
    }

    #[test]
    fn malformed_positions_are_skipped() {
        let results = parse(TVERSKAYA).into_geo_results();

        assert_eq!(results.len(), 1);
        let first = &results[0];
        assert_eq!(first.address, "Russia, Moscow, Tverskaya Street, 7");
        assert_eq!(first.parent.as_deref(), Some("Moscow, Russia"));
        assert_eq!(first.pos.to_provider_string(), "37.611347 55.757654");
    }

    #[test]
    fn missing_feature_members_mean_no_results() {
        let envelope = parse(r#"{"response":{"GeoObjectCollection":{}}}"#);

        assert!(envelope.into_geo_results().is_empty());
    }

    #[test]
    fn reverse_result_splits_country() {
        let object = parse(TVERSKAYA)
            .into_objects()
            .into_iter()
            .next()
            .expect("first match");

        let result = object.into_reverse_result();

        assert_eq!(result.country, "Russia");
        assert_eq!(result.address_line, "Moscow, Tverskaya Street, 7");
    }

    #[test]
    fn reverse_result_without_components_keeps_text() {
        let object = parse(TVERSKAYA)
            .into_objects()
            .into_iter()
            .nth(1)
            .expect("second match");

        let result = object.into_reverse_result();

        assert_eq!(result.country, "");
        assert_eq!(result.address_line, "Russia, Tver");
    }
}
