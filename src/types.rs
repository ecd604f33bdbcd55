use serde::{Deserialize, Deserializer, Serialize};

/// Dataset record per GA4GH schema 0.6
///
/// Fields sent as `null` take their default, as protobuf JSON does.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Dataset {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    pub description: Option<String>,
}

/// Variant set record, always owned by exactly one dataset
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct VariantSet {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub dataset_id: String,
    #[serde(deserialize_with = "nullable")]
    pub reference_set_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Variant {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub variant_set_id: String,
    #[serde(deserialize_with = "nullable")]
    pub names: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub reference_name: String,
    #[serde(deserialize_with = "int64")]
    pub start: u64,
    #[serde(deserialize_with = "int64")]
    pub end: u64,
    #[serde(deserialize_with = "nullable")]
    pub reference_bases: String,
    #[serde(deserialize_with = "nullable")]
    pub alternate_bases: Vec<String>,
}

/// Genomic window of a variant query. Coordinates are passed through to the
/// server untouched, so the half-open convention is whatever it defines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub reference_name: String,
    pub start: u64,
    pub end: u64,
}

impl Region {
    pub fn new(reference_name: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            reference_name: reference_name.into(),
            start,
            end,
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::new("1", 100_000, 900_000)
    }
}

/// Request bodies for the search endpoints. Paging fields are added by the client.
#[derive(Debug, Clone, Serialize, Default)]
pub struct SearchDatasetsRequest {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchVariantSetsRequest {
    pub dataset_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchVariantsRequest {
    pub variant_set_id: String,
    pub reference_name: String,
    pub start: u64,
    pub end: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_set_ids: Option<Vec<String>>,
}

/// One page of search results
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_page_token: Option<String>) -> Self {
        Self {
            items,
            next_page_token,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchDatasetsResponse {
    pub datasets: Vec<Dataset>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchVariantSetsResponse {
    pub variant_sets: Vec<VariantSet>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchVariantsResponse {
    pub variants: Vec<Variant>,
    pub next_page_token: Option<String>,
}

impl From<SearchDatasetsResponse> for Page<Dataset> {
    fn from(r: SearchDatasetsResponse) -> Self {
        Page::new(r.datasets, r.next_page_token)
    }
}

impl From<SearchVariantSetsResponse> for Page<VariantSet> {
    fn from(r: SearchVariantSetsResponse) -> Self {
        Page::new(r.variant_sets, r.next_page_token)
    }
}

impl From<SearchVariantsResponse> for Page<Variant> {
    fn from(r: SearchVariantsResponse) -> Self {
        Page::new(r.variants, r.next_page_token)
    }
}

fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// protobuf JSON renders int64 as a string; older servers emit plain numbers
fn int64<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Int64 {
        Number(u64),
        Text(String),
    }

    match Option::<Int64>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Int64::Number(n)) => Ok(n),
        Some(Int64::Text(s)) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_variant_int64_as_string_or_number() {
        let v: Variant = serde_json::from_value(json!({
            "id": "v1",
            "referenceName": "1",
            "start": "100005",
            "end": 100006,
            "referenceBases": "A",
            "alternateBases": ["T"],
        }))
        .unwrap();
        assert_eq!(v.start, 100005);
        assert_eq!(v.end, 100006);
        assert_eq!(v.reference_bases, "A");
    }

    #[test]
    fn test_variant_bad_int64() {
        let res: serde_json::Result<Variant> =
            serde_json::from_value(json!({ "start": "not-a-number" }));
        assert!(res.is_err());
    }

    #[test]
    fn test_null_fields_take_defaults() {
        let ds: Dataset = serde_json::from_value(json!({
            "id": "ds1",
            "name": null,
            "description": null,
        }))
        .unwrap();
        assert_eq!(ds.id, "ds1");
        assert_eq!(ds.name, "");
        assert_eq!(ds.description, None);

        let vs: VariantSet = serde_json::from_value(json!({
            "id": "vs1",
            "name": null,
            "datasetId": "ds1",
            "referenceSetId": null,
        }))
        .unwrap();
        assert_eq!(vs.dataset_id, "ds1");
        assert_eq!(vs.name, "");

        let v: Variant = serde_json::from_value(json!({
            "id": "v1",
            "names": null,
            "referenceName": null,
            "start": null,
            "end": "12",
            "referenceBases": "ACG",
            "alternateBases": null,
        }))
        .unwrap();
        assert!(v.names.is_empty());
        assert!(v.alternate_bases.is_empty());
        assert_eq!(v.start, 0);
        assert_eq!(v.end, 12);
        assert_eq!(v.reference_bases, "ACG");
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let ds: Dataset = serde_json::from_value(json!({
            "id": "ds1",
            "name": "1kg",
            "info": { "k": ["v"] },
        }))
        .unwrap();
        assert_eq!(ds.id, "ds1");
        assert_eq!(ds.description, None);
    }

    #[test]
    fn test_search_variants_request_camel_case() {
        let req = SearchVariantsRequest {
            variant_set_id: "vs1".to_string(),
            reference_name: "1".to_string(),
            start: 100000,
            end: 900000,
            call_set_ids: None,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "variantSetId": "vs1",
                "referenceName": "1",
                "start": 100000,
                "end": 900000,
            })
        );
    }

    #[test]
    fn test_response_into_page() {
        let resp: SearchVariantSetsResponse = serde_json::from_value(json!({
            "variantSets": [{ "id": "vs1", "datasetId": "ds1" }],
            "nextPageToken": "2",
        }))
        .unwrap();
        let page: Page<VariantSet> = resp.into();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].dataset_id, "ds1");
        assert_eq!(page.next_page_token.as_deref(), Some("2"));
    }

    #[test]
    fn test_default_region() {
        let region = Region::default();
        assert_eq!(region.reference_name, "1");
        assert_eq!(region.start, 100000);
        assert_eq!(region.end, 900000);
    }
}
