//! HTTP client for GA4GH reference servers.
//!
//! Searches are `POST` requests with a JSON body; the server answers one page at
//! a time and hands back a `nextPageToken` for the following page. Paging is
//! driven by [`SearchResults`] so callers only ever see a flat sequence.

use super::{Ga4ghClient, SearchResults};
use crate::{
    Error, Result,
    types::{
        Dataset, Page, SearchDatasetsRequest, SearchDatasetsResponse, SearchVariantSetsRequest,
        SearchVariantSetsResponse, SearchVariantsRequest, SearchVariantsResponse, Variant,
        VariantSet,
    },
};
use serde::{Serialize, de::DeserializeOwned};
use ureq::Agent;
use url::Url;

/// Search body with paging fields appended to the request fields
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PagedRequest<'r, R> {
    #[serde(flatten)]
    request: &'r R,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_size: Option<u32>,
    page_token: Option<&'r str>,
}

/// Blocking GA4GH API client.
pub struct HttpClient {
    agent: Agent,
    base_url: Url,
    page_size: Option<u32>,
}

impl HttpClient {
    /// Create a client bound to `base_url`
    /// (e.g., "http://example.org/ga4gh/").
    ///
    /// Endpoints are resolved relative to the base, so a missing trailing slash is added.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            agent: Agent::new_with_defaults(),
            base_url,
            page_size: None,
        })
    }

    /// Ask the server for pages of at most `page_size` records
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn get_dataset(&self, id: &str) -> Result<Dataset> {
        self.get("datasets", id)
    }

    pub fn get_variant_set(&self, id: &str) -> Result<VariantSet> {
        self.get("variantsets", id)
    }

    pub fn get_variant(&self, id: &str) -> Result<Variant> {
        self.get("variants", id)
    }

    /// Construct the URL of a record, escaping the id as a single path segment.
    fn record_url(&self, kind: &str, id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(kind).push(id);
        }
        url
    }

    fn get<T: DeserializeOwned>(&self, kind: &str, id: &str) -> Result<T> {
        let url = self.record_url(kind, id);
        tracing::debug!(url = %url, "GET record");

        let mut response = match self.agent.get(url.as_str()).call() {
            Err(ureq::Error::StatusCode(404)) => return Err(Error::NotFound(id.to_string())),
            other => other?,
        };

        Ok(response.body_mut().read_json()?)
    }

    fn search<R, P, T>(&self, path: &str, request: R) -> SearchResults<'_, T>
    where
        R: Serialize + 'static,
        P: DeserializeOwned + Into<Page<T>>,
    {
        let endpoint = self.base_url.join(path);
        let query = match &endpoint {
            Ok(url) => format!("POST {}", url),
            Err(_) => format!("POST {}", path),
        };

        SearchResults::new(query, move |token: Option<&str>| {
            let url = endpoint.clone()?;
            let body = PagedRequest {
                request: &request,
                page_size: self.page_size,
                page_token: token,
            };

            let mut response = self.agent.post(url.as_str()).send_json(&body)?;
            let page: Page<T> = response.body_mut().read_json::<P>()?.into();

            tracing::debug!(
                url = %url,
                items = page.items.len(),
                next_page_token = ?page.next_page_token,
                "fetched page"
            );
            Ok(page)
        })
    }
}

impl Ga4ghClient for HttpClient {
    fn search_datasets(&self) -> SearchResults<'_, Dataset> {
        self.search::<_, SearchDatasetsResponse, _>("datasets/search", SearchDatasetsRequest {})
    }

    fn search_variant_sets(&self, dataset_id: &str) -> SearchResults<'_, VariantSet> {
        let request = SearchVariantSetsRequest {
            dataset_id: dataset_id.to_string(),
        };
        self.search::<_, SearchVariantSetsResponse, _>("variantsets/search", request)
    }

    fn search_variants(
        &self,
        variant_set_id: &str,
        start: u64,
        end: u64,
        reference_name: &str,
    ) -> SearchResults<'_, Variant> {
        self.search_variants_for_call_sets(variant_set_id, start, end, reference_name, None)
    }
}

impl HttpClient {
    /// Variant search restricted to the calls of `call_set_ids`.
    ///
    /// `None` leaves the choice of calls to the server, `Some(&[])` asks for none.
    pub fn search_variants_for_call_sets(
        &self,
        variant_set_id: &str,
        start: u64,
        end: u64,
        reference_name: &str,
        call_set_ids: Option<&[String]>,
    ) -> SearchResults<'_, Variant> {
        let request = SearchVariantsRequest {
            variant_set_id: variant_set_id.to_string(),
            reference_name: reference_name.to_string(),
            start,
            end,
            call_set_ids: call_set_ids.map(<[String]>::to_vec),
        };
        self.search::<_, SearchVariantsResponse, _>("variants/search", request)
    }
}
