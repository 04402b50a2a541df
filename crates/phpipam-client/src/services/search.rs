//! Global search (`/search/`).

use crate::client::{encode_segment, PhpIpamClient};
use crate::models::SearchResult;
use crate::Result;
use phpipam_core::query::QueryParams;

/// Which object kinds a search covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Include addresses.
    pub addresses: bool,
    /// Include subnets.
    pub subnets: bool,
    /// Include VLANs.
    pub vlans: bool,
    /// Include VRFs.
    pub vrfs: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            addresses: true,
            subnets: true,
            vlans: false,
            vrfs: false,
        }
    }
}

impl SearchOptions {
    fn to_query(self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_flag("addresses", self.addresses);
        params.push_flag("subnets", self.subnets);
        params.push_flag("vlan", self.vlans);
        params.push_flag("vrf", self.vrfs);
        params
    }
}

/// Search operations.
#[derive(Debug, Clone, Copy)]
pub struct Search<'a> {
    client: &'a PhpIpamClient,
}

impl<'a> Search<'a> {
    pub(crate) const fn new(client: &'a PhpIpamClient) -> Self {
        Self { client }
    }

    /// Search addresses and subnets for `term`.
    pub async fn search(&self, term: &str) -> Result<SearchResult> {
        self.search_with(term, SearchOptions::default()).await
    }

    /// Search for `term` across the object kinds selected in `options`.
    pub async fn search_with(&self, term: &str, options: SearchOptions) -> Result<SearchResult> {
        let path = format!("search/{}", encode_segment(term));
        let params = options.to_query().into_pairs();
        self.client.fetch_or_default(&path, &params).await
    }
}
