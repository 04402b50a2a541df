//! Address bindings (`/addresses/`).

use crate::client::{encode_segment, require_id, PhpIpamClient};
use crate::models::{Address, CustomFields, Tag};
use crate::Result;
use reqwest::Method;
use serde_json::{json, Value};

/// Address operations.
#[derive(Debug, Clone, Copy)]
pub struct Addresses<'a> {
    client: &'a PhpIpamClient,
}

impl<'a> Addresses<'a> {
    pub(crate) const fn new(client: &'a PhpIpamClient) -> Self {
        Self { client }
    }

    /// Fetch an address by id.
    pub async fn get(&self, id: &str) -> Result<Address> {
        self.client.fetch(&address_path(id), &[]).await
    }

    /// Every address in every section.
    pub async fn all(&self) -> Result<Vec<Address>> {
        self.client.fetch_or_default("addresses/all", &[]).await
    }

    /// Ping an address from the phpIPAM server and return the raw result.
    pub async fn ping(&self, id: &str) -> Result<Value> {
        let path = format!("{}/ping", address_path(id));
        self.client.fetch(&path, &[]).await
    }

    /// Fetch an address by IP within a subnet.
    pub async fn get_by_ip(&self, ip: &str, subnet_id: &str) -> Result<Address> {
        let path = format!(
            "addresses/{}/{}",
            encode_segment(ip),
            encode_segment(subnet_id)
        );
        self.client.fetch(&path, &[]).await
    }

    /// Addresses matching an IP, across subnets.
    pub async fn search(&self, ip: &str) -> Result<Vec<Address>> {
        self.search_by("search", ip).await
    }

    /// Addresses with the given hostname.
    pub async fn search_hostname(&self, hostname: &str) -> Result<Vec<Address>> {
        self.search_by("search_hostname", hostname).await
    }

    /// Addresses linked through the "Link addresses" custom field.
    pub async fn search_linked(&self, value: &str) -> Result<Vec<Address>> {
        self.search_by("search_linked", value).await
    }

    /// Addresses whose hostname starts with `hostbase`.
    pub async fn search_hostbase(&self, hostbase: &str) -> Result<Vec<Address>> {
        self.search_by("search_hostbase", hostbase).await
    }

    /// Addresses with the given MAC.
    pub async fn search_mac(&self, mac: &str) -> Result<Vec<Address>> {
        self.search_by("search_mac", mac).await
    }

    /// First unused address in a subnet.
    pub async fn first_free(&self, subnet_id: &str) -> Result<String> {
        let path = format!("addresses/first_free/{}", encode_segment(subnet_id));
        self.client.fetch(&path, &[]).await
    }

    /// Custom field definitions for addresses.
    pub async fn custom_fields(&self) -> Result<CustomFields> {
        self.client
            .fetch_or_default("addresses/custom_fields", &[])
            .await
    }

    /// Address state tags.
    pub async fn tags(&self) -> Result<Vec<Tag>> {
        self.client.fetch_or_default("addresses/tags", &[]).await
    }

    /// A single address state tag.
    pub async fn tag(&self, id: &str) -> Result<Tag> {
        let path = format!("addresses/tags/{}", encode_segment(id));
        self.client.fetch(&path, &[]).await
    }

    /// Addresses carrying a tag.
    pub async fn addresses_by_tag(&self, tag_id: &str) -> Result<Vec<Address>> {
        let path = format!("addresses/tags/{}/addresses", encode_segment(tag_id));
        self.client.fetch_or_default(&path, &[]).await
    }

    /// Create an address.
    pub async fn create(&self, address: &Address) -> Result<Address> {
        self.client
            .create_resource("addresses", Some(address), "addresses")
            .await
    }

    /// Allocate the first free address in a subnet.
    ///
    /// `address` carries optional attributes (hostname, description, ...)
    /// for the new record.
    pub async fn create_first_free(
        &self,
        subnet_id: &str,
        address: Option<&Address>,
    ) -> Result<Address> {
        let path = format!("addresses/first_free/{}", encode_segment(subnet_id));
        self.client
            .create_resource(&path, address, "addresses")
            .await
    }

    /// Update an address; its id must be set.
    pub async fn update(&self, address: &Address) -> Result<Address> {
        let id = require_id(address)?;
        self.client
            .update_resource(&address_path(id), address, "addresses")
            .await
    }

    /// Delete an address.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .send_empty::<()>(Method::DELETE, &address_path(id), None)
            .await
    }

    /// Delete an address together with its DNS records.
    pub async fn delete_with_dns(&self, id: &str) -> Result<()> {
        self.client
            .send_empty(
                Method::DELETE,
                &address_path(id),
                Some(&json!({ "remove_dns": "1" })),
            )
            .await
    }

    /// Delete an address by IP within a subnet.
    pub async fn delete_by_ip(&self, ip: &str, subnet_id: &str) -> Result<()> {
        let path = format!(
            "addresses/{}/{}",
            encode_segment(ip),
            encode_segment(subnet_id)
        );
        self.client
            .send_empty::<()>(Method::DELETE, &path, None)
            .await
    }

    async fn search_by(&self, kind: &str, value: &str) -> Result<Vec<Address>> {
        let path = format!("addresses/{kind}/{}", encode_segment(value));
        self.client.fetch_or_default(&path, &[]).await
    }
}

fn address_path(id: &str) -> String {
    format!("addresses/{}", encode_segment(id))
}

#[cfg(test)]
mod tests {
    use crate::models::Address;
    use crate::PhpIpamClient;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> PhpIpamClient {
        PhpIpamClient::with_static_token(server.uri(), "API", "t", false).unwrap()
    }

    fn ok(data: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({"code": 200, "success": true, "data": data}))
    }

    #[tokio::test]
    async fn create_first_free_reads_back_address() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/API/addresses/first_free/7/"))
            .and(body_json(json!({"hostname": "web01"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "code": 201,
                "success": true,
                "message": "Address created",
                "id": "23",
                "data": "10.10.0.5"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/API/addresses/23/"))
            .respond_with(ok(json!({
                "id": "23",
                "subnetId": "7",
                "ip": "10.10.0.5",
                "hostname": "web01",
                "is_gateway": "0"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = Address {
            hostname: Some("web01".to_string()),
            ..Address::default()
        };
        let address = client(&server)
            .addresses()
            .create_first_free("7", Some(&request))
            .await
            .unwrap();
        assert_eq!(address.ip.as_deref(), Some("10.10.0.5"));
        assert_eq!(address.is_gateway, Some(false));
    }

    #[tokio::test]
    async fn create_returns_echoed_entity_without_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/API/addresses/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "code": 201,
                "success": true,
                "id": 24,
                "data": {"id": 24, "subnetId": 7, "ip": "10.10.0.6"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/API/addresses/24/"))
            .respond_with(ok(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let address = client(&server)
            .addresses()
            .create(&Address::new("7", "10.10.0.6"))
            .await
            .unwrap();
        assert_eq!(address.id.as_deref(), Some("24"));
    }

    #[tokio::test]
    async fn hostname_and_mac_searches_are_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/API/addresses/search_hostname/web+01.example.com/"))
            .respond_with(ok(json!([{"id": "1", "hostname": "web 01.example.com"}])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/API/addresses/search_mac/00%3A11%3A22%3A33%3A44%3A55/"))
            .respond_with(ok(json!([{"id": "2", "mac": "00:11:22:33:44:55"}])))
            .mount(&server)
            .await;

        let client = client(&server);
        let by_host = client
            .addresses()
            .search_hostname("web 01.example.com")
            .await
            .unwrap();
        assert_eq!(by_host.len(), 1);

        let by_mac = client
            .addresses()
            .search_mac("00:11:22:33:44:55")
            .await
            .unwrap();
        assert_eq!(by_mac[0].id.as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn search_without_matches_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/API/addresses/search/10.99.0.1/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "success": true,
                "data": null
            })))
            .mount(&server)
            .await;

        let found = client(&server).addresses().search("10.99.0.1").await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn deletes() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/API/addresses/23/"))
            .and(body_json(json!({"remove_dns": "1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "success": true
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/API/addresses/10.10.0.5/7/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "success": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        client.addresses().delete_with_dns("23").await.unwrap();
        client.addresses().delete_by_ip("10.10.0.5", "7").await.unwrap();
    }

    #[tokio::test]
    async fn tags() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/API/addresses/tags/2/"))
            .respond_with(ok(json!({
                "id": "2",
                "type": "Used",
                "showtag": "1",
                "bgcolor": "#a9c9a4"
            })))
            .mount(&server)
            .await;

        let tag = client(&server).addresses().tag("2").await.unwrap();
        assert_eq!(tag.tag_type.as_deref(), Some("Used"));
        assert_eq!(tag.show_tag, Some(true));
    }
}
