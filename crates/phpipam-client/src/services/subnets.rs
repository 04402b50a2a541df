//! Subnet bindings (`/subnets/`).

use crate::client::{encode_segment, require_id, PhpIpamClient};
use crate::models::{Address, CustomFields, Subnet, SubnetUsage};
use crate::Result;
use reqwest::Method;
use serde_json::json;
use std::collections::BTreeMap;

/// Subnet operations.
///
/// CIDR arguments are passed as `network/mask` and sent as two path
/// segments, which is the form phpIPAM expects.
#[derive(Debug, Clone, Copy)]
pub struct Subnets<'a> {
    client: &'a PhpIpamClient,
}

impl<'a> Subnets<'a> {
    pub(crate) const fn new(client: &'a PhpIpamClient) -> Self {
        Self { client }
    }

    /// List all subnets.
    pub async fn list(&self) -> Result<Vec<Subnet>> {
        self.client.fetch_or_default("subnets", &[]).await
    }

    /// Fetch a subnet by id.
    pub async fn get(&self, id: &str) -> Result<Subnet> {
        self.client.fetch(&subnet_path(id, ""), &[]).await
    }

    /// Address usage statistics.
    pub async fn usage(&self, id: &str) -> Result<SubnetUsage> {
        self.client.fetch(&subnet_path(id, "usage"), &[]).await
    }

    /// Direct child subnets.
    pub async fn slaves(&self, id: &str) -> Result<Vec<Subnet>> {
        self.client
            .fetch_or_default(&subnet_path(id, "slaves"), &[])
            .await
    }

    /// All descendant subnets.
    pub async fn slaves_recursive(&self, id: &str) -> Result<Vec<Subnet>> {
        self.client
            .fetch_or_default(&subnet_path(id, "slaves_recursive"), &[])
            .await
    }

    /// Addresses in a subnet.
    pub async fn addresses(&self, id: &str) -> Result<Vec<Address>> {
        self.client
            .fetch_or_default(&subnet_path(id, "addresses"), &[])
            .await
    }

    /// A single address in a subnet.
    pub async fn address(&self, id: &str, ip: &str) -> Result<Address> {
        let path = subnet_path(id, &format!("addresses/{}", encode_segment(ip)));
        self.client.fetch(&path, &[]).await
    }

    /// First unused address in a subnet.
    pub async fn first_free(&self, id: &str) -> Result<String> {
        self.client.fetch(&subnet_path(id, "first_free"), &[]).await
    }

    /// First free child subnet with the given mask, in CIDR notation.
    pub async fn first_subnet(&self, id: &str, mask: u8) -> Result<String> {
        let path = subnet_path(id, &format!("first_subnet/{mask}"));
        self.client.fetch(&path, &[]).await
    }

    /// Last free child subnet with the given mask, in CIDR notation.
    pub async fn last_subnet(&self, id: &str, mask: u8) -> Result<String> {
        let path = subnet_path(id, &format!("last_subnet/{mask}"));
        self.client.fetch(&path, &[]).await
    }

    /// Every free child subnet with the given mask, in CIDR notation.
    pub async fn all_subnets(&self, id: &str, mask: u8) -> Result<Vec<String>> {
        let path = subnet_path(id, &format!("all_subnets/{mask}"));
        self.client.fetch_or_default(&path, &[]).await
    }

    /// Custom field definitions for subnets.
    pub async fn custom_fields(&self) -> Result<CustomFields> {
        self.client
            .fetch_or_default("subnets/custom_fields", &[])
            .await
    }

    /// Subnets matching a CIDR exactly.
    pub async fn search_cidr(&self, cidr: &str) -> Result<Vec<Subnet>> {
        let path = format!("subnets/cidr/{}", cidr.trim_matches('/'));
        self.client.fetch_or_default(&path, &[]).await
    }

    /// Subnets overlapping a CIDR.
    pub async fn overlapping(&self, cidr: &str) -> Result<Vec<Subnet>> {
        let path = format!("subnets/overlapping/{}", cidr.trim_matches('/'));
        self.client.fetch_or_default(&path, &[]).await
    }

    /// Create a subnet.
    pub async fn create(&self, subnet: &Subnet) -> Result<Subnet> {
        self.client
            .create_resource("subnets", Some(subnet), "subnets")
            .await
    }

    /// Create the first free child subnet with the given mask.
    pub async fn create_first_subnet(&self, id: &str, mask: u8, subnet: &Subnet) -> Result<Subnet> {
        let path = subnet_path(id, &format!("first_subnet/{mask}"));
        self.client
            .create_resource(&path, Some(subnet), "subnets")
            .await
    }

    /// Update a subnet; its id must be set.
    pub async fn update(&self, subnet: &Subnet) -> Result<Subnet> {
        let id = require_id(subnet)?;
        self.client
            .update_resource(&subnet_path(id, ""), subnet, "subnets")
            .await
    }

    /// Change the mask of a subnet.
    pub async fn resize(&self, id: &str, mask: u8) -> Result<()> {
        self.client
            .send_empty(Method::PATCH, &subnet_path(id, "resize"), Some(&json!({ "mask": mask })))
            .await
    }

    /// Split a subnet into `number` equal parts.
    pub async fn split(&self, id: &str, number: u32) -> Result<()> {
        self.client
            .send_empty(
                Method::PATCH,
                &subnet_path(id, "split"),
                Some(&json!({ "number": number })),
            )
            .await
    }

    /// Replace group permissions (group id to permission level).
    pub async fn set_permissions(
        &self,
        id: &str,
        permissions: &BTreeMap<String, String>,
    ) -> Result<()> {
        self.client
            .send_empty(Method::PATCH, &subnet_path(id, "permissions"), Some(permissions))
            .await
    }

    /// Delete a subnet.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .send_empty::<()>(Method::DELETE, &subnet_path(id, ""), None)
            .await
    }

    /// Remove every address from a subnet.
    pub async fn truncate(&self, id: &str) -> Result<()> {
        self.client
            .send_empty::<()>(Method::DELETE, &subnet_path(id, "truncate"), None)
            .await
    }

    /// Remove all group permissions.
    pub async fn remove_permissions(&self, id: &str) -> Result<()> {
        self.client
            .send_empty::<()>(Method::DELETE, &subnet_path(id, "permissions"), None)
            .await
    }
}

fn subnet_path(id: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        format!("subnets/{}", encode_segment(id))
    } else {
        format!("subnets/{}/{suffix}", encode_segment(id))
    }
}

#[cfg(test)]
mod tests {
    use crate::models::Subnet;
    use crate::{Error, PhpIpamClient};
    use serde_json::json;
    use std::collections::BTreeMap;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> PhpIpamClient {
        PhpIpamClient::with_static_token(server.uri(), "API", "t", false).unwrap()
    }

    fn ok(data: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({"code": 200, "success": true, "data": data}))
    }

    fn done() -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({"code": 200, "success": true}))
    }

    #[tokio::test]
    async fn first_free_and_usage() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/API/subnets/7/first_free/"))
            .respond_with(ok(json!("10.10.0.5")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/API/subnets/7/usage/"))
            .respond_with(ok(json!({
                "used": 4,
                "maxhosts": "254",
                "freehosts": "250",
                "freehosts_percent": 98.43
            })))
            .mount(&server)
            .await;

        let client = client(&server);
        assert_eq!(client.subnets().first_free("7").await.unwrap(), "10.10.0.5");

        let usage = client.subnets().usage("7").await.unwrap();
        assert_eq!(usage.used.as_deref(), Some("4"));
        assert_eq!(usage.max_hosts.as_deref(), Some("254"));
        assert_eq!(usage.free_hosts_percent, Some(98.43));
    }

    #[tokio::test]
    async fn first_free_in_full_subnet() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/API/subnets/7/first_free/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 404,
                "success": false,
                "message": "No free addresses found"
            })))
            .mount(&server)
            .await;

        let err = client(&server).subnets().first_free("7").await.unwrap_err();
        assert_eq!(err, Error::NotFound("No free addresses found".to_string()));
    }

    #[tokio::test]
    async fn search_cidr_uses_two_segments() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/API/subnets/cidr/10.10.0.0/24/"))
            .respond_with(ok(json!([{"id": 7, "subnet": "10.10.0.0", "mask": 24}])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/API/subnets/7/all_subnets/26/"))
            .respond_with(ok(json!(["10.10.0.0/26", "10.10.0.64/26"])))
            .mount(&server)
            .await;

        let client = client(&server);
        let found = client.subnets().search_cidr("10.10.0.0/24").await.unwrap();
        assert_eq!(found[0].id.as_deref(), Some("7"));
        assert_eq!(found[0].mask.as_deref(), Some("24"));

        let free = client.subnets().all_subnets("7", 26).await.unwrap();
        assert_eq!(free.len(), 2);
    }

    #[tokio::test]
    async fn create_first_subnet_fetches_created_subnet() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/API/subnets/7/first_subnet/26/"))
            .and(body_json(json!({"sectionId": "1", "description": "lab"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "code": 201,
                "success": true,
                "id": "12",
                "data": "10.10.0.0/26"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/API/subnets/12/"))
            .respond_with(ok(json!({
                "id": "12",
                "subnet": "10.10.0.0",
                "mask": "26",
                "masterSubnetId": "7"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = Subnet {
            section_id: Some("1".to_string()),
            description: Some("lab".to_string()),
            ..Subnet::default()
        };
        let created = client(&server)
            .subnets()
            .create_first_subnet("7", 26, &request)
            .await
            .unwrap();
        assert_eq!(created.cidr().as_deref(), Some("10.10.0.0/26"));
        assert_eq!(created.master_subnet_id.as_deref(), Some("7"));
    }

    #[tokio::test]
    async fn resize_split_and_permissions() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/API/subnets/7/resize/"))
            .and(body_json(json!({"mask": 23})))
            .respond_with(done())
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/api/API/subnets/7/split/"))
            .and(body_json(json!({"number": 4})))
            .respond_with(done())
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/api/API/subnets/7/permissions/"))
            .and(body_json(json!({"3": "2"})))
            .respond_with(done())
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/API/subnets/7/permissions/"))
            .respond_with(done())
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/API/subnets/7/truncate/"))
            .respond_with(done())
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let subnets = client.subnets();
        subnets.resize("7", 23).await.unwrap();
        subnets.split("7", 4).await.unwrap();

        let mut permissions = BTreeMap::new();
        permissions.insert("3".to_string(), "2".to_string());
        subnets.set_permissions("7", &permissions).await.unwrap();
        subnets.remove_permissions("7").await.unwrap();
        subnets.truncate("7").await.unwrap();
    }

    #[tokio::test]
    async fn update_requires_id() {
        let server = MockServer::start().await;
        let err = client(&server)
            .subnets()
            .update(&Subnet::new("1", "10.0.0.0", "24"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            Error::ValidationError("Subnet ID is required for update".to_string())
        );
    }
}
