use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Models for representing customer instances and their status
// -------------------------------------------------------------------------------------------------

/// Model for a customer instance and its relevant metadata
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInstance {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_tag: String,
    #[serde(default)]
    pub namespace: String,
    pub status: InstanceStatus,
    #[serde(default)]
    pub config: CustomerConfig,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Configuration block of a customer instance, also used in create and update payloads
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerConfig {
    #[serde(default)]
    pub resources: ResourceConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageConfig>,
    #[serde(default)]
    pub high_availability: bool,
    #[serde(default)]
    pub backup_enabled: bool,
    #[serde(default)]
    pub monitoring_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_settings: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Resource requests and limits
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ResourceConfig {
    #[serde(default)]
    pub requests: ResourceRequirements,
    #[serde(default)]
    pub limits: ResourceRequirements,
}

/// CPU and memory requirements in Kubernetes quantity notation, e.g. `500m` or `1Gi`
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ResourceRequirements {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cpu: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub memory: String,
}

/// Storage requirements of a customer instance
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub size: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub storage_class: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub backup_size: String,
}

/// Current status of a customer instance as reported by the API
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceStatus {
    pub phase: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    pub ready: bool,
    #[serde(default)]
    pub replicas: i32,
    #[serde(default)]
    pub ready_replicas: i32,
    pub last_updated: DateTime<Utc>,
}

impl InstanceStatus {
    pub const PHASE_FAILED: &'static str = "Failed";

    pub fn is_failed(&self) -> bool {
        self.phase == Self::PHASE_FAILED
    }
}

/// Payload of POST /api/v1/customers
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub name: String,
    pub display_name: String,
    pub image_tag: String,
    pub config: CustomerConfig,
    pub labels: BTreeMap<String, String>,
}

impl CreateCustomerRequest {
    /// Builds a create payload. A missing display name falls back to the customer name.
    pub fn new(
        name: &str,
        display_name: Option<&str>,
        image_tag: &str,
        config: Option<CustomerConfig>,
        labels: Option<BTreeMap<String, String>>,
    ) -> Self {
        CreateCustomerRequest {
            name: name.to_string(),
            display_name: display_name.unwrap_or(name).to_string(),
            image_tag: image_tag.to_string(),
            config: config.unwrap_or_default(),
            labels: labels.unwrap_or_default(),
        }
    }
}

/// Payload of PUT /api/v1/customers/{name}; only fields that are set get serialized
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<CustomerConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
}

impl UpdateCustomerRequest {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.image_tag.is_none()
            && self.config.is_none()
            && self.labels.is_none()
    }
}

/// One page of customer instances
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerList {
    #[serde(default)]
    pub customers: Vec<CustomerInstance>,
    pub total: u32,
    pub page: u32,
    pub page_size: u32,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
}

impl CustomerList {
    /// Number of pages for `total` customers split into pages of `page_size`.
    pub fn total_pages(total: u32, page_size: u32) -> u32 {
        if page_size == 0 {
            return 0;
        }
        (total + page_size - 1) / page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::response::ApiResponse;
    use crate::models::tests::read_json_from_file;

    #[test]
    fn deserialize_customer_response() {
        let vobj: ApiResponse<CustomerInstance> =
            read_json_from_file("test/test_customer_response.json").unwrap();
        let customer = vobj.data.unwrap();

        assert_eq!(customer.name, "acme-corp");
        assert_eq!(customer.namespace, "customer-acme-corp");
        assert!(customer.config.high_availability);
        assert_eq!(customer.config.resources.limits.memory, "4Gi");
        assert_eq!(customer.labels.get("team").unwrap(), "platform");
        assert_eq!(customer.status.phase, "Creating");
    }

    #[test]
    fn deserialize_customer_list_response() {
        let vobj: ApiResponse<CustomerList> =
            read_json_from_file("test/test_customer_list_response.json").unwrap();
        let list = vobj.data.unwrap();

        assert_eq!(list.customers.len(), 2);
        assert_eq!(list.total, 7);
        assert!(list.has_next);
        assert!(list.customers[1].status.ready);
        // Empty display name and image tag are omitted by the server
        assert_eq!(list.customers[1].display_name, "");
    }

    #[test]
    fn deserialize_status_response() {
        let vobj: ApiResponse<InstanceStatus> =
            read_json_from_file("test/test_status_response.json").unwrap();
        let status = vobj.data.unwrap();

        assert_eq!(status.phase, "Running");
        assert!(status.ready);
        assert_eq!(status.replicas, 2);
        assert_eq!(status.ready_replicas, 2);
        assert!(!status.is_failed());
    }

    #[test]
    fn create_request_defaults_display_name_to_name() {
        let request = CreateCustomerRequest::new("foo", None, "latest", None, None);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["displayName"], "foo");
        assert_eq!(json["imageTag"], "latest");
        assert_eq!(json["labels"], serde_json::json!({}));
        assert_eq!(json["config"]["highAvailability"], false);
    }

    #[test]
    fn update_request_only_serializes_set_fields() {
        let request = UpdateCustomerRequest {
            image_tag: Some("v2".to_string()),
            ..Default::default()
        };

        assert!(!request.is_empty());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "imageTag": "v2" })
        );
        assert!(UpdateCustomerRequest::default().is_empty());
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(CustomerList::total_pages(11, 5), 3);
        assert_eq!(CustomerList::total_pages(10, 5), 2);
        assert_eq!(CustomerList::total_pages(0, 5), 0);
    }
}
