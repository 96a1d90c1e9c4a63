//! Kafka logging endpoints, scoped to a service version.

use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::http_utils::ApiClient;

/////////////////////////////////////////////// Kafka //////////////////////////////////////////////

/// A Kafka logging endpoint as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kafka {
    pub service_id: String,
    pub version: u64,
    pub name: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub brokers: String,
    #[serde(default)]
    pub required_acks: String,
    #[serde(default)]
    pub compression_codec: String,
    #[serde(default)]
    pub use_tls: bool,
    #[serde(default)]
    pub tls_ca_cert: String,
    #[serde(default)]
    pub tls_client_cert: String,
    #[serde(default)]
    pub tls_client_key: String,
    #[serde(default)]
    pub tls_hostname: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub format_version: u32,
    #[serde(default)]
    pub response_condition: String,
    #[serde(default)]
    pub placement: String,
    #[serde(default)]
    pub parse_log_keyvals: bool,
    #[serde(default)]
    pub request_max_bytes: u64,
    #[serde(default)]
    pub auth_method: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
}

////////////////////////////////////////////// Inputs //////////////////////////////////////////////

/// Request to create a Kafka endpoint. The service scope rides in the URL;
/// only entity fields are serialized. Optional fields left `None` are
/// omitted from the request body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateKafkaInput {
    #[serde(skip)]
    pub service_id: String,
    #[serde(skip)]
    pub version: u64,
    pub name: String,
    pub topic: String,
    pub brokers: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_acks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression_codec: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_tls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_ca_cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_client_cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_client_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_log_keyvals: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_max_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Request to update a Kafka endpoint, addressed by its current name.
/// Fields left `None` are untouched by the remote.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateKafkaInput {
    #[serde(skip)]
    pub service_id: String,
    #[serde(skip)]
    pub version: u64,
    #[serde(skip)]
    pub name: String,
    #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brokers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_acks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression_codec: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_tls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_ca_cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_client_cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_client_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_log_keyvals: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_max_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/////////////////////////////////////////// Operations /////////////////////////////////////////////

fn collection_path(service_id: &str, version: u64) -> String {
    format!("service/{}/version/{}/logging/kafka", service_id, version)
}

fn item_path(service_id: &str, version: u64, name: &str) -> String {
    format!("service/{}/version/{}/logging/kafka/{}", service_id, version, name)
}

pub async fn create(client: &ApiClient, input: &CreateKafkaInput) -> Result<Kafka, Error> {
    client
        .post(&collection_path(&input.service_id, input.version), input)
        .await
}

pub async fn list(client: &ApiClient, service_id: &str, version: u64) -> Result<Vec<Kafka>, Error> {
    client.get(&collection_path(service_id, version)).await
}

pub async fn get(
    client: &ApiClient,
    service_id: &str,
    version: u64,
    name: &str,
) -> Result<Kafka, Error> {
    client.get(&item_path(service_id, version, name)).await
}

pub async fn update(client: &ApiClient, input: &UpdateKafkaInput) -> Result<Kafka, Error> {
    client
        .put(&item_path(&input.service_id, input.version, &input.name), input)
        .await
}

pub async fn delete(
    client: &ApiClient,
    service_id: &str,
    version: u64,
    name: &str,
) -> Result<(), Error> {
    client.delete(&item_path(service_id, version, name)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_carry_service_scope() {
        assert_eq!(collection_path("123", 4), "service/123/version/4/logging/kafka");
        assert_eq!(item_path("123", 4, "log"), "service/123/version/4/logging/kafka/log");
    }

    #[test]
    fn create_input_serializes_only_entity_fields() {
        let input = CreateKafkaInput {
            service_id: "123".to_string(),
            version: 4,
            name: "log".to_string(),
            topic: "logs".to_string(),
            brokers: "127.0.0.1,127.0.0.2".to_string(),
            use_tls: Some(true),
            ..Default::default()
        };
        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "name": "log",
                "topic": "logs",
                "brokers": "127.0.0.1,127.0.0.2",
                "use_tls": true,
            })
        );
    }

    #[test]
    fn update_input_renames_via_name_field() {
        let input = UpdateKafkaInput {
            service_id: "123".to_string(),
            version: 4,
            name: "logs".to_string(),
            new_name: Some("log".to_string()),
            ..Default::default()
        };
        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(body, serde_json::json!({"name": "log"}));
    }

    #[test]
    fn kafka_deserializes_with_missing_optionals() {
        let kafka: Kafka = serde_json::from_value(serde_json::json!({
            "service_id": "123",
            "version": 1,
            "name": "logs",
        }))
        .unwrap();
        assert_eq!(kafka.topic, "");
        assert!(!kafka.use_tls);
        assert_eq!(kafka.request_max_bytes, 0);
    }
}
