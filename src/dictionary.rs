//! Edge dictionary items, scoped to a service and a dictionary.
//!
//! Dictionary items attach to a dictionary, not to a service version, so
//! their commands carry no version or autoclone handling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::http_utils::ApiClient;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryItem {
    pub service_id: String,
    pub dictionary_id: String,
    pub item_key: String,
    #[serde(default)]
    pub item_value: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request to create or update a dictionary item. The service and dictionary
/// ride in the URL; only the item fields are serialized.
#[derive(Debug, Clone, Serialize)]
pub struct DictionaryItemInput {
    #[serde(skip)]
    pub service_id: String,
    #[serde(skip)]
    pub dictionary_id: String,
    pub item_key: String,
    pub item_value: String,
}

fn collection_path(service_id: &str, dictionary_id: &str) -> String {
    format!("service/{}/dictionary/{}/items", service_id, dictionary_id)
}

fn item_path(service_id: &str, dictionary_id: &str, key: &str) -> String {
    format!("service/{}/dictionary/{}/item/{}", service_id, dictionary_id, key)
}

pub async fn create(client: &ApiClient, input: &DictionaryItemInput) -> Result<DictionaryItem, Error> {
    let path = format!(
        "service/{}/dictionary/{}/item",
        input.service_id, input.dictionary_id
    );
    client.post(&path, input).await
}

pub async fn list(
    client: &ApiClient,
    service_id: &str,
    dictionary_id: &str,
) -> Result<Vec<DictionaryItem>, Error> {
    client.get(&collection_path(service_id, dictionary_id)).await
}

pub async fn get(
    client: &ApiClient,
    service_id: &str,
    dictionary_id: &str,
    key: &str,
) -> Result<DictionaryItem, Error> {
    client.get(&item_path(service_id, dictionary_id, key)).await
}

pub async fn update(client: &ApiClient, input: &DictionaryItemInput) -> Result<DictionaryItem, Error> {
    client
        .put(
            &item_path(&input.service_id, &input.dictionary_id, &input.item_key),
            input,
        )
        .await
}

pub async fn delete(
    client: &ApiClient,
    service_id: &str,
    dictionary_id: &str,
    key: &str,
) -> Result<(), Error> {
    client.delete(&item_path(service_id, dictionary_id, key)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_carry_service_and_dictionary_scope() {
        assert_eq!(collection_path("123", "d1"), "service/123/dictionary/d1/items");
        assert_eq!(item_path("123", "d1", "foo"), "service/123/dictionary/d1/item/foo");
    }

    #[test]
    fn input_serializes_only_item_fields() {
        let input = DictionaryItemInput {
            service_id: "123".to_string(),
            dictionary_id: "d1".to_string(),
            item_key: "foo".to_string(),
            item_value: "bar".to_string(),
        };
        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(body, serde_json::json!({"item_key": "foo", "item_value": "bar"}));
    }
}
