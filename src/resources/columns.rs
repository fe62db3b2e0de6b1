use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::query::ops::wire_enum;
use crate::transport::{ApiPath, Transport};

wire_enum! {
    pub enum ColumnType : exact {
        String => "string",
        Float => "float",
        Integer => "integer",
        Boolean => "boolean",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Column {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub key_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<ColumnType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_written: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Column {
    pub fn new(key_name: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
            ..Self::default()
        }
    }
}

/// `/1/columns/<dataset>`
#[derive(Debug, Clone)]
pub struct Columns {
    transport: Arc<Transport>,
}

impl Columns {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    pub async fn list(&self, dataset: &str) -> Result<Vec<Column>> {
        self.transport.get(&ApiPath::dataset("columns", dataset)).await
    }

    pub async fn get(&self, dataset: &str, id: &str) -> Result<Column> {
        self.transport.get(&column_path(dataset, id)).await
    }

    pub async fn get_by_key_name(&self, dataset: &str, key_name: &str) -> Result<Column> {
        self.transport
            .get_with_query(&ApiPath::dataset("columns", dataset), &[("key_name", key_name)])
            .await
    }

    pub async fn create(&self, dataset: &str, column: &Column) -> Result<Column> {
        self.transport.post(&ApiPath::dataset("columns", dataset), column).await
    }

    pub async fn update(&self, dataset: &str, id: &str, column: &Column) -> Result<Column> {
        let mut body = column.clone();
        body.id = Some(id.to_string());
        self.transport.put(&column_path(dataset, id), &body).await
    }

    pub async fn delete(&self, dataset: &str, id: &str) -> Result<()> {
        self.transport.delete(&column_path(dataset, id)).await
    }
}

fn column_path(dataset: &str, id: &str) -> ApiPath {
    ApiPath::dataset("columns", dataset).item(id)
}
