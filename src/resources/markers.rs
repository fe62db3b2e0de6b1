use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::transport::{ApiPath, Transport};

/// A point (`end_time` unset) or interval annotation on a dataset's timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Unix seconds; the server uses "now" when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// Free-form grouping label, e.g. `deploy`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Marker {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}

/// `/1/markers/<dataset>`
#[derive(Debug, Clone)]
pub struct Markers {
    transport: Arc<Transport>,
}

impl Markers {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    pub async fn list(&self, dataset: &str) -> Result<Vec<Marker>> {
        self.transport.get(&ApiPath::dataset("markers", dataset)).await
    }

    /// The markers API has no single-item endpoint, so this lists the dataset
    /// and picks `id` out, answering `NotFound` when it is absent.
    pub async fn get(&self, dataset: &str, id: &str) -> Result<Marker> {
        let markers = self.list(dataset).await?;
        let found = markers.into_iter().find(|m| m.id.as_deref() == Some(id));
        if found.is_none() {
            debug!("marker {id} not in {} listed markers", dataset);
        }
        found.ok_or(Error::NotFound)
    }

    pub async fn create(&self, dataset: &str, marker: &Marker) -> Result<Marker> {
        self.transport.post(&ApiPath::dataset("markers", dataset), marker).await
    }

    pub async fn update(&self, dataset: &str, id: &str, marker: &Marker) -> Result<Marker> {
        let mut body = marker.clone();
        body.id = Some(id.to_string());
        self.transport.put(&marker_path(dataset, id), &body).await
    }

    pub async fn delete(&self, dataset: &str, id: &str) -> Result<()> {
        self.transport.delete(&marker_path(dataset, id)).await
    }
}

fn marker_path(dataset: &str, id: &str) -> ApiPath {
    ApiPath::dataset("markers", dataset).item(id)
}
