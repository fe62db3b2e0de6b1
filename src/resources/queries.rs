use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::query::{QuerySpec, Validate};
use crate::transport::{ApiPath, Transport};

/// A query spec saved under a dataset. Saved queries are immutable: the API
/// offers create and get only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub spec: QuerySpec,
}

/// `/1/queries/<dataset>`
#[derive(Debug, Clone)]
pub struct Queries {
    transport: Arc<Transport>,
}

impl Queries {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    pub async fn get(&self, dataset: &str, id: &str) -> Result<Query> {
        self.transport.get(&ApiPath::dataset("queries", dataset).item(id)).await
    }

    pub async fn create(&self, dataset: &str, spec: &QuerySpec) -> Result<Query> {
        spec.validate()?;
        self.transport.post(&ApiPath::dataset("queries", dataset), spec).await
    }
}
