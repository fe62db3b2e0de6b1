use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::query::ops::wire_enum;
use crate::query::{QuerySpec, Validate, ValidationError};
use crate::transport::{ApiPath, Transport};

wire_enum! {
    pub enum TriggerThresholdOp : exact {
        GreaterThan => ">",
        GreaterThanOrEqual => ">=",
        LessThan => "<",
        LessThanOrEqual => "<=",
    }
}

wire_enum! {
    pub enum TriggerRecipientType : exact {
        Email => "email",
        Marker => "marker",
        PagerDuty => "pagerduty",
        Slack => "slack",
        Webhook => "webhook",
    }
}

/// An alerting rule: a single-series query evaluated every `frequency`
/// seconds and compared against `threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub disabled: bool,
    /// Only calculations, filters and breakdowns matter to a trigger.
    pub query: QuerySpec,
    /// Seconds between evaluations; the server picks 900 when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<i64>,
    pub threshold: TriggerThreshold,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipients: Vec<TriggerRecipient>,
}

impl Trigger {
    pub fn new(name: impl Into<String>, query: QuerySpec, threshold: TriggerThreshold) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            disabled: false,
            query,
            frequency: None,
            threshold,
            recipients: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriggerThreshold {
    pub op: TriggerThresholdOp,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerRecipient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: TriggerRecipientType,
    #[serde(default)]
    pub target: String,
}

impl TriggerRecipient {
    pub fn new(kind: TriggerRecipientType, target: impl Into<String>) -> Self {
        Self {
            id: None,
            kind,
            target: target.into(),
        }
    }

    pub fn email(address: impl Into<String>) -> Self {
        Self::new(TriggerRecipientType::Email, address)
    }
}

impl Validate for Trigger {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        self.query.validate().map_err(|e| e.nested("query"))?;
        if !self.threshold.value.is_finite() {
            return Err(ValidationError::new("threshold.value", "must be a finite number"));
        }
        let n = self.query.calculations.len();
        if n != 1 {
            return Err(ValidationError::new(
                "query.calculations",
                format!("a trigger needs exactly one calculation (got {n})"),
            ));
        }
        Ok(())
    }
}

/// `/1/triggers/<dataset>`
#[derive(Debug, Clone)]
pub struct Triggers {
    transport: Arc<Transport>,
}

impl Triggers {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    pub async fn list(&self, dataset: &str) -> Result<Vec<Trigger>> {
        self.transport.get(&ApiPath::dataset("triggers", dataset)).await
    }

    pub async fn get(&self, dataset: &str, id: &str) -> Result<Trigger> {
        self.transport.get(&trigger_path(dataset, id)).await
    }

    pub async fn create(&self, dataset: &str, trigger: &Trigger) -> Result<Trigger> {
        trigger.validate()?;
        self.transport.post(&ApiPath::dataset("triggers", dataset), trigger).await
    }

    pub async fn update(&self, dataset: &str, id: &str, trigger: &Trigger) -> Result<Trigger> {
        trigger.validate()?;
        let mut body = trigger.clone();
        body.id = Some(id.to_string());
        self.transport.put(&trigger_path(dataset, id), &body).await
    }

    pub async fn delete(&self, dataset: &str, id: &str) -> Result<()> {
        self.transport.delete(&trigger_path(dataset, id)).await
    }
}

fn trigger_path(dataset: &str, id: &str) -> ApiPath {
    ApiPath::dataset("triggers", dataset).item(id)
}
