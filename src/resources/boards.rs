use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::query::ops::wire_enum;
use crate::query::{QuerySpec, Validate, ValidationError};
use crate::transport::{sanitize_dataset, ApiPath, Transport};

const BOARDS: &str = "boards";

wire_enum! {
    pub enum BoardStyle : exact {
        List => "list",
        Visual => "visual",
    }
}

wire_enum! {
    /// How a single query is rendered on a board.
    pub enum BoardQueryStyle : exact {
        Graph => "graph",
        Table => "table",
        Combo => "combo",
    }
}

/// A dashboard: an ordered collection of queries, each bound to a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Assigned by the server on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<BoardStyle>,
    #[serde(default)]
    pub queries: Vec<BoardQuery>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_style: Option<BoardQueryStyle>,
    pub dataset: String,
    pub query: QuerySpec,
}

impl BoardQuery {
    pub fn new(dataset: impl Into<String>, query: QuerySpec) -> Self {
        Self {
            dataset: dataset.into(),
            query,
            ..Self::default()
        }
    }
}

impl Validate for BoardQuery {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        self.query.validate().map_err(|e| e.nested("query"))
    }
}

impl Validate for Board {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        for (i, query) in self.queries.iter().enumerate() {
            query.validate().map_err(|e| e.nested(&format!("queries[{i}]")))?;
        }
        Ok(())
    }
}

/// `/1/boards`. Boards are team-wide, not dataset-scoped.
#[derive(Debug, Clone)]
pub struct Boards {
    transport: Arc<Transport>,
}

impl Boards {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> Result<Vec<Board>> {
        self.transport.get(&ApiPath::collection(BOARDS)).await
    }

    pub async fn get(&self, id: &str) -> Result<Board> {
        self.transport.get(&board_path(id)).await
    }

    pub async fn create(&self, board: &Board) -> Result<Board> {
        let body = prepare(board, None)?;
        self.transport.post(&ApiPath::collection(BOARDS), &body).await
    }

    /// Full replacement of the board stored under `id`.
    pub async fn update(&self, id: &str, board: &Board) -> Result<Board> {
        let body = prepare(board, Some(id))?;
        self.transport.put(&board_path(id), &body).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.transport.delete(&board_path(id)).await
    }
}

fn board_path(id: &str) -> ApiPath {
    ApiPath::collection(BOARDS).item(id)
}

/// Validate, then build the outgoing body: dataset references in slug form,
/// `id` matching the path on update.
fn prepare(board: &Board, id: Option<&str>) -> Result<Board> {
    board.validate()?;

    let mut body = board.clone();
    if let Some(id) = id {
        body.id = Some(id.to_string());
    }
    for query in &mut body.queries {
        query.dataset = sanitize_dataset(&query.dataset);
    }
    Ok(body)
}
