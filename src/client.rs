use std::sync::Arc;

use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::resources::{Boards, Columns, Markers, Queries, Triggers};
use crate::transport::Transport;

/// Entry point. Every resource client shares one [`Transport`], so a single
/// `Client` (or any clone of it) can serve concurrent tasks; nothing is
/// mutated after construction.
#[derive(Debug, Clone)]
pub struct Client {
    pub boards: Boards,
    pub columns: Columns,
    pub markers: Markers,
    pub queries: Queries,
    pub triggers: Triggers,
}

impl Client {
    /// Merge `config` onto the defaults and build the client. Fails with
    /// `Error::Config` before any network activity when the API key is
    /// blank or the URL does not parse.
    pub fn new(config: Config) -> Result<Self> {
        let cfg = Config::default().merge(&config);
        if cfg.api_key.trim().is_empty() {
            return Err(Error::Config("api_key must be configured".to_string()));
        }

        let transport = Arc::new(Transport::new(&cfg)?);
        debug!(api_url = %cfg.api_url, user_agent = %cfg.user_agent, "honeycomb client ready");

        Ok(Self {
            boards: Boards::new(transport.clone()),
            columns: Columns::new(transport.clone()),
            markers: Markers::new(transport.clone()),
            queries: Queries::new(transport.clone()),
            triggers: Triggers::new(transport),
        })
    }

    /// `Client::new(Config::from_env())`
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_API_URL;
    use crate::query::{Calculation, QuerySpec};
    use crate::resources::{Board, BoardQuery};
    use crate::testing::MockServer;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn empty_api_key_is_a_configuration_error() {
        match Client::new(Config::default()) {
            Err(Error::Config(msg)) => assert!(msg.contains("api_key"), "{msg}"),
            other => panic!("expected Config error, got {other:?}"),
        }
        assert!(matches!(Client::new(Config::new("   ")), Err(Error::Config(_))));
    }

    #[test]
    fn unparsable_url_is_a_configuration_error() {
        let cfg = Config::new("key").with_api_url("::not-a-url::");
        assert!(matches!(Client::new(cfg), Err(Error::Config(_))));
    }

    #[test]
    fn blank_overrides_fall_back_to_defaults() {
        let cfg = Config {
            api_key: "key".to_string(),
            api_url: String::new(),
            user_agent: String::new(),
        };
        let merged = Config::default().merge(&cfg);
        assert_eq!(merged.api_url, DEFAULT_API_URL);
        assert!(Client::new(cfg).is_ok());
    }

    #[test]
    fn client_is_shareable_across_threads() {
        assert_send_sync::<Client>();
    }

    #[tokio::test]
    async fn concurrent_calls_share_one_client() {
        let server = MockServer::collection("/1/boards").await;
        let client = Arc::new(server.client());

        let mut handles = Vec::new();
        for i in 0..8 {
            let client = client.clone();
            handles.push(tokio::spawn(async move {
                let board = Board {
                    name: format!("board {i}"),
                    queries: vec![BoardQuery::new("ds", QuerySpec::new().calculation(Calculation::count()))],
                    ..Board::default()
                };
                client.boards.create(&board).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(client.boards.list().await.unwrap().len(), 8);
        assert_eq!(server.requests().len(), 9);
    }
}
