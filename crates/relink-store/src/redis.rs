//! Redis-backed [`KvStore`] implementation.
//!
//! Holds one lazily-opened connection behind a `tokio::sync::Mutex`. Any
//! I/O or protocol failure drops the connection so the next operation
//! reconnects. No retries happen here; failures surface to the caller.

use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, BufStream};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

use crate::kv::{KvStore, StoreError};
use crate::resp::{encode_command, read_value, RespValue};

const DEFAULT_PORT: u16 = 6379;

/// Parsed connection endpoint from a `redis://` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Endpoint {
    addr: String,
    password: Option<String>,
    db: Option<u32>,
}

impl Endpoint {
    fn parse(redis_url: &str) -> Result<Self, StoreError> {
        let url = Url::parse(redis_url)
            .map_err(|e| StoreError::Endpoint(format!("{redis_url}: {e}")))?;

        if url.scheme() != "redis" {
            return Err(StoreError::Endpoint(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }

        let host = url
            .host_str()
            .ok_or_else(|| StoreError::Endpoint("missing host".into()))?;
        let port = url.port().unwrap_or(DEFAULT_PORT);

        let password = url.password().map(str::to_string);

        let db = match url.path().trim_start_matches('/') {
            "" => None,
            path => Some(
                path.parse::<u32>()
                    .map_err(|_| StoreError::Endpoint(format!("invalid database '{path}'")))?,
            ),
        };

        Ok(Self {
            addr: format!("{host}:{port}"),
            password,
            db,
        })
    }
}

/// A RESP2 client for a single Redis server.
pub struct RedisStore {
    endpoint: Endpoint,
    conn: Mutex<Option<BufStream<TcpStream>>>,
}

impl RedisStore {
    /// Create a store for the given `redis://[:password@]host[:port][/db]`
    /// endpoint. Does not connect until the first operation.
    pub fn from_url(redis_url: &str) -> Result<Self, StoreError> {
        Ok(Self {
            endpoint: Endpoint::parse(redis_url)?,
            conn: Mutex::new(None),
        })
    }

    /// Open a connection and run the AUTH/SELECT handshake.
    async fn connect(&self) -> Result<BufStream<TcpStream>, StoreError> {
        debug!(addr = %self.endpoint.addr, "connecting to store");
        let stream = TcpStream::connect(&self.endpoint.addr).await?;
        let mut conn = BufStream::new(stream);

        if let Some(password) = &self.endpoint.password {
            exchange(&mut conn, &["AUTH", password]).await?;
        }
        if let Some(db) = self.endpoint.db {
            exchange(&mut conn, &["SELECT", &db.to_string()]).await?;
        }

        Ok(conn)
    }

    /// Send one command and read its reply, reconnecting lazily.
    async fn command(&self, parts: &[&str]) -> Result<RespValue, StoreError> {
        let mut guard = self.conn.lock().await;

        let mut conn = match guard.take() {
            Some(conn) => conn,
            None => self.connect().await?,
        };

        match exchange(&mut conn, parts).await {
            Ok(value) => {
                *guard = Some(conn);
                Ok(value)
            }
            Err(e) => {
                // Connection state is unknown after a failure; leave the
                // slot empty so the next operation reconnects.
                warn!(error = %e, "store command failed, dropping connection");
                Err(e)
            }
        }
    }
}

/// Write one command and read one reply. Server error replies become
/// [`StoreError::Server`].
async fn exchange(
    conn: &mut BufStream<TcpStream>,
    parts: &[&str],
) -> Result<RespValue, StoreError> {
    conn.write_all(&encode_command(parts)).await?;
    conn.flush().await?;

    match read_value(conn).await? {
        RespValue::Error(msg) => Err(StoreError::Server(msg)),
        value => Ok(value),
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.command(&["SET", key, value]).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.command(&["GET", key]).await? {
            RespValue::Bulk(value) => Ok(value),
            other => Err(StoreError::Protocol(format!(
                "unexpected GET reply: {other:?}"
            ))),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.command(&["DEL", key]).await?;
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        match self.command(&["KEYS", pattern]).await? {
            RespValue::Array(Some(items)) => items
                .into_iter()
                .map(|item| match item {
                    RespValue::Bulk(Some(key)) => Ok(key),
                    other => Err(StoreError::Protocol(format!(
                        "unexpected KEYS element: {other:?}"
                    ))),
                })
                .collect(),
            RespValue::Array(None) => Ok(Vec::new()),
            other => Err(StoreError::Protocol(format!(
                "unexpected KEYS reply: {other:?}"
            ))),
        }
    }
}
