//! Minimal RESP2 codec for the Redis client.
//!
//! Commands are encoded as arrays of bulk strings. Replies are parsed
//! into a [`RespValue`] by type prefix: `+` simple string, `-` error,
//! `:` integer, `$` bulk string, `*` array. Only flat arrays are
//! supported; no reply this client issues can nest.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::kv::StoreError;

/// A single RESP reply value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RespValue {
    Simple(String),
    Error(String),
    Integer(i64),
    /// Bulk string; `None` is the nil reply (`$-1`).
    Bulk(Option<String>),
    /// Flat array; `None` is the nil array (`*-1`).
    Array(Option<Vec<RespValue>>),
}

/// Encode a command as a RESP array of bulk strings.
pub fn encode_command(parts: &[&str]) -> Vec<u8> {
    let mut out = Vec::with_capacity(parts.iter().map(|p| p.len() + 16).sum());
    out.extend_from_slice(format!("*{}\r\n", parts.len()).as_bytes());
    for part in parts {
        out.extend_from_slice(format!("${}\r\n", part.len()).as_bytes());
        out.extend_from_slice(part.as_bytes());
        out.extend_from_slice(b"\r\n");
    }
    out
}

/// Read one reply value from the stream.
pub async fn read_value<R>(reader: &mut R) -> Result<RespValue, StoreError>
where
    R: AsyncBufRead + Unpin,
{
    let (prefix, line) = read_header(reader).await?;
    match prefix {
        b'*' => {
            let len = parse_int(&line)?;
            if len < 0 {
                return Ok(RespValue::Array(None));
            }
            let mut items = Vec::with_capacity(len as usize);
            for _ in 0..len {
                items.push(read_scalar(reader).await?);
            }
            Ok(RespValue::Array(Some(items)))
        }
        _ => read_scalar_body(reader, prefix, line).await,
    }
}

/// Read one non-array value (array elements must be scalar).
async fn read_scalar<R>(reader: &mut R) -> Result<RespValue, StoreError>
where
    R: AsyncBufRead + Unpin,
{
    let (prefix, line) = read_header(reader).await?;
    if prefix == b'*' {
        return Err(StoreError::Protocol("unexpected nested array".into()));
    }
    read_scalar_body(reader, prefix, line).await
}

async fn read_scalar_body<R>(
    reader: &mut R,
    prefix: u8,
    line: String,
) -> Result<RespValue, StoreError>
where
    R: AsyncBufRead + Unpin,
{
    match prefix {
        b'+' => Ok(RespValue::Simple(line)),
        b'-' => Ok(RespValue::Error(line)),
        b':' => Ok(RespValue::Integer(parse_int(&line)?)),
        b'$' => {
            let len = parse_int(&line)?;
            if len < 0 {
                return Ok(RespValue::Bulk(None));
            }
            // Payload plus trailing CRLF.
            let mut buf = vec![0u8; len as usize + 2];
            reader.read_exact(&mut buf).await?;
            if !buf.ends_with(b"\r\n") {
                return Err(StoreError::Protocol("bulk string missing CRLF".into()));
            }
            buf.truncate(len as usize);
            let s = String::from_utf8(buf)
                .map_err(|_| StoreError::Protocol("bulk string is not UTF-8".into()))?;
            Ok(RespValue::Bulk(Some(s)))
        }
        other => Err(StoreError::Protocol(format!(
            "unsupported type prefix '{}'",
            other as char
        ))),
    }
}

/// Read a CRLF-terminated header line, returning the type prefix and the
/// rest of the line.
async fn read_header<R>(reader: &mut R) -> Result<(u8, String), StoreError>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();
    let n = reader.read_until(b'\n', &mut line).await?;
    if n == 0 {
        return Err(StoreError::Protocol("unexpected end of stream".into()));
    }
    if !line.ends_with(b"\r\n") {
        return Err(StoreError::Protocol("header missing CRLF".into()));
    }
    line.truncate(line.len() - 2);
    if line.is_empty() {
        return Err(StoreError::Protocol("empty header line".into()));
    }
    let prefix = line.remove(0);
    let rest = String::from_utf8(line)
        .map_err(|_| StoreError::Protocol("header is not UTF-8".into()))?;
    Ok((prefix, rest))
}

fn parse_int(s: &str) -> Result<i64, StoreError> {
    s.parse::<i64>()
        .map_err(|_| StoreError::Protocol(format!("invalid integer '{s}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn parse(input: &[u8]) -> Result<RespValue, StoreError> {
        let mut reader = tokio::io::BufReader::new(input);
        read_value(&mut reader).await
    }

    #[test]
    fn encode_set_command() {
        let bytes = encode_command(&["SET", "group:1", "https://a.example"]);
        assert_eq!(
            bytes,
            b"*3\r\n$3\r\nSET\r\n$7\r\ngroup:1\r\n$17\r\nhttps://a.example\r\n"
        );
    }

    #[test]
    fn encode_empty_value() {
        let bytes = encode_command(&["SET", "k", ""]);
        assert_eq!(bytes, b"*3\r\n$3\r\nSET\r\n$1\r\nk\r\n$0\r\n\r\n");
    }

    #[tokio::test]
    async fn parse_simple_string() {
        assert_eq!(parse(b"+OK\r\n").await.unwrap(), RespValue::Simple("OK".into()));
    }

    #[tokio::test]
    async fn parse_error_reply() {
        assert_eq!(
            parse(b"-ERR wrong number of arguments\r\n").await.unwrap(),
            RespValue::Error("ERR wrong number of arguments".into())
        );
    }

    #[tokio::test]
    async fn parse_integer_reply() {
        assert_eq!(parse(b":42\r\n").await.unwrap(), RespValue::Integer(42));
    }

    #[tokio::test]
    async fn parse_bulk_string() {
        assert_eq!(
            parse(b"$5\r\nhello\r\n").await.unwrap(),
            RespValue::Bulk(Some("hello".into()))
        );
    }

    #[tokio::test]
    async fn parse_nil_bulk() {
        assert_eq!(parse(b"$-1\r\n").await.unwrap(), RespValue::Bulk(None));
    }

    #[tokio::test]
    async fn parse_flat_array() {
        let value = parse(b"*2\r\n$7\r\ngroup:1\r\n$7\r\ngroup:2\r\n").await.unwrap();
        assert_eq!(
            value,
            RespValue::Array(Some(vec![
                RespValue::Bulk(Some("group:1".into())),
                RespValue::Bulk(Some("group:2".into())),
            ]))
        );
    }

    #[tokio::test]
    async fn parse_empty_array() {
        assert_eq!(parse(b"*0\r\n").await.unwrap(), RespValue::Array(Some(vec![])));
    }

    #[tokio::test]
    async fn truncated_bulk_is_an_error() {
        assert!(parse(b"$5\r\nhel").await.is_err());
    }

    #[tokio::test]
    async fn unknown_prefix_is_an_error() {
        match parse(b"?what\r\n").await {
            Err(StoreError::Protocol(_)) => {}
            other => panic!("expected Protocol error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn nested_array_is_rejected() {
        match parse(b"*1\r\n*1\r\n$1\r\na\r\n").await {
            Err(StoreError::Protocol(msg)) => assert!(msg.contains("nested")),
            other => panic!("expected Protocol error, got {other:?}"),
        }
    }
}
