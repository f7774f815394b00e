//! Decode command for the sse-decode CLI.
//!
//! Opens the selected source, decodes it, and prints one JSON object per
//! event on stdout.

use std::io::Write;

use color_eyre::Result;
use futures::Stream;
use futures_util::StreamExt;
use tokio_util::io::ReaderStream;
use tokio_util::sync::CancellationToken;

use crate::cli::args::{DecodeArgs, Source};
use crate::client::EventSourceClient;
use crate::sse::{events_with_config, SseEvent};

/// Run a decode to completion, writing events to stdout.
///
/// Returns the number of events printed.
pub async fn handle_decode_command(args: DecodeArgs, cancel: CancellationToken) -> Result<usize> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.source {
        Source::Stdin => {
            let body = ReaderStream::new(tokio::io::stdin());
            let stream = events_with_config(Some(body), Some(cancel), &args.config);
            write_events(stream, &mut out, args.stop_on_done).await
        }
        Source::Http(request) => {
            let client = EventSourceClient::default().with_config(args.config);
            let stream = client.stream(request, Some(cancel)).await?;
            write_events(stream, &mut out, args.stop_on_done).await
        }
    }
}

/// Write each event as a JSON line, stopping at `[DONE]` when asked.
pub async fn write_events<S, E, W>(mut stream: S, out: &mut W, stop_on_done: bool) -> Result<usize>
where
    S: Stream<Item = std::result::Result<SseEvent, E>> + Unpin,
    E: std::error::Error + Send + Sync + 'static,
    W: Write,
{
    let mut count = 0;
    while let Some(event) = stream.next().await {
        let event = event?;
        if stop_on_done && event.is_done() {
            tracing::debug!("Received [DONE] after {} events", count);
            break;
        }
        serde_json::to_writer(&mut *out, &event)?;
        writeln!(out)?;
        out.flush()?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sse::events;
    use bytes::Bytes;

    fn body(text: &'static str) -> Option<futures::stream::Iter<std::vec::IntoIter<std::io::Result<Bytes>>>> {
        Some(futures::stream::iter(vec![Ok(Bytes::from(text))]))
    }

    #[tokio::test]
    async fn test_write_events_json_lines() {
        let stream = events(body("id: 1\ndata: a\n\nevent: x\ndata: b\n\n"), None);
        let mut out = Vec::new();
        let count = write_events(stream, &mut out, true).await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"data\":\"a\",\"id\":1}\n{\"data\":\"b\",\"event\":\"x\"}\n"
        );
    }

    #[tokio::test]
    async fn test_write_events_stops_at_done() {
        let stream = events(body("data: a\n\ndata: [DONE]\n\ndata: b\n\n"), None);
        let mut out = Vec::new();
        assert_eq!(write_events(stream, &mut out, true).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_write_events_ignore_done() {
        let stream = events(body("data: a\n\ndata: [DONE]\n\ndata: b\n\n"), None);
        let mut out = Vec::new();
        assert_eq!(write_events(stream, &mut out, false).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_write_events_propagates_body_error() {
        let items: Vec<std::io::Result<Bytes>> = vec![
            Ok(Bytes::from("data: a\n\n")),
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed")),
        ];
        let stream = events(Some(futures::stream::iter(items)), None);
        let mut out = Vec::new();
        assert!(write_events(stream, &mut out, true).await.is_err());
        assert!(!out.is_empty());
    }
}
