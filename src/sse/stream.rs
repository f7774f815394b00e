//! Pull-based event stream over a response body
//!
//! `EventStream` owns one decoding session: the body, the UTF-8 decoder, the
//! line splitter and the event assembler. Nothing is read until the consumer
//! polls for the next event, and at most one chunk is read per step.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use futures_util::StreamExt;
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};

use crate::config::DecoderConfig;
use crate::sse::assembler::EventAssembler;
use crate::sse::decoder::Utf8Decoder;
use crate::sse::event::SseEvent;
use crate::sse::lines::LineSplitter;
use crate::traits::ResponseBody;

/// Decode `response` as `text/event-stream` with the default configuration.
///
/// A response without a body yields an empty stream. When `cancel` fires,
/// the body is released and the stream ends without further events.
///
/// # Example
///
/// ```ignore
/// use futures::StreamExt;
/// use sse_decode::events;
///
/// let mut stream = events(response, None);
/// while let Some(event) = stream.next().await {
///     let event = event?;
///     if event.is_done() {
///         break;
///     }
///     println!("{:?}", event.data);
/// }
/// ```
pub fn events<R: ResponseBody>(response: R, cancel: Option<CancellationToken>) -> EventStream<R::Body> {
    events_with_config(response, cancel, &DecoderConfig::default())
}

/// Decode `response` as `text/event-stream` with an explicit configuration.
pub fn events_with_config<R: ResponseBody>(
    response: R,
    cancel: Option<CancellationToken>,
    config: &DecoderConfig,
) -> EventStream<R::Body> {
    EventStream::new(response.into_body(), cancel, config)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Body is still open
    Reading,
    /// Body ended; remaining buffered lines are being drained
    Draining,
    /// No more events will be produced
    Done,
}

/// Lazy sequence of decoded events from a single response body.
///
/// Yields `Ok(event)` for each completed event and `Err(e)` once if the body
/// fails, with `e` passed through untouched. The body is dropped exactly once:
/// on cancellation, [`close`](Self::close), a body error, or end of body.
pub struct EventStream<S> {
    source: Option<S>,
    decoder: Utf8Decoder,
    lines: LineSplitter,
    assembler: EventAssembler,
    cancelled: Option<Pin<Box<WaitForCancellationFutureOwned>>>,
    state: State,
}

impl<S> EventStream<S> {
    fn new(source: Option<S>, cancel: Option<CancellationToken>, config: &DecoderConfig) -> Self {
        let state = if source.is_some() {
            State::Reading
        } else {
            tracing::debug!("Response has no body, event stream is empty");
            State::Draining
        };

        Self {
            source,
            decoder: Utf8Decoder::new(),
            lines: LineSplitter::new(config.allow_cr),
            assembler: EventAssembler::new(),
            cancelled: cancel.map(|token| Box::pin(token.cancelled_owned())),
            state,
        }
    }

    /// Stop decoding and release the body. Later polls yield `None`.
    pub fn close(&mut self) {
        self.release("closed by consumer");
        self.state = State::Done;
    }

    /// Whether the stream has finished and released its body.
    pub fn is_terminated(&self) -> bool {
        self.state == State::Done
    }

    fn release(&mut self, reason: &str) {
        if let Some(source) = self.source.take() {
            drop(source);
            tracing::debug!("Released SSE response body ({})", reason);
        }
    }

    fn poll_cancelled(&mut self, cx: &mut Context<'_>) -> bool {
        match self.cancelled.as_mut() {
            Some(cancelled) => cancelled.as_mut().poll(cx).is_ready(),
            None => false,
        }
    }
}

impl<S, B, E> EventStream<S>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
{
    /// Await the next event. Equivalent to `StreamExt::next`.
    pub async fn next_event(&mut self) -> Option<Result<SseEvent, E>> {
        self.next().await
    }
}

impl<S, B, E> Stream for EventStream<S>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
{
    type Item = Result<SseEvent, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if this.state == State::Done {
                return Poll::Ready(None);
            }

            if this.poll_cancelled(cx) {
                this.release("cancelled");
                this.state = State::Done;
                return Poll::Ready(None);
            }

            if let Some(line) = this.lines.next_line() {
                if let Some(event) = this.assembler.feed_line(&line) {
                    return Poll::Ready(Some(Ok(event)));
                }
                continue;
            }

            if this.state == State::Draining {
                this.assembler.finish();
                this.state = State::Done;
                return Poll::Ready(None);
            }

            let Some(source) = this.source.as_mut() else {
                this.state = State::Draining;
                this.lines.finish();
                continue;
            };

            match source.poll_next_unpin(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(chunk))) => {
                    let text = this.decoder.decode(chunk.as_ref());
                    this.lines.push(&text);
                }
                Poll::Ready(Some(Err(err))) => {
                    this.release("upstream error");
                    this.state = State::Done;
                    return Poll::Ready(Some(Err(err)));
                }
                Poll::Ready(None) => {
                    this.release("end of stream");
                    let tail = this.decoder.finish();
                    this.lines.push(&tail);
                    this.lines.finish();
                    this.state = State::Draining;
                }
            }
        }
    }
}

impl<S> std::fmt::Debug for EventStream<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStream")
            .field("state", &self.state)
            .field("has_source", &self.source.is_some())
            .field("pending_line", &self.lines.pending())
            .field("has_pending_event", &self.assembler.has_pending())
            .finish()
    }
}
