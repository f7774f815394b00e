//! Response body abstraction.
//!
//! Anything that can hand over a stream of byte chunks (or report that it has
//! no body) can be decoded as an event stream.

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};

use crate::traits::http::{ByteStream, HttpError, StreamResponse};

/// A response-like object that yields its body as a stream of byte chunks.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use sse_decode::traits::ResponseBody;
///
/// let chunks = futures::stream::iter(vec![Ok::<_, std::io::Error>(Bytes::from("data: x\n\n"))]);
/// assert!(Some(chunks).into_body().is_some());
/// ```
pub trait ResponseBody {
    /// A chunk of body bytes.
    type Chunk: AsRef<[u8]>;
    /// Error reported by the underlying transport.
    type Error;
    /// The body stream.
    type Body: Stream<Item = Result<Self::Chunk, Self::Error>> + Unpin;

    /// Take the body, or `None` when the response carries no body.
    fn into_body(self) -> Option<Self::Body>;
}

impl<S, B, E> ResponseBody for Option<S>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
{
    type Chunk = B;
    type Error = E;
    type Body = S;

    fn into_body(self) -> Option<S> {
        self
    }
}

impl ResponseBody for StreamResponse {
    type Chunk = Bytes;
    type Error = HttpError;
    type Body = ByteStream;

    fn into_body(self) -> Option<ByteStream> {
        self.body
    }
}

impl ResponseBody for reqwest::Response {
    type Chunk = Bytes;
    type Error = reqwest::Error;
    type Body = BoxStream<'static, Result<Bytes, reqwest::Error>>;

    fn into_body(self) -> Option<Self::Body> {
        Some(self.bytes_stream().boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_none_has_no_body() {
        let body: Option<futures::stream::Iter<std::vec::IntoIter<Result<Bytes, HttpError>>>> =
            None;
        assert!(body.into_body().is_none());
    }

    #[test]
    fn test_stream_response_body_passthrough() {
        let stream: ByteStream = Box::pin(futures::stream::empty());
        assert!(StreamResponse::new(200, Some(stream)).into_body().is_some());
        assert!(StreamResponse::new(200, None).into_body().is_none());
    }
}
