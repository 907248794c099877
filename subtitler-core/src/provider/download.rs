// Subtitle download stream

use bytes::{Bytes, BytesMut};
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::ProviderError;

/// An open subtitle download.
///
/// The body is streamed from the upstream response and has not been read.
pub struct SubtitleDownload {
    /// Synthesized `<id>.<ext>` name
    pub filename: String,
    /// Upstream `Content-Type`, verbatim
    pub content_type: String,
    pub body: BoxStream<'static, Result<Bytes, ProviderError>>,
}

impl SubtitleDownload {
    /// Wrap an upstream response whose status was already checked.
    #[must_use]
    pub fn from_response(filename: String, content_type: String, response: reqwest::Response) -> Self {
        Self {
            filename,
            content_type,
            body: response.bytes_stream().map_err(ProviderError::from).boxed(),
        }
    }

    /// Build from an in-memory body.
    #[must_use]
    pub fn from_bytes(filename: impl Into<String>, content_type: impl Into<String>, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            body: futures::stream::once(async move { Ok(body) }).boxed(),
        }
    }

    /// Read the whole body into memory.
    pub async fn bytes(self) -> Result<Bytes, ProviderError> {
        let buf = self
            .body
            .try_fold(BytesMut::new(), |mut buf, chunk| async move {
                buf.extend_from_slice(&chunk);
                Ok(buf)
            })
            .await?;
        Ok(buf.freeze())
    }

    /// Copy the body into `writer`, returning the number of bytes written.
    pub async fn write_to<W>(mut self, writer: &mut W) -> Result<u64, ProviderError>
    where
        W: AsyncWrite + Unpin,
    {
        let mut written = 0u64;
        while let Some(chunk) = self.body.next().await {
            let chunk = chunk?;
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        writer.flush().await?;
        Ok(written)
    }
}

impl std::fmt::Debug for SubtitleDownload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubtitleDownload")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}
