//! Storage and reader wrappers that cancel a run partway through a read.

use crate::storage::ScratchStorage;
use async_trait::async_trait;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio_util::sync::CancellationToken;

/// Reader that cancels `cancel` once `remaining` bytes have passed through it.
pub(crate) struct CancelAfter<R> {
    inner: R,
    remaining: usize,
    cancel: CancellationToken,
}

impl<R> CancelAfter<R> {
    pub(crate) fn new(inner: R, bytes: usize, cancel: CancellationToken) -> Self {
        Self {
            inner,
            remaining: bytes,
            cancel,
        }
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for CancelAfter<R> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let before = buf.filled().len();
        let poll = Pin::new(&mut this.inner).poll_read(cx, buf);
        if let Poll::Ready(Ok(())) = &poll {
            this.remaining = this.remaining.saturating_sub(buf.filled().len() - before);
            if this.remaining == 0 {
                this.cancel.cancel();
            }
        }
        poll
    }
}

/// Storage whose streaming reader (the second one opened) cancels the run after `bytes`.
pub(crate) struct CancellingStorage<S> {
    inner: S,
    bytes: usize,
    cancel: CancellationToken,
    opened: usize,
}

impl<S> CancellingStorage<S> {
    pub(crate) fn new(inner: S, bytes: usize, cancel: CancellationToken) -> Self {
        Self {
            inner,
            bytes,
            cancel,
            opened: 0,
        }
    }
}

impl<S: ScratchStorage> AsyncWrite for CancellingStorage<S> {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.get_mut().inner).poll_write(cx, buf)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_shutdown(cx)
    }
}

#[async_trait]
impl<S: ScratchStorage> ScratchStorage for CancellingStorage<S> {
    type Reader = CancelAfter<S::Reader>;

    fn describe(&self) -> String {
        self.inner.describe()
    }

    async fn rewind(&mut self) -> io::Result<()> {
        self.inner.rewind().await
    }

    async fn open_reader(&mut self) -> io::Result<Self::Reader> {
        self.opened += 1;
        let reader = self.inner.open_reader().await?;
        // The snapshot read passes through untouched
        let bytes = if self.opened == 1 { usize::MAX } else { self.bytes };
        Ok(CancelAfter::new(reader, bytes, self.cancel.clone()))
    }
}
