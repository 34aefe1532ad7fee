use std::time::Duration;

use anyhow::{Context, Result, bail};
use ranged_stream::{
    CancellationToken, ReqwestFetcher, SeekOrigin, SegmentedRangeStream, StreamError,
    StreamOptions,
};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::info;

use super::App;

const COPY_BUFFER: usize = 64 * 1024;

pub async fn run(app: App) -> Result<()> {
    let fetcher = app
        .headers
        .iter()
        .fold(ReqwestFetcher::new(), |f, (k, v)| f.header(k, v));

    let length = match app.length {
        Some(length) => length,
        None => fetcher
            .content_length(&app.url)
            .await
            .with_context(|| format!("failed to query length of {}", app.url))?
            .context("server did not report Content-Length; pass --length")?,
    };

    let options = StreamOptions::default()
        .segment_size(app.segment_size)
        .retry_limit(app.retries)
        .retry_backoff(Duration::from_millis(app.backoff_ms));
    let mut stream = SegmentedRangeStream::new(fetcher, app.url.as_str(), length, options)?;

    let offset = i64::try_from(app.offset).context("offset too large")?;
    stream.seek(offset, SeekOrigin::Begin)?;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });

    let mut out: Box<dyn AsyncWrite + Unpin + Send> = match &app.output {
        Some(path) => Box::new(
            tokio::fs::File::create(path)
                .await
                .with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(tokio::io::stdout()),
    };

    let copied = copy(&mut stream, &mut out, app.limit, &cancel).await;
    out.flush().await?;
    stream.close();

    let copied = copied?;
    info!(bytes = copied, url = %app.url, "copy finished");
    Ok(())
}

/// Copy from the stream until end of stream or `limit` bytes.
async fn copy(
    stream: &mut SegmentedRangeStream<ReqwestFetcher>,
    out: &mut (dyn AsyncWrite + Unpin + Send),
    limit: Option<u64>,
    cancel: &CancellationToken,
) -> Result<u64> {
    let mut buf = vec![0u8; COPY_BUFFER];
    let mut copied = 0u64;

    loop {
        let want = limit.map_or(buf.len(), |l| {
            usize::try_from(l - copied).map_or(buf.len(), |r| r.min(buf.len()))
        });
        if want == 0 {
            break;
        }

        let result = stream.read_cancellable(&mut buf[..want], cancel).await;
        let n = match result {
            Ok(n) => n,
            Err(StreamError::Cancelled) => bail!("interrupted after {copied} bytes"),
            Err(e) => {
                return Err(e).with_context(|| format!("read failed at byte {}", stream.position()));
            }
        };
        if n == 0 {
            break;
        }

        out.write_all(&buf[..n]).await?;
        copied += n as u64;
    }

    Ok(copied)
}
