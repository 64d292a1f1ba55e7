//! `reviewlens summarize <ID> [--blocking]`
//!
//! Streams the summary into stdout as fragments arrive. Output is driven off
//! the session's watch channel: each update prints only the text appended
//! since the last one.

use std::io::Write;

use anyhow::{anyhow, bail, Result};
use futures::StreamExt;
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

use reviewlens_core::ProductId;
use reviewlens_session::{SessionRegistry, SummaryController, SummaryState};

use crate::context::AppContext;
use crate::reviews_cmd::load_reviews;
use crate::terminal_output::{note_warn, stream_write};

pub async fn run(
    ctx: &AppContext,
    product_id: ProductId,
    blocking: bool,
    out: &mut impl Write,
) -> Result<()> {
    let reviews = load_reviews(ctx, product_id).await?;
    if reviews.is_empty() {
        bail!("No reviews available to summarize");
    }

    if blocking {
        let summary = ctx.backend.summarize_reviews(product_id).await?;
        writeln!(out, "{}", summary.trim_end())?;
        return Ok(());
    }

    let registry = SessionRegistry::new(ctx.backend.clone(), ctx.controller_options);
    let session = registry.bind(product_id).await;
    let result = follow_summary(&session, out).await;
    registry.unbind(product_id).await;

    let final_state = result?;
    if let Some(error) = final_state.last_error {
        if !final_state.summary_text.is_empty() {
            note_warn("Summary stream ended early; output above is partial.");
        }
        return Err(anyhow!(error));
    }
    Ok(())
}

/// Start a generation and echo it to `out` until it stops loading.
async fn follow_summary(session: &SummaryController, out: &mut impl Write) -> Result<SummaryState> {
    let mut updates = WatchStream::new(session.subscribe());
    let generation = session.start();

    let mut printed = 0usize;
    let mut last = session.snapshot();
    while let Some(state) = updates.next().await {
        if state.summary_text.len() > printed {
            stream_write(out, &state.summary_text[printed..])?;
            printed = state.summary_text.len();
        }
        let finished = state.generation.is_some() && !state.is_loading;
        last = state;
        if finished {
            break;
        }
    }
    generation.await?;

    if printed > 0 && !last.summary_text.ends_with('\n') {
        writeln!(out)?;
    }
    debug!(product_id = %session.product_id(), bytes = printed, "Summary printed");
    Ok(last)
}
