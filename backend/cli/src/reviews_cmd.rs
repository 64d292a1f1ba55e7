//! `reviewlens reviews <ID>`

use std::io::Write;

use anyhow::{anyhow, Result};

use reviewlens_core::{ProductId, ReviewSet};
use reviewlens_session::reviews_query;

use crate::context::AppContext;
use crate::terminal_output::{
    format_rating_header, format_review_date, star_bar, styled, BOLD, DIM,
};

pub async fn run(ctx: &AppContext, product_id: ProductId, out: &mut impl Write) -> Result<()> {
    let reviews = load_reviews(ctx, product_id).await?;
    out.write_all(render_reviews(&reviews).as_bytes())?;
    Ok(())
}

/// Fetch reviews through the retrying query.
pub async fn load_reviews(ctx: &AppContext, product_id: ProductId) -> Result<ReviewSet> {
    let query = reviews_query(ctx.backend.clone(), product_id, ctx.retry.clone());
    let state = query.get().await;
    match (state.data, state.error) {
        (_, Some(error)) => Err(anyhow!("Could not load reviews: {error}")),
        (Some(reviews), None) => Ok(reviews),
        (None, None) => Ok(ReviewSet::default()),
    }
}

pub fn render_reviews(set: &ReviewSet) -> String {
    let Some(average) = set.average_rating() else {
        return "No reviews yet.\n".to_string();
    };

    let mut out = String::new();
    out.push_str(&styled(BOLD, &format_rating_header(average, set.reviews.len())));
    out.push_str("\n\n");

    if let Some(summary) = set.summary.as_deref().filter(|s| !s.trim().is_empty()) {
        out.push_str(&styled(DIM, "Summary: "));
        out.push_str(summary.trim());
        out.push_str("\n\n");
    }

    for review in &set.reviews {
        out.push_str(&format!(
            "{} {}  {}\n",
            star_bar(review.rating),
            styled(BOLD, &review.author),
            styled(DIM, &format_review_date(&review.created_at)),
        ));
        out.push_str(review.content.trim());
        out.push_str("\n\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal_output::strip_ansi;
    use crate::testing::{review, FakeBackend};

    #[tokio::test]
    async fn shows_header_and_each_review() {
        let ctx = FakeBackend {
            reviews: vec![
                review(1, "Ana", 5, 7, "Boils fast."),
                review(2, "Ben", 4, 9, "Bit loud."),
                review(3, "Cy", 4, 11, "Nice handle."),
            ],
            ..FakeBackend::default()
        }
        .into_context();

        let mut out = Vec::new();
        run(&ctx, ProductId::new(1).unwrap(), &mut out).await.unwrap();
        let text = strip_ansi(&String::from_utf8(out).unwrap());
        assert!(text.starts_with("4.3 / 5 (3 reviews)"));
        assert!(text.contains("★★★★★ Ana  Mar 7, 2024"));
        assert!(text.contains("Bit loud."));
        assert!(!text.contains("Summary:"));
    }

    #[test]
    fn cached_summary_is_shown() {
        let set = ReviewSet {
            reviews: vec![review(1, "Ana", 3, 1, "Fine.")],
            summary: Some("Mixed feelings.".into()),
        };
        let text = strip_ansi(&render_reviews(&set));
        assert!(text.contains("Summary: Mixed feelings."));
    }

    #[test]
    fn no_reviews() {
        assert_eq!(render_reviews(&ReviewSet::default()), "No reviews yet.\n");
    }
}
