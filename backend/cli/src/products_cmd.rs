//! `reviewlens products`

use std::io::Write;

use anyhow::{anyhow, Result};

use reviewlens_core::Product;
use reviewlens_session::products_query;

use crate::context::AppContext;
use crate::terminal_output::{format_price, render_table, Column};

pub async fn run(ctx: &AppContext, out: &mut impl Write) -> Result<()> {
    let query = products_query(ctx.backend.clone(), ctx.retry.clone());
    let state = query.get().await;
    if let Some(error) = state.error {
        return Err(anyhow!("Could not load products: {error}"));
    }
    let products = state.data.unwrap_or_default();
    out.write_all(render_products(&products).as_bytes())?;
    Ok(())
}

pub fn render_products(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products found.\n".to_string();
    }
    let columns = vec![
        Column::right("ID"),
        Column::left("Name").max_width(40),
        Column::right("Price"),
        Column::left("Description").max_width(60),
    ];
    let rows: Vec<Vec<String>> = products
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.name.clone(),
                format_price(p.price),
                p.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    render_table(&columns, &rows)
}
