//! Wishlist commands.

use anyhow::Result;
use serde_json::json;
use storefront_engine::ids::ProductId;
use storefront_engine::wishlist::WishlistLedger;

use super::{WishlistArgs, WishlistCommand};
use crate::context::Context;

/// Run the wishlist command.
pub async fn run(args: WishlistArgs, ctx: &Context) -> Result<()> {
    match args.command {
        WishlistCommand::Add { product_id } => add(ProductId::new(product_id), ctx),
        WishlistCommand::Remove { product_id } => remove(ProductId::new(product_id), ctx),
        WishlistCommand::Toggle { product_id } => toggle(ProductId::new(product_id), ctx),
        WishlistCommand::Show => show(ctx),
    }
}

fn load(ctx: &Context) -> Result<(WishlistLedger, u64)> {
    let (snapshot, version) = ctx.store()?.load_wishlist_versioned(&ctx.session()?)?;
    Ok((WishlistLedger::rehydrate(snapshot)?, version))
}

fn save(wishlist: &WishlistLedger, version: u64, ctx: &Context) -> Result<()> {
    ctx.store()?
        .save_wishlist_if_version(&ctx.session()?, wishlist.snapshot(), version)?;
    Ok(())
}

fn report(product_id: &ProductId, saved: bool, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&json!({ "product_id": product_id, "saved": saved }));
    }
}

fn add(product_id: ProductId, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let product = catalog.find(&product_id)?;
    let (mut wishlist, version) = load(ctx)?;

    if wishlist.add(product) {
        save(&wishlist, version, ctx)?;
        ctx.output.success(&format!("Saved {} for later", product.name));
    } else {
        ctx.output.info(&format!("{} is already in the wishlist", product.name));
    }
    report(&product_id, true, ctx);
    Ok(())
}

fn remove(product_id: ProductId, ctx: &Context) -> Result<()> {
    let (mut wishlist, version) = load(ctx)?;

    if wishlist.remove(&product_id) {
        save(&wishlist, version, ctx)?;
        ctx.output.success(&format!("Removed {product_id} from the wishlist"));
    } else {
        ctx.output.warn(&format!("{product_id} is not in the wishlist"));
    }
    report(&product_id, false, ctx);
    Ok(())
}

fn toggle(product_id: ProductId, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let product = catalog.find(&product_id)?;
    let (mut wishlist, version) = load(ctx)?;

    let saved = wishlist.toggle(product);
    save(&wishlist, version, ctx)?;
    if saved {
        ctx.output.success(&format!("Saved {} for later", product.name));
    } else {
        ctx.output.success(&format!("Removed {} from the wishlist", product.name));
    }
    report(&product_id, saved, ctx);
    Ok(())
}

fn show(ctx: &Context) -> Result<()> {
    let (wishlist, _) = load(ctx)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "entries": wishlist.entries() }));
        return Ok(());
    }

    ctx.output.header(&format!("Wishlist ({} items)", wishlist.len()));
    if wishlist.is_empty() {
        ctx.output.info("Wishlist Items is empty!");
        return Ok(());
    }
    for entry in wishlist.entries() {
        let availability = if entry.stock == 0 { "out of stock" } else { "in stock" };
        ctx.output.list_item(&format!(
            "{} {} ({}, {})",
            entry.product_id,
            entry.name,
            entry.discount_price.display(),
            availability
        ));
    }
    Ok(())
}
