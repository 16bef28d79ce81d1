//! Cart commands.

use anyhow::Result;
use dialoguer::Confirm;
use serde_json::json;
use storefront_engine::cart::{CartLedger, QuantityChange};
use storefront_engine::ids::ProductId;
use storefront_engine::notify::RecordingSink;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CartCommand::Add { product_id, qty } => add(ProductId::new(product_id), qty, ctx),
        CartCommand::Remove { product_id, yes } => remove(ProductId::new(product_id), yes, ctx),
        CartCommand::Inc { product_id } => increment(ProductId::new(product_id), ctx),
        CartCommand::Dec { product_id } => decrement(ProductId::new(product_id), ctx),
        CartCommand::Show => show(ctx),
    }
}

/// Load the session's cart. An empty session starts in the configured currency.
pub(crate) fn load(ctx: &Context) -> Result<(CartLedger, u64)> {
    let store = ctx.store()?;
    let session = ctx.session()?;
    let (snapshot, version) = store.load_cart_versioned(&session)?;
    let cart = if snapshot.is_empty() {
        CartLedger::new(ctx.config.currency()?)
    } else {
        CartLedger::rehydrate(snapshot)?
    };
    Ok((cart, version))
}

fn save(cart: &CartLedger, version: u64, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let session = ctx.session()?;
    let version = store.save_cart_if_version(&session, cart.snapshot(), version)?;
    ctx.output.debug(&format!("Saved cart for {session} (version {version})"));
    Ok(())
}

fn add(product_id: ProductId, qty: u32, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let product = catalog.find(&product_id)?;
    let (mut cart, version) = load(ctx)?;
    let sink = RecordingSink::new();

    let result = cart.add_item(product, qty, &sink).map(|line| line.qty);
    ctx.output.notices(&sink.take());

    match result {
        Ok(added) => {
            save(&cart, version, ctx)?;
            if ctx.output.is_json() {
                ctx.output.json(&json!({ "product_id": product_id, "qty": added }));
            }
            Ok(())
        }
        // Already reported to the shopper; nothing changed.
        Err(e) if e.is_policy_rejection() => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn remove(product_id: ProductId, yes: bool, ctx: &Context) -> Result<()> {
    let (mut cart, version) = load(ctx)?;

    let Some(line) = cart.line(&product_id) else {
        ctx.output.warn(&format!("{product_id} is not in the cart"));
        return Ok(());
    };

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove {} from the cart?", line.name))
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    cart.remove_item(&product_id);
    save(&cart, version, ctx)?;
    ctx.output.success(&format!("Removed {product_id}"));
    Ok(())
}

fn increment(product_id: ProductId, ctx: &Context) -> Result<()> {
    let (mut cart, version) = load(ctx)?;
    let sink = RecordingSink::new();
    let change = cart.increment_qty(&product_id, &sink);
    ctx.output.notices(&sink.take());
    finish_quantity_change(&product_id, change, &cart, version, ctx)
}

fn decrement(product_id: ProductId, ctx: &Context) -> Result<()> {
    let (mut cart, version) = load(ctx)?;
    let change = cart.decrement_qty(&product_id);
    finish_quantity_change(&product_id, change, &cart, version, ctx)
}

fn finish_quantity_change(
    product_id: &ProductId,
    change: QuantityChange,
    cart: &CartLedger,
    version: u64,
    ctx: &Context,
) -> Result<()> {
    match change {
        QuantityChange::Updated(qty) => {
            save(cart, version, ctx)?;
            ctx.output.success(&format!("{product_id} quantity is now {qty}"));
        }
        QuantityChange::StockLimited(qty) => {
            ctx.output.debug(&format!("{product_id} stays at {qty}"));
        }
        QuantityChange::AtFloor => {
            ctx.output
                .info(&format!("{product_id} is at quantity 1; use `cart remove` to drop it"));
        }
        QuantityChange::NotInCart => {
            ctx.output.warn(&format!("{product_id} is not in the cart"));
        }
    }

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product_id": product_id,
            "qty": cart.line(product_id).map(|l| l.qty),
            "updated": change.is_updated(),
        }));
    }
    Ok(())
}

fn show(ctx: &Context) -> Result<()> {
    let (cart, _) = load(ctx)?;
    let summary = cart.summary()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "summary": summary, "lines": cart.lines() }));
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({})", summary.label()));
    if summary.is_empty() {
        ctx.output.info("Cart Items is empty!");
        return Ok(());
    }

    let widths = [12, 28, 5, 12, 12];
    ctx.output
        .table_row(&["ID", "NAME", "QTY", "PRICE", "LINE TOTAL"], &widths);
    for line in cart.lines() {
        let qty = format!("{}/{}", line.qty, line.stock);
        let price = line.discount_price.display();
        let total = line.line_total()?.display();
        ctx.output.table_row(
            &[line.product_id.as_str(), &line.name, &qty, &price, &total],
            &widths,
        );
    }

    if let Some(total) = summary.total() {
        ctx.output.kv("Total", &total.display());
    }
    Ok(())
}
