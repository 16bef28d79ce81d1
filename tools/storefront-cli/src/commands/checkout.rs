//! Checkout command.

use anyhow::{Context as _, Result};
use dialoguer::{Confirm, Input};
use serde_json::json;
use storefront_engine::checkout::{
    Address, CheckoutOrchestrator, Customer, PaymentMethod, ShippingInfo,
};
use storefront_engine::notify::RecordingSink;

use super::{CheckoutArgs, PaymentChoice};
use crate::context::Context;
use crate::services::FileOrderService;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let (cart, _) = super::cart::load(ctx)?;
    let snapshot = cart.snapshot();
    let interactive = !args.yes && !ctx.output.is_json();

    let payment = match args.payment {
        PaymentChoice::Cod => PaymentMethod::CashOnDelivery,
        PaymentChoice::Gateway => {
            PaymentMethod::gateway(args.reference.clone().unwrap_or_default(), args.status.clone())
        }
    };

    let mut address = Address::new(
        field(args.address1, "Address", interactive)?,
        field(args.city, "City", interactive)?,
        field(args.country, "Country", interactive)?,
        field(args.zip, "Zip code", interactive)?,
    );
    address.address2 = args.address2;
    let mut shipping = ShippingInfo::new(address);
    shipping.phone_number = args.phone;

    let mut customer = Customer::new(args.user_id, args.name);
    customer.email = args.email;

    if interactive {
        ctx.output.header("Checkout");
        ctx.output.kv("Items", &cart.total_items().to_string());
        ctx.output.kv("Total", &snapshot.total_price()?.display());
        ctx.output.kv("Payment", payment.tag());
        ctx.output.kv("Ship to", &shipping.address.one_line());

        let confirmed = Confirm::new()
            .with_prompt("Place order?")
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    let orchestrator = CheckoutOrchestrator::with_policy(
        FileOrderService::new(ctx.orders_path()),
        ctx.config.checkout,
    );
    let sink = RecordingSink::new();

    let spinner = ctx.output.spinner("Placing order...");
    let result = orchestrator
        .submit(&snapshot, payment, shipping, customer, &sink)
        .await;
    spinner.finish_and_clear();
    ctx.output.notices(&sink.take());

    let outcome = result.context("Checkout failed")?;
    ctx.store()?.clear_cart(&ctx.session()?)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "outcome": outcome }));
    } else {
        ctx.output.kv("Next", outcome.route());
    }
    Ok(())
}

/// Use the flag value, or ask for it when running interactively.
fn field(value: Option<String>, prompt: &str, interactive: bool) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None if interactive => Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
        None => Ok(String::new()),
    }
}
