//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, StorefrontConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { path, force } => init_config(&path, force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    let config = &ctx.config;
    ctx.output.header("Current Configuration");

    ctx.output.info("[store]");
    ctx.output.kv("data_dir", &config.store.data_dir);
    if let Some(ref session) = config.store.session {
        ctx.output.kv("session", session);
    }

    ctx.output.info("[catalog]");
    ctx.output.kv("products", &config.catalog.products);
    ctx.output.kv("events", &config.catalog.events);
    ctx.output.kv("orders", &config.catalog.orders);

    ctx.output.info("[checkout]");
    ctx.output
        .kv("allow_empty_cart", &config.checkout.allow_empty_cart.to_string());

    ctx.output.info("[countdown]");
    ctx.output
        .kv("tick_interval_ms", &config.countdown.tick_interval_ms.to_string());

    ctx.output.info("[logging]");
    ctx.output.kv("level", &config.logging.level.to_string());
    ctx.output.kv("format", &format!("{:?}", config.logging.format).to_lowercase());

    ctx.output.info("[currency]");
    ctx.output.kv("code", &config.currency.code);

    Ok(())
}

fn init_config(path: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(path);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if config_path.extension().and_then(|e| e.to_str()) == Some("json") {
        StorefrontConfig::default().save(&config_path)?;
    } else {
        fs::write(&config_path, generate_default_config())?;
    }
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
