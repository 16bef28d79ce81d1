//! Countdown command.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use serde_json::json;
use storefront_engine::countdown::{CountdownController, CountdownTimer, SystemClock};
use storefront_engine::ids::EventId;

use super::CountdownArgs;
use crate::catalog::find_event;
use crate::context::Context;
use crate::services::FileEventDeletionService;

/// Run the countdown command.
pub async fn run(args: CountdownArgs, ctx: &Context) -> Result<()> {
    let events_path = ctx.events_path();
    let event = find_event(&events_path, &EventId::new(args.event_id))?;
    let controller = CountdownController::new(&event);

    if args.once {
        let state = controller.observe(Utc::now());
        if ctx.output.is_json() {
            ctx.output.json(&json!({ "event_id": event.id, "state": state }));
        } else {
            ctx.output.kv(event.id.as_str(), &state.to_string());
        }
        return Ok(());
    }

    let mut handle = CountdownTimer::spawn(
        controller,
        Arc::new(SystemClock),
        Arc::new(FileEventDeletionService::new(events_path)),
        ctx.config.countdown_config()?,
    );
    let mut states = handle.subscribe();

    let spinner = ctx.output.spinner(&handle.state().to_string());
    let finished = async {
        while states.changed().await.is_ok() {
            let state = *states.borrow_and_update();
            spinner.set_message(state.to_string());
            if state.is_expired() {
                break;
            }
        }
    };

    tokio::select! {
        _ = finished => {
            spinner.finish_and_clear();
            let state = handle.wait_expired().await;
            // Let the single deletion attempt complete before reporting.
            handle.finished().await?;
            if ctx.output.is_json() {
                ctx.output.json(&json!({ "event_id": event.id, "state": state }));
            } else {
                ctx.output.success(&format!("{}: {state}", event.id));
            }
        }
        _ = tokio::signal::ctrl_c() => {
            spinner.finish_and_clear();
            if handle.state().is_expired() {
                // The deletion is already under way; exiting now would drop it.
                handle.finished().await?;
            } else {
                handle.stop();
            }
            ctx.output.warn("Countdown stopped");
        }
    }

    Ok(())
}
