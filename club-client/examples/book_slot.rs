// club-client/examples/book_slot.rs
// Book one slot from the command line

use anyhow::{Context, bail};
use chrono::{NaiveDate, NaiveTime};
use club_client::booking::{BookingHoldController, ConfirmOutcome};
use club_client::logger::init_logger;
use club_client::notify::TracingNotifier;
use club_client::{ClientConfig, ClubApi};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logger("info", false)?;

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        println!("Usage: {} <facility_id> <YYYY-MM-DD> <HH:MM>", args[0]);
        println!("  Example: {} 1 2026-10-19 10:00", args[0]);
        return Ok(());
    }
    let facility_id = &args[1];
    let date = NaiveDate::parse_from_str(&args[2], "%Y-%m-%d").context("invalid date")?;
    let start = NaiveTime::parse_from_str(&args[3], "%H:%M").context("invalid start time")?;

    let config = ClientConfig::from_env()?;
    let api = ClubApi::new(config.build_http_client()?);

    let Some(facility) = api.facilities().get(facility_id).await? else {
        bail!("facility {facility_id} not found");
    };

    let controller = BookingHoldController::new(api, Arc::new(TracingNotifier))
        .with_timezone(config.timezone);
    controller.open(facility, date).await?;

    let view = controller.view();
    if let Some(banner) = &view.banner {
        bail!("{}", banner.message);
    }
    for slot in &view.slots {
        tracing::info!("{} {:?}", slot.label(), slot.status);
    }

    let Some(slot) = view.slots.iter().find(|s| s.start_time == start) else {
        bail!("no slot starts at {} on {date}", args[3]);
    };
    controller.select(slot.key()).await?;

    match controller.confirm().await? {
        ConfirmOutcome::Confirmed(booking) => {
            tracing::info!(booking_id = %booking.id, status = ?booking.status, "Booked");
        }
        ConfirmOutcome::Conflict(_) | ConfirmOutcome::Failed(_) => {
            if let Some(banner) = controller.view().banner {
                tracing::warn!("{}", banner.message);
            }
        }
        ConfirmOutcome::Discarded => {}
    }

    controller.close().await;
    Ok(())
}
