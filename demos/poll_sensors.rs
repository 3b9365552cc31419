// SPDX-License-Identifier: MPL-2.0

//! Sensor polling example.
//!
//! Logs in to a Wyze account, registers the enabled binary sensors and prints
//! every sensor event until interrupted.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example poll_sensors -- <email> <password> [options_json]
//!
//! # Credentials can also come from the environment
//! WYZE_EMAIL=me@example.com WYZE_PASSWORD=secret cargo run --example poll_sensors
//! ```
//!
//! # Examples
//!
//! ```bash
//! # Camera motion only (the default)
//! cargo run --example poll_sensors -- me@example.com secret
//!
//! # Camera sound and contact sensors too, with debug logging
//! RUST_LOG=wyze_sensors=debug cargo run --example poll_sensors -- \
//!     me@example.com secret '{"cam_sound": true, "contact_sensor": true}'
//! ```

use std::env;
use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;
use wyze_sensors::platform::{SensorPoller, setup_entry};
use wyze_sensors::{CloudConfig, SensorEvent, SensorOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let email = args
        .get(1)
        .cloned()
        .or_else(|| env::var("WYZE_EMAIL").ok());
    let password = args
        .get(2)
        .cloned()
        .or_else(|| env::var("WYZE_PASSWORD").ok());

    let (Some(email), Some(password)) = (email, password) else {
        print_usage(&args[0]);
        std::process::exit(1);
    };

    let options = match args.get(3) {
        Some(json) => SensorOptions::from_json(json)?,
        None => SensorOptions::new(),
    };

    println!("Logging in as {email}...");
    let client = Arc::new(CloudConfig::new(email, password).connect().await?);

    let mut poller = SensorPoller::new();
    let mut events = poller.subscribe();

    let count = setup_entry(&client, &options, &mut poller).await?;
    println!("Registered {count} sensor(s), polling every {:?}", poller.interval());
    poller.start();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("Stopping...");
                break;
            }
            event = events.recv() => match event {
                Ok(event) => print_event(&event),
                Err(RecvError::Lagged(skipped)) => eprintln!("Missed {skipped} event(s)"),
                Err(RecvError::Closed) => break,
            },
        }
    }

    poller.shutdown();
    for (unique_id, state) in poller.states() {
        println!("{unique_id}: on={} available={}", state.is_on, state.available);
    }

    Ok(())
}

fn print_event(event: &SensorEvent) {
    match event {
        SensorEvent::SensorAdded { unique_id } => println!("+ {unique_id}"),
        SensorEvent::StateChanged {
            unique_id,
            is_on,
            last_event,
        } => {
            let when = last_event
                .to_datetime()
                .map_or_else(|| last_event.to_string(), |dt| dt.to_rfc3339());
            println!("{unique_id}: {} (last event {when})", if *is_on { "ON" } else { "OFF" });
        }
        SensorEvent::AvailabilityChanged {
            unique_id,
            available,
        } => println!("{unique_id}: available={available}"),
        SensorEvent::PollFailed { unique_id, error } => eprintln!("{unique_id}: {error}"),
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage:");
    eprintln!("  {program} <email> <password> [options_json]");
    eprintln!();
    eprintln!("Credentials may also be set with WYZE_EMAIL and WYZE_PASSWORD.");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {program} me@example.com secret");
    eprintln!("  {program} me@example.com secret '{{\"cam_sound\": true}}'");
}
