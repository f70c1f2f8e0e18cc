//! Rotating Ticket Code Demo
//!
//! Walks through the full lifecycle against the system clock with
//! shortened intervals: minting, scanning on two devices, tamper and
//! garbage rejection, epoch expiry, and the background rotation task.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin demo
//! ```

use gatepass_core::{
    BookingId, PassConfig, QrIssuer, QrValidator, ScanSession, SecretKey, SystemClock, TicketType,
};
use gatepass_display::{DisplayState, RotatingCode};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,gatepass_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("\n🎫 ============================================");
    println!("   Gatepass - Rotating Ticket Code Demo");
    println!("============================================\n");

    // Shortened intervals so the epoch rollover is visible in seconds
    // rather than a minute.
    let mut config = PassConfig::new(SecretKey::derive("gatepass-demo"));
    config.epoch_interval = Duration::from_secs(5);
    config.refresh_interval = Duration::from_secs(3);
    config.validate()?;

    let clock = Arc::new(SystemClock);
    let issuer = Arc::new(QrIssuer::new(&config, clock.clone()));
    let booking_id = BookingId::new(format!("bk-{}", Uuid::new_v4()));
    let ticket_type = TicketType::new("VIP".to_string());

    println!("📋 Demo Scenario: Festival Entry");
    println!("   Booking: {booking_id}");
    println!("   Ticket:  {ticket_type}");
    println!("   Epochs:  {:?} wide, refresh every {:?}\n",
        config.epoch_interval, config.refresh_interval);

    // Step 1: Mint a code and validate it on two independent scanners.
    println!("1️⃣  Minting a code and scanning it at two gates...");
    let token = issuer.mint(&booking_id, &ticket_type)?;
    let gate_a = QrValidator::new(&config, clock.clone());
    let gate_b = QrValidator::new(&config, clock.clone());
    println!("   gate A: {}", verdict(gate_a.validate(&token)));
    println!("   gate B: {}  (scans are stateless; both accept)\n", verdict(gate_b.validate(&token)));

    // Step 2: Tampered and garbage input.
    println!("2️⃣  Presenting tampered and garbage codes...");
    let mut tampered = token.clone();
    tampered.replace_range(4..5, if &token[4..5] == "A" { "B" } else { "A" });
    println!("   tampered: {}", verdict(gate_a.validate(&tampered)));
    println!("   garbage:  {}\n", verdict(gate_a.validate("not-a-real-token")));

    // Step 3: Scanner session feedback loop.
    println!("3️⃣  Driving a scanner session (decision lockout)...");
    let mut session = ScanSession::new(QrValidator::new(&config, clock.clone()), clock.clone())
        .with_lockout(Duration::from_secs(1));
    println!("   submit:        {:?}", session.submit(&token));
    println!("   during lockout: {:?}\n", session.submit(&token));

    // Step 4: Let the epoch roll over.
    println!("4️⃣  Waiting for the epoch to roll over...");
    tokio::time::sleep(config.epoch_interval + Duration::from_millis(250)).await;
    println!("   same code now: {}\n", verdict(gate_a.validate(&token)));

    // Step 5: The rotation task keeps a fresh code on screen.
    println!("5️⃣  Spawning the display rotation task...");
    let display = RotatingCode::spawn(
        issuer,
        booking_id,
        ticket_type,
        config.refresh_interval,
    );
    let mut updates = display.subscribe();
    for shown in 1..=3u32 {
        updates.changed().await?;
        match &*updates.borrow() {
            DisplayState::Showing { token } => {
                println!("   refresh {shown}: showing {}…", &token[..16.min(token.len())]);
            }
            state => println!("   refresh {shown}: {state:?}"),
        }
    }
    display.stop();
    println!("   display dismissed; rotation task stopped\n");

    println!("✓ Demo complete");
    Ok(())
}

fn verdict(accepted: bool) -> &'static str {
    if accepted { "✅ valid" } else { "❌ invalid" }
}
