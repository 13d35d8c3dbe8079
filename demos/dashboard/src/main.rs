//! Terminal walkthrough of the parking dashboard state machine.
//!
//! Seeds a synthetic facility (shape configurable via `PARKLOT_*` env vars,
//! reproducible via `PARKLOT_SEED`) and exercises every public operation:
//! occupancy queries, the request lifecycle, direct entry, and the overstay
//! listing.

use parklot_core::{SeedConfig, StateCoordinator, SystemClock, UserRole, VehicleInput, seed};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parklot_core=info,parklot_dashboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn print_occupancy(coordinator: &StateCoordinator) {
    println!("\nOccupancy:");
    for summary in coordinator.occupancy_snapshot() {
        println!(
            "  level {}: {:>2}/{} slots ({:.0}%)",
            summary.level, summary.occupied_slots, summary.total_slots, summary.occupancy_percent
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    println!("=== Parklot Dashboard ===");

    let mut rng = match std::env::var("PARKLOT_SEED") {
        Ok(value) => StdRng::seed_from_u64(value.parse()?),
        Err(_) => StdRng::from_entropy(),
    };
    let config = SeedConfig::from_env();
    let mut coordinator = seed(&config, &mut rng, Arc::new(SystemClock));

    print_occupancy(&coordinator);

    // security: submit a new entry request
    let request = coordinator.create_request(
        VehicleInput {
            license_plate: format!("NEW-{}", rng.gen_range(100..1_000)),
            driver_name: "Walk-up Driver".to_string(),
            expected_exit_time: None,
        },
        UserRole::Security,
    );
    println!(
        "\nSubmitted entry request for {} ({})",
        request.vehicle.license_plate, request.vehicle.driver_name
    );

    println!("\nPending requests:");
    for pending in coordinator.pending_requests() {
        println!(
            "  {} — {} by {}",
            pending.vehicle.license_plate, pending.vehicle.driver_name, pending.requested_by
        );
    }

    // admin: approve the new request, reject the oldest other one
    let approved = coordinator.approve_request(request.id, UserRole::Admin.label())?;
    println!(
        "\nApproved {} into slot {}",
        approved.vehicle.license_plate,
        coordinator
            .vehicles()
            .iter()
            .find(|vehicle| vehicle.id == approved.vehicle.id)
            .and_then(|vehicle| vehicle.slot_id)
            .map_or_else(|| "?".to_string(), |slot| slot.to_string())
    );

    if let Some(other) = coordinator.pending_requests().first().map(|r| r.id) {
        let rejected = coordinator.reject_request(other, UserRole::Admin.label())?;
        println!("Rejected {}", rejected.vehicle.license_plate);
    }

    // admin: direct entry on level 1, tolerating a full level
    match coordinator.add_vehicle_direct(
        VehicleInput {
            license_plate: "VIP-001".to_string(),
            driver_name: "Direct Entry".to_string(),
            expected_exit_time: None,
        },
        1,
    ) {
        Ok(vehicle) => println!(
            "Direct entry {} into slot {}",
            vehicle.license_plate,
            vehicle
                .slot_id
                .map_or_else(|| "?".to_string(), |slot| slot.to_string())
        ),
        Err(error) => println!("Direct entry refused: {error}"),
    }

    // superuser: overstay report
    let now = chrono::Utc::now();
    println!("\nOverstay vehicles:");
    for vehicle in coordinator.overstay_vehicles() {
        let minutes = vehicle
            .overstay_duration(now)
            .map_or(0, |duration| duration.num_minutes());
        println!(
            "  {} ({}) — {minutes} min over",
            vehicle.license_plate, vehicle.driver_name
        );
    }

    print_occupancy(&coordinator);
    println!(
        "\nSnapshot:\n{}",
        serde_json::to_string_pretty(&coordinator.occupancy_snapshot())?
    );

    println!("\n=== Demo Complete ===");
    Ok(())
}
