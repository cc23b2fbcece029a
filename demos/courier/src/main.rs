//! courier — drop-off demo for the safe relocation coordinator.
//!
//! Three couriers in a small yard with a crowded drop-off point, a pond,
//! a trigger zone, and a collapsed warehouse.  A handful of order events
//! go through an `EventBus`; the coordinator relocates what it is allowed
//! to and every outcome is printed.
//!
//! Usage: `courier [config.json]`.  Logging follows `RUST_LOG`.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use relo_coord::{CoordinatorBuilder, OutcomeObserver, RelocationOutcome};
use relo_core::{EntityId, Quat, Readiness, RelocationConfig, Vec3};
use relo_entity::{Body, EntityTableBuilder};
use relo_events::{EventBus, RecordingSink, RelocationRequest};
use relo_spatial::load_obstacles_reader;

// ── Constants ─────────────────────────────────────────────────────────────────

const PRINCIPAL: &str = "courier-service";

// ── Yard CSV ──────────────────────────────────────────────────────────────────

// Drop-off crate, pond, a trigger volume the probe ignores, and a collapsed
// warehouse too large to route around.
const YARD_CSV: &str = "\
x,y,z,radius,kind\n\
10.0,0.0,10.0,1.0,solid\n\
14.0,0.0,8.0,3.0,liquid\n\
0.0,0.0,20.0,2.0,trigger\n\
-30.0,0.0,-30.0,8.0,solid\n\
";

// ── Observer ──────────────────────────────────────────────────────────────────

struct Forward(mpsc::UnboundedSender<(RelocationRequest, RelocationOutcome)>);

impl OutcomeObserver for Forward {
    fn on_outcome(&self, request: &RelocationRequest, outcome: &RelocationOutcome) {
        let _ = self.0.send((request.clone(), outcome.clone()));
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<RelocationConfig> {
    let Some(path) = path else {
        return Ok(RelocationConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: RelocationConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let config_path = std::env::args().nth(1);
    let config = load_config(config_path.as_deref().map(Path::new))?;
    println!("=== courier — safe relocation demo ===");
    println!(
        "lock timeout {} ms  |  probe radius {} m  |  search radius {} m",
        config.lock_timeout_ms, config.probe_radius_m, config.max_search_radius_m
    );

    // 1. World: obstacles and couriers.
    let obstacles = Arc::new(load_obstacles_reader(Cursor::new(YARD_CSV))?);
    println!("Yard: {} obstacles", obstacles.len());

    let mut couriers = EntityTableBuilder::with_capacity(3);
    let ada = couriers.spawn(
        Body::at(Vec3::ZERO).with_velocity(Vec3::new(1.5, 0.0, 0.0), Vec3::ZERO),
    );
    let bo = couriers.spawn(
        Body::at(Vec3::new(2.0, 0.0, 0.0)).with_orientation(Quat::from_yaw(1.57)),
    );
    let cy = couriers.spawn(Body::at(Vec3::new(4.0, 0.0, 0.0)));
    let entities = Arc::new(couriers.build());

    // 2. Coordinator on an event bus.
    let bus = Arc::new(EventBus::new(64));
    let sink = Arc::new(RecordingSink::new());
    let (tx, mut rx) = mpsc::unbounded_channel();

    let coordinator = CoordinatorBuilder::new(
        config.clone(),
        PRINCIPAL,
        Arc::clone(&entities),
        Arc::clone(&obstacles),
        bus.clone(),
    )
    .sink(sink.clone())
    .observer(Arc::new(Forward(tx)))
    .build()?;
    coordinator.start()?;

    // 3. Hold cy's lock so its order times out.
    let busy = entities
        .acquire(cy, Duration::from_millis(10))
        .await
        .context("cy should be free at start-up")?;

    // 4. Orders.
    let orders = vec![
        RelocationRequest::ready(PRINCIPAL, ada, Vec3::new(5.0, 0.0, 5.0)),
        RelocationRequest::ready(PRINCIPAL, bo, Vec3::new(10.0, 0.0, 10.0)),
        RelocationRequest::ready("rival-service", ada, Vec3::new(1.0, 0.0, 1.0)),
        RelocationRequest::new(PRINCIPAL, bo, Vec3::new(3.0, 0.0, 3.0), Readiness::Assigned),
        RelocationRequest::ready(PRINCIPAL, cy, Vec3::new(6.0, 0.0, 0.0)),
        RelocationRequest::ready(PRINCIPAL, EntityId(9), Vec3::new(6.0, 0.0, 0.0)),
    ];
    let expected = orders.len();
    for order in orders {
        bus.publish(order)?;
    }

    // 5. Collect outcomes.  The held lock costs one full timeout.
    let deadline = config.lock_timeout() + Duration::from_secs(2);
    let mut received = 0;
    while received < expected {
        let Ok(Some((request, outcome))) = tokio::time::timeout(deadline, rx.recv()).await else {
            bail!("only {received} of {expected} outcomes arrived");
        };
        received += 1;
        let who = request.principal.as_ref().map_or("?", |p| p.as_str());
        let subject = request.subject.map_or_else(|| "?".to_string(), |e| e.to_string());
        println!("  {who:<16} {subject:<12} -> {outcome}");
    }
    drop(busy);

    // 6. Direct calls, bypassing the bus.  Trigger volumes are outside the
    //    probe mask, so ada lands at the exact target.
    let direct = RelocationRequest::ready(PRINCIPAL, ada, Vec3::new(0.0, 0.0, 20.0));
    println!("  direct           {:<12} -> {}", ada.to_string(), coordinator.handle(&direct).await);

    let buried = RelocationRequest::ready(PRINCIPAL, bo, Vec3::new(-30.0, 0.0, -30.0));
    println!("  direct           {:<12} -> {}", bo.to_string(), coordinator.handle(&buried).await);

    coordinator.stop();

    // 7. Final state.
    println!();
    println!("Signals: {}", sink.len());
    for id in entities.entity_ids() {
        let body = entities
            .snapshot(id, config.lock_timeout())
            .await
            .with_context(|| format!("{id} still locked"))?;
        println!(
            "  {id}: pos {}  vel {}  yaw {:.2}  signals {}",
            body.position,
            body.linear_velocity,
            body.orientation.yaw(),
            sink.count_for(id),
        );
    }

    let stats = entities.stats();
    println!(
        "Locks: {} acquired, {} released, {} timed out",
        stats.acquired, stats.released, stats.timed_out
    );
    Ok(())
}
