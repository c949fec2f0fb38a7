//! Dice Plinko entry point
//!
//! The browser build is driven from the page through the library's
//! bindings. Natively this runs a few headless plays per board preset and
//! prints the ledger.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dice_plinko::renderer::FrameMesh;
    use dice_plinko::sim::{Session, SessionEvent};
    use dice_plinko::{GameConfig, Ledger, ObstacleStyle};

    env_logger::init();
    log::info!("Dice Plinko (native) starting...");

    let plays: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(5);

    for style in [ObstacleStyle::Wedge, ObstacleStyle::Peg] {
        let config = GameConfig::from_preset(style);
        let mut ledger = Ledger::new();
        let mut mesh = FrameMesh::new();

        println!("\n{} board, {} plays", style.as_str(), plays);
        for seed in 0..plays {
            let mut session = Session::new(config.clone(), 800.0, 600.0, seed);
            session.roll();

            // Generous cap; a play normally resolves in well under 2000 ticks
            for _ in 0..10_000 {
                let events = session.tick(&mut mesh);
                let resolved = events.into_iter().find_map(|event| match event {
                    SessionEvent::Resolved(outcome) => Some(outcome),
                    _ => None,
                });
                if let Some(outcome) = resolved {
                    println!(
                        "  seed {:>3}: dice {}+{} lane {} -> slot {:?} {} ({} ticks, {} vertices)",
                        seed,
                        session.dice().die1,
                        session.dice().die2,
                        session.lane().unwrap_or(0),
                        outcome.slot,
                        outcome.label,
                        session.time_ticks(),
                        mesh.vertex_count()
                    );
                    ledger.record(&outcome);
                    break;
                }
            }
        }

        println!(
            "  plays {} paid {} cost {} net {:+}",
            ledger.plays(),
            ledger.total_paid_out(),
            ledger.total_cost(),
            ledger.net()
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_start in the library, this is just to satisfy the compiler
}
