use tilemove::*;

struct Player {
    body: Mover,
    name: &'static str,
}

impl Movement for Player {
    fn mover(&self) -> &Mover {
        &self.body
    }
    fn mover_mut(&mut self) -> &mut Mover {
        &mut self.body
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{path}: {e}"));
            PhysicsConfig::from_json(&text).unwrap_or_else(|e| panic!("{path}: {e}"))
        }
        None => PhysicsConfig::default(),
    };

    let blocks = [
        Block::new(-1.0, 0.0, 1.0, 600.0, false),
        Block::new(0.0, -1.0, 800.0, 1.0, false),
        Block::new(800.0, 0.0, 1.0, 600.0, false),
        Block::new(0.0, 600.0, 800.0, 1.0, false),
        Block::new(280.0, 560.0, 40.0, 40.0, true),
    ];
    let ramps = [
        Ramp::new(600.0, 500.0, 200.0, 100.0, true, false),
        Ramp::new(0.0, 500.0, 200.0, 100.0, false, false),
    ];
    let obstacles: Vec<&dyn Obstacle> = blocks.iter().map(|b| b as &dyn Obstacle).collect();

    let mut player = Player {
        body: Mover::new(380.0, 300.0, 40.0, 40.0).with_max_speed(Vector2::new(6.0, 20.0)),
        name: "player",
    };
    for tick in 0..240 {
        let walk = if tick < 120 { 1.0 } else { -1.0 };
        player.step(Vector2::new(walk, 0.0), &obstacles, &ramps, false, &config);
        if tick % 20 == 0 {
            let m = player.mover();
            println!(
                "{} t={tick:3} pos=({:.1},{:.1}) speed=({:.2},{:.2}) bottom={:?} side={:?}",
                player.name,
                m.x,
                m.y,
                m.speed.x,
                m.speed.y,
                m.bottom(),
                m.left().or(m.right())
            );
        }
    }

    // a lift patrolling between two heights with a crate on top
    let mut lift = Mover::new(400.0, 400.0, 100.0, 10.0);
    let mut cargo = Mover::new(430.0, 370.0, 30.0, 30.0);
    let path = [Vector2::new(400.0, 400.0), Vector2::new(400.0, 250.0)];
    for tick in 0..120 {
        let mut riders: [&mut dyn Passenger; 1] = [&mut cargo];
        lift.cycle(&path, 5.0, Some(&mut riders), &obstacles, &ramps, 20, &config);
        if tick % 10 == 0 {
            println!(
                "lift t={tick:3} y={:.1} point={} cargo=({:.1},{:.1})",
                lift.y,
                lift.cycle_point(),
                cargo.x,
                cargo.y
            );
        }
    }
}
