#![no_main]

use libfuzzer_sys::fuzz_target;
use swarm::{DeltaTime, GameSession, LevelConfig};

/// Largest wall-generator sampling grid worth building.
const MAX_GRID_CELLS: f32 = 250_000.0;

fuzz_target!(|data: &[u8]| {
    let Ok(level) = serde_json::from_slice::<LevelConfig>(data) else {
        return;
    };

    // Skip levels whose wall grid would be huge
    if let (Some(generator), Ok(stage)) = (&level.wall_generator, level.stage.bounds()) {
        if generator.cell_size > 0.0 {
            let cells = (stage.width() / generator.cell_size) * (stage.height() / generator.cell_size);
            if !cells.is_finite() || cells > MAX_GRID_CELLS || generator.seed_count > 10_000 {
                return;
            }
        }
    }

    let Ok(mut session) = GameSession::from_config(&level, Some(0)) else {
        return;
    };
    let Ok(dt) = DeltaTime::new(1.0 / 60.0) else {
        return;
    };
    for _ in 0..60 {
        session.step(dt);
        assert!(session.non_player_entities().len() <= session.population_cap());
    }
});
