#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use swarm::{DeltaTime, GameSession, LevelConfig, Vec2};

const ARENA: &str = include_str!("../../levels/arena.json");

/// One host command between ticks.
#[derive(Arbitrary, Debug)]
enum Command {
    Move { x: i8, y: i8 },
    Aim { angle: u16, magnitude: u8 },
    Fire { pressed: bool, held: bool },
    Reload,
    Bomb,
    Pause,
    Resume,
    Tick { millis: u8 },
}

/// Structured input for session fuzzing.
#[derive(Arbitrary, Debug)]
struct SessionInput {
    seed: u64,
    commands: Vec<Command>,
}

fuzz_target!(|input: SessionInput| {
    let Ok(level) = serde_json::from_str::<LevelConfig>(ARENA) else {
        return;
    };
    let Ok(mut session) = GameSession::from_config(&level, Some(input.seed)) else {
        return;
    };
    let cap = session.population_cap();

    // Cap command count to keep runs short
    for command in input.commands.into_iter().take(2_000) {
        match command {
            Command::Move { x, y } => {
                session.apply_input(Vec2::new(f32::from(x), f32::from(y)), 200.0);
            }
            Command::Aim { angle, magnitude } => {
                session.rotate_towards_polar(f32::from(angle).to_radians(), f32::from(magnitude) / 255.0);
            }
            Command::Fire { pressed, held } => {
                session.fire(pressed, held);
            }
            Command::Reload => session.reload(),
            Command::Bomb => {
                session.drop_bomb();
            }
            Command::Pause => session.pause(),
            Command::Resume => session.resume(),
            Command::Tick { millis } => {
                let Ok(dt) = DeltaTime::new(f32::from(millis.max(1)) / 1000.0) else {
                    continue;
                };
                session.step(dt);
            }
        }

        let stage = session.stage();
        let player = session.player();
        assert!(stage.contains(player.position()), "player left the stage");
        assert!(player.hit_points() <= player.max_hit_points());
        assert!(session.non_player_entities().len() <= cap, "population cap exceeded");
        for npc in session.non_player_entities() {
            assert!(stage.contains(npc.position()), "entity left the stage");
        }
    }
});
