//! Classic Pong entry point
//!
//! The browser build is driven from JavaScript through `classic_pong::web`.
//! Natively this runs a headless attract-mode match: a scripted player on the
//! left against the AI on the right, logging every point.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use classic_pong::audio::SilentAudio;
    use classic_pong::platform::{FileStorage, MemoryStorage, Storage};
    use classic_pong::sim::{Arena, Difficulty, GameEvent, GamePhase};
    use classic_pong::{Game, GameMode};

    /// 60 fps frame time
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after ten minutes of game time
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    env_logger::init();
    log::info!("Classic Pong (native) starting...");

    let seed = std::env::var("PONG_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });
    let difficulty = std::env::var("PONG_DIFFICULTY")
        .ok()
        .and_then(|s| Difficulty::from_name(&s))
        .unwrap_or_default();
    let storage: Box<dyn Storage> = match std::env::var("PONG_DATA_DIR") {
        Ok(dir) => Box::new(FileStorage::new(dir)),
        Err(_) => Box::new(MemoryStorage::new()),
    };

    let mut game = Game::new(seed, Arena::default(), storage, Box::new(SilentAudio));
    log::info!(
        "Seed {}, difficulty {}",
        game.state().seed,
        difficulty.as_str()
    );
    game.start(GameMode::SinglePlayer, difficulty);

    for frame in 0..MAX_FRAMES {
        // Scripted left player: chase the ball with a small dead zone
        let (ball_y, paddle_y) = {
            let state = game.state();
            (state.ball.pos.y, state.left.center_y())
        };
        if ball_y < paddle_y - 10.0 {
            game.key_up("s");
            game.key_down("w");
        } else if ball_y > paddle_y + 10.0 {
            game.key_up("w");
            game.key_down("s");
        } else {
            game.release_keys();
        }

        for event in game.update(FRAME_MS) {
            if let GameEvent::Score(side) = event {
                let state = game.state();
                log::info!(
                    "[frame {}] point to {:?}: {}-{}",
                    frame,
                    side,
                    state.left.score,
                    state.right.score
                );
            }
        }

        if game.phase() == GamePhase::GameOver {
            break;
        }
    }

    match game.result() {
        Some(result) => {
            println!(
                "{} {}-{}",
                result.message(),
                result.left_score,
                result.right_score
            );
            for line in game.high_scores().display_lines() {
                println!("  {}", line);
            }
        }
        None => println!("No winner after {} frames", MAX_FRAMES),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_main, this is just to satisfy the compiler
}
