use super::*;
use crate::rng::SeededRng;

/// Emits the same byte forever; with 100 every spawn lands on (100, 4) and
/// the 1/256 extra-spawn roll never fires.
#[derive(Clone, Debug)]
struct FixedBytes(u8);

impl ByteSource for FixedBytes {
    fn next_byte(&mut self) -> u8 {
        self.0
    }
}

fn playing() -> Game<FixedBytes> {
    let mut game = Game::new(FixedBytes(100));
    assert_eq!(game.on_button(ButtonEvent::Right), Control::Continue);
    assert_eq!(game.mode(), Mode::Playing);
    game
}

fn ticks<R: ByteSource>(game: &mut Game<R>, n: u32) {
    for _ in 0..n {
        game.tick();
    }
}

fn dead_at_top() -> Game<FixedBytes> {
    let mut game = playing();
    ticks(&mut game, 125);
    assert_eq!(game.mode(), Mode::Dead { dead_tick: 0 });
    game
}

#[test]
fn new_game_waits_in_menu() {
    let mut game = Game::new(FixedBytes(100));
    assert_eq!(game.mode(), Mode::Menu);
    ticks(&mut game, 10);
    assert_eq!(game.mode(), Mode::Menu);
    assert_eq!(game.clock().ticks(), 0);
}

#[test]
fn menu_back_requests_exit_without_changing_mode() {
    let mut game = Game::new(FixedBytes(100));
    assert_eq!(game.on_button(ButtonEvent::Left), Control::Exit);
    assert_eq!(game.mode(), Mode::Menu);
    assert_eq!(game.on_button(ButtonEvent::Both), Control::Continue);
    assert_eq!(game.mode(), Mode::Menu);
}

#[test]
fn speed_one_moves_on_fifth_tick() {
    let mut game = playing();
    let start = game.snake().head();
    assert_eq!(start, Position::new(64, 24));

    ticks(&mut game, 4);
    assert_eq!(game.snake().head(), start);

    game.tick();
    assert_eq!(game.snake().head(), Position::new(64, 23));
    assert_eq!(game.snake().len(), 7);
}

#[test]
fn first_playing_tick_spawns_a_coin() {
    let mut game = playing();
    assert!(game.coins().is_empty());
    game.tick();
    assert_eq!(game.coins().as_slice(), &[Position::new(100, 4)]);
    ticks(&mut game, 40);
    assert_eq!(game.coins().len(), 1);
}

#[test]
fn one_turn_per_step() {
    let mut game = playing();
    game.on_button(ButtonEvent::Left);
    game.on_button(ButtonEvent::Left);
    game.on_button(ButtonEvent::Right);
    assert_eq!(game.snake().direction(), Direction::Left);

    ticks(&mut game, 5);
    assert_eq!(game.snake().head(), Position::new(63, 24));
    game.on_button(ButtonEvent::Right);
    assert_eq!(game.snake().direction(), Direction::Up);
}

#[test]
fn wall_collision_kills_without_moving() {
    let mut game = playing();
    ticks(&mut game, 124);
    assert_eq!(game.mode(), Mode::Playing);
    assert_eq!(game.snake().head(), Position::new(64, 0));

    game.tick();
    assert_eq!(game.mode(), Mode::Dead { dead_tick: 0 });
    assert_eq!(game.snake().head(), Position::new(64, 0));
    assert_eq!(game.clock().ticks(), 125);
}

#[test]
fn self_collision_kills() {
    let mut game = playing();
    for _ in 0..3 {
        game.on_button(ButtonEvent::Right);
        ticks(&mut game, 5);
    }
    assert_eq!(game.mode(), Mode::Dead { dead_tick: 0 });
    assert_eq!(game.snake().head(), Position::new(65, 25));
}

#[test]
fn dead_counter_saturates_and_gates_menu() {
    let mut game = dead_at_top();

    ticks(&mut game, (DEATH_WAIT - 1) as u32);
    assert_eq!(
        game.mode(),
        Mode::Dead {
            dead_tick: DEATH_WAIT - 1
        }
    );
    game.on_button(ButtonEvent::Both);
    assert!(matches!(game.mode(), Mode::Dead { .. }));

    game.tick();
    assert_eq!(game.mode(), Mode::Dead { dead_tick: DEATH_WAIT });
    ticks(&mut game, 20);
    assert_eq!(game.mode(), Mode::Dead { dead_tick: DEATH_WAIT });

    game.on_button(ButtonEvent::Left);
    game.on_button(ButtonEvent::Right);
    assert_eq!(game.mode(), Mode::Dead { dead_tick: DEATH_WAIT });

    game.on_button(ButtonEvent::Both);
    assert_eq!(game.mode(), Mode::Menu);
}

#[test]
fn dead_mode_freezes_simulation() {
    let mut game = dead_at_top();
    let before = game.snapshot();
    ticks(&mut game, 30);
    let after = game.snapshot();
    assert_eq!(before.ticks, after.ticks);
    assert_eq!(before.snake, after.snake);
    assert_eq!(before.coins, after.coins);
}

#[test]
fn pause_and_resume() {
    let mut game = playing();
    ticks(&mut game, 3);
    game.on_button(ButtonEvent::Both);
    assert_eq!(game.mode(), Mode::Paused);

    ticks(&mut game, 50);
    assert_eq!(game.clock().ticks(), 3);
    assert_eq!(game.snake().head(), Position::new(64, 24));

    game.on_button(ButtonEvent::Right);
    assert_eq!(game.mode(), Mode::Playing);
    ticks(&mut game, 2);
    assert_eq!(game.snake().head(), Position::new(64, 23));

    game.on_button(ButtonEvent::Both);
    game.on_button(ButtonEvent::Both);
    assert_eq!(game.mode(), Mode::Playing);
}

#[test]
fn abandoning_from_pause_returns_to_menu() {
    let mut game = playing();
    game.on_button(ButtonEvent::Both);
    game.on_button(ButtonEvent::Left);
    assert_eq!(game.mode(), Mode::Menu);
}

#[test]
fn restart_reinitializes_session() {
    let mut game = playing();
    ticks(&mut game, 37);
    game.on_button(ButtonEvent::Left);
    ticks(&mut game, 5);
    game.on_button(ButtonEvent::Both);
    game.on_button(ButtonEvent::Left);
    assert_eq!(game.mode(), Mode::Menu);

    game.on_button(ButtonEvent::Right);
    let fresh = playing().snapshot();
    assert_eq!(game.snapshot(), fresh);
}

#[test]
fn eating_grows_on_following_step() {
    let mut game = playing();
    game.coins_mut().push(Position::new(64, 23));

    ticks(&mut game, 5);
    assert_eq!(game.snake().head(), Position::new(64, 23));
    assert_eq!(game.snake().len(), 7);
    assert_eq!(game.snake().growth_debt(), 1);
    assert_eq!(game.coins().as_slice(), &[Position::new(100, 4)]);

    ticks(&mut game, 5);
    assert_eq!(game.snake().len(), 8);
    assert_eq!(game.snake().growth_debt(), 0);
}

#[test]
fn eating_at_limit_trades_length_for_speed() {
    let mut game = playing();
    game.snake_mut().set_progress(1, 13);
    game.coins_mut().push(Position::new(64, 23));

    // The step onto the coin settles one owed segment first: 8 + 12 = 20.
    ticks(&mut game, 5);
    assert_eq!(game.snake().len(), 8);
    assert_eq!(game.snake().speed(), 2);
    assert_eq!(game.snake().growth_debt(), 7);
    assert_eq!(game.snake().move_period(), 4);

    // Clock is at 5; the next step happens on tick 8.
    let head = game.snake().head();
    ticks(&mut game, 2);
    assert_eq!(game.snake().head(), head);
    game.tick();
    assert_eq!(game.snake().head(), Position::new(64, 22));
}

#[test]
fn eating_never_lowers_committed_length() {
    fn committed<R>(game: &Game<R>) -> i32 {
        game.snake().len() as i32 + game.snake().growth_debt().max(0) as i32
    }

    for (speed, debt) in [(1u8, 0i8), (1, 5), (3, 2), (5, 0), (1, 13)] {
        let mut game = playing();
        game.snake_mut().set_progress(speed, debt);
        game.coins_mut().push(Position::new(64, 23));
        let before = committed(&game);

        // Step onto the coin, then take one more step.
        let period = game.snake().move_period();
        ticks(&mut game, period);
        let sped_up = game.snake().speed() != speed;
        let period = game.snake().move_period();
        let wait = period - game.clock().ticks() % period;
        ticks(&mut game, wait);

        let after = committed(&game);
        if sped_up {
            assert!(after >= before - crate::constants::SPEED_UP_PENALTY as i32);
        } else {
            assert!(after > before, "speed {speed} debt {debt}: {before} -> {after}");
        }
    }
}

#[test]
fn every_overlapping_coin_is_consumed_in_one_tick() {
    let mut game = playing();
    game.coins_mut().push(Position::new(64, 26));
    game.coins_mut().push(Position::new(90, 9));
    game.coins_mut().push(Position::new(64, 27));
    game.tick();
    assert_eq!(game.snake().growth_debt(), 2);
    assert_eq!(game.coins().as_slice(), &[Position::new(90, 9)]);

    let mut game = playing();
    game.coins_mut().push(Position::new(64, 26));
    game.coins_mut().push(Position::new(64, 27));
    game.tick();
    assert_eq!(game.snake().growth_debt(), 2);
    assert_eq!(game.coins().as_slice(), &[Position::new(100, 4)]);
}

#[test]
fn invariants_hold_over_long_random_sessions() {
    for seed in [1u32, 0xDEAD_BEEF, 0x1234_5678, 42] {
        let mut driver = SeededRng::new(seed ^ 0xA5A5_A5A5);
        let mut game = Game::new(SeededRng::new(seed));
        game.validate_invariants().expect("initial state");

        for step in 0..30_000 {
            match driver.next_byte() {
                0..=3 => {
                    game.on_button(ButtonEvent::Left);
                }
                4..=7 => {
                    game.on_button(ButtonEvent::Right);
                }
                8 => {
                    game.on_button(ButtonEvent::Both);
                }
                _ => game.tick(),
            }
            if let Err(rule) = game.validate_invariants() {
                panic!("seed {seed:#x} step {step}: {rule}");
            }
        }
    }
}

#[test]
fn validate_flags_corrupted_state() {
    let mut game = playing();
    game.coins_mut().push(Position::new(2, 2));
    assert_eq!(game.validate_invariants(), Err(RuleCode::CoinMargin));

    let mut game = playing();
    game.coins_mut().push(Position::new(64, 26));
    assert_eq!(game.validate_invariants(), Err(RuleCode::CoinOnSnake));

    let mut game = playing();
    game.coins_mut().push(Position::new(30, 10));
    game.coins_mut().push(Position::new(30, 10));
    assert_eq!(game.validate_invariants(), Err(RuleCode::CoinDuplicate));

    let mut game = playing();
    game.snake_mut().set(3, Position::new(64, 24));
    assert_eq!(game.validate_invariants(), Err(RuleCode::SnakeBodyOverlap));

    let mut game = playing();
    game.snake_mut().set_progress(0, 0);
    assert_eq!(game.validate_invariants(), Err(RuleCode::SnakeSpeedRange));

    let mut game = playing();
    game.set_mode_raw(Mode::Dead {
        dead_tick: DEATH_WAIT + 1,
    });
    assert_eq!(game.validate_invariants(), Err(RuleCode::DeadTickRange));
}

#[test]
fn snapshot_serializes_to_json() {
    let mut game = playing();
    ticks(&mut game, 5);
    let json = serde_json::to_value(game.snapshot()).expect("snapshot json");
    assert_eq!(json["mode"], "Playing");
    assert_eq!(json["ticks"], 5);
    assert_eq!(json["elapsed_ms"], 100);
    assert_eq!(json["snake"][0]["y"], 23);
    assert_eq!(json["coins"].as_array().map(Vec::len), Some(1));
}
