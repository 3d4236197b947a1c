use grid_chase::{
    find_direction, find_direction_with, CoinFlip, Command, Dir, FixedGate, Game, GameConfig,
    ItemSet, Outcome, PathPolicy, Pos,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn items(cells: &[(usize, usize)]) -> ItemSet {
    cells.iter().map(|&(r, c)| Pos::new(r, c)).collect()
}

#[test]
fn pursuer_one_step_east_of_center() {
    assert_eq!(find_direction(10, Pos::new(5, 5), Pos::new(5, 6)), Some(Dir::East));
}

#[test]
fn corner_to_corner_search_ends_next_to_target() {
    let target = Pos::new(9, 9);
    let dir = find_direction(10, Pos::new(0, 0), target).expect("target is reachable");
    // The direction is read off (8,9) or (9,8); either way applying it there
    // lands on the target.
    let hits = [Pos::new(8, 9), Pos::new(9, 8)]
        .into_iter()
        .filter(|p| p.step(dir, 10) == Some(target))
        .count();
    assert_eq!(hits, 1);
}

#[test]
fn first_step_policy_moves_from_the_start_cell() {
    let start = Pos::new(7, 1);
    let target = Pos::new(2, 8);
    let dir = find_direction_with(PathPolicy::FirstStep, 10, start, target).unwrap();
    let next = start.step(dir, 10).unwrap();
    assert_eq!(next.manhattan(target), start.manhattan(target) - 1);
}

#[test]
fn walking_into_pursuer_loses() {
    let cfg = GameConfig {
        pursuer_start: Pos::new(1, 0),
        ..GameConfig::default()
    };
    let mut game = Game::with_items(cfg, items(&[(9, 9)])).unwrap();
    assert_eq!(game.resolve_tick(Command::Down, &mut FixedGate(false)), Outcome::Lost);
    assert_eq!(game.items_remaining(), 1);
}

#[test]
fn pursuer_catches_a_stationary_player() {
    let mut game = Game::with_items(GameConfig::default(), items(&[(9, 9)])).unwrap();
    let mut ticks = 0;
    // Bumping into the top wall keeps the player at (0,0).
    while game.outcome() == Outcome::Playing {
        game.resolve_tick(Command::Up, &mut FixedGate(true));
        ticks += 1;
        assert!(ticks <= 10, "pursuer should arrive in ten steps");
    }
    assert_eq!(game.outcome(), Outcome::Lost);
    assert_eq!(ticks, 10);
    assert_eq!(game.pursuer(), Pos::new(0, 0));
    assert_eq!(game.pursuer_history().len(), 10);
}

#[test]
fn sweeping_the_top_row_wins_against_an_idle_pursuer() {
    let mut game =
        Game::with_items(GameConfig::default(), items(&[(0, 3), (0, 6), (0, 9)])).unwrap();
    let mut outcome = Outcome::Playing;
    for _ in 0..9 {
        outcome = game.resolve_tick(Command::Right, &mut FixedGate(false));
    }
    assert_eq!(outcome, Outcome::Won);
    assert!(game.items().is_empty());
    assert_eq!(game.player_history().len(), 9);
}

#[test]
fn seeded_random_play_keeps_everything_on_the_grid() {
    let commands = [
        Command::Up,
        Command::Down,
        Command::Left,
        Command::Right,
        Command::Undo,
        Command::Invalid,
    ];
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new(GameConfig::default(), &mut rng).unwrap();
        let mut gate = CoinFlip::seeded(seed, 0.5);
        for _ in 0..200 {
            if game.outcome().is_terminal() {
                break;
            }
            let cmd = commands[rng.gen_range(0..commands.len())];
            let before = game.outcome();
            game.resolve_tick(cmd, &mut gate);
            assert!(game.player().in_bounds(10));
            assert!(game.pursuer().in_bounds(10));
            assert_eq!(before, Outcome::Playing);
            if game.outcome() == Outcome::Lost {
                assert_eq!(game.player(), game.pursuer());
            }
            if game.outcome() == Outcome::Won {
                assert_eq!(game.items_remaining(), 0);
            }
        }
    }
}

#[test]
fn same_seed_replays_identically() {
    let play = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new(GameConfig::default(), &mut rng).unwrap();
        let mut gate = CoinFlip::new(rng, 0.5);
        for cmd in [Command::Down, Command::Right, Command::Down, Command::Undo, Command::Right] {
            game.resolve_tick(cmd, &mut gate);
        }
        (game.player(), game.pursuer(), game.pursuer_history().to_vec())
    };
    assert_eq!(play(99), play(99));
}
