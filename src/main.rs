// main.rs
//
// Headless tour of the cut pipeline: load the prototype level, let the
// player drop onto the first cut, walk along it, rotate the plane a quarter
// turn, and walk again on the new cross-section.

use pivot::config::GameConfig;
use pivot::float_types::Real;
use pivot::gameplay::{GameplayController, InputState};
use pivot::level::Level;
use pivot::scene::NullScene;

const DT: Real = 1.0 / 60.0;

fn print_state(tag: &str, game: &GameplayController<NullScene>) {
    let p3 = game.model().player_3d();
    let p2 = game.physics().player_position();
    println!(
        "[{tag}] 3d=({:.2}, {:.2}, {:.2})  2d=({:.2}, {:.2})  cut={} polys  state={:?}",
        p3.x,
        p3.y,
        p3.z,
        p2.x,
        p2.y,
        game.model().cut().len(),
        game.state(),
    );
}

fn run(game: &mut GameplayController<NullScene>, frames: usize, input: InputState) {
    for _ in 0..frames {
        game.update(DT, input);
    }
}

fn main() {
    env_logger::init();

    let config = GameConfig::default();
    let level = Level::prototype();
    let scene = NullScene::with_collectibles(level.collectibles.len());

    let mut game = GameplayController::new(level, &config, scene)
        .expect("prototype level has a valid start normal");
    print_state("start", &game);

    // Fall onto the floor of the first cut.
    run(&mut game, 180, InputState::default());
    print_state("landed", &game);

    // Walk right for two seconds.
    run(
        &mut game,
        120,
        InputState {
            move_direction: 1.0,
            ..InputState::default()
        },
    );
    print_state("walked", &game);

    // Hold rotate-left for one second (a quarter turn at the default rotate
    // speed), then release; releasing rebuilds the cut around the player.
    run(
        &mut game,
        60,
        InputState {
            is_grounded: true,
            rotate_left: true,
            ..InputState::default()
        },
    );
    print_state("rotating", &game);
    run(&mut game, 1, InputState::default());
    print_state("rebuilt", &game);

    // Walk along the new cross-section.
    run(
        &mut game,
        120,
        InputState {
            move_direction: -1.0,
            ..InputState::default()
        },
    );
    print_state("walked2", &game);

    let key = &game.model().collectibles()[0];
    let d = (key.position() - game.model().player_3d()).norm();
    println!(
        "key '{}' collected={} (distance {:.2})",
        key.name(),
        key.collected(),
        d
    );
}
