//! Demonstration of gliders on bounded and toroidal worlds
//!
//! A glider on a bounded world crashes into the corner and settles into a
//! block; on a torus it keeps travelling and returns to where it started.

use life_zoo::game_of_life::{zoo, Grid, World};
use life_zoo::utils::GridFormatter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut seed = Grid::square(8);
    seed.merge(&zoo::glider(), 0, 0, false)?;

    for toroidal in [false, true] {
        println!("=== {} world ===\n", if toroidal { "Toroidal" } else { "Bounded" });

        let mut world = World::from_grid(seed.clone());
        println!("{}", GridFormatter::format_generation(&world));
        for _ in 0..4 {
            world.advance(8, toroidal);
            println!("{}", GridFormatter::format_generation(&world));
        }

        println!("Back at the start: {}\n", world.state() == &seed);
    }

    Ok(())
}
