//! Earthquakes

use super::{Feat, Loc};
use crate::world::{Redraw, Update, World};

/// Chance in one of a shaken square collapsing
const QUAKE_ODDS: i32 = 3;

/// Shake the squares around `centre`, collapsing some into rubble
///
/// Occupied squares, squares holding objects or traps, and permanent
/// features are left alone. Returns the number of squares changed.
pub fn earthquake(world: &mut World, centre: Loc, radius: i32) -> usize {
    let mut changed = 0;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let grid = centre.offset(dy, dx);
            if grid == centre || centre.distance(grid) > radius {
                continue;
            }
            if !world.cave.in_bounds_fully(grid) {
                continue;
            }
            if !matches!(world.cave.feat(grid), Feat::Floor | Feat::Granite | Feat::Quartz) {
                continue;
            }
            if world.cave.monster(grid) != 0
                || !world.cave.object(grid).is_none()
                || world.traps.at(grid).next().is_some()
            {
                continue;
            }
            if world.rng.one_in(QUAKE_ODDS) {
                world.cave.set_feat(grid, Feat::Rubble);
                changed += 1;
            }
        }
    }
    if changed > 0 {
        log::debug!("earthquake at {centre:?} changed {changed} squares");
        world.upkeep.update |= Update::VIEW;
        world.upkeep.redraw |= Redraw::MAP;
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameData;
    use crate::monster::Monster;
    use crate::rng::GameRng;
    use std::sync::Arc;

    #[test]
    fn test_quake_spares_occupied_squares() {
        let mut w = World::new(Arc::new(GameData::standard()), GameRng::fixed(&[0; 64]));
        w.cave.fill(Loc::new(1, 1), Loc::new(9, 9), Feat::Floor);
        w.place_player(Loc::new(5, 5));
        w.place_monster(Monster { race: 1, hp: 1, maxhp: 1, grid: Loc::new(5, 6), ..Default::default() })
            .unwrap();
        // every roll collapses its square
        let n = earthquake(&mut w, Loc::new(5, 5), 1);
        assert_eq!(n, 7);
        assert_eq!(w.cave.feat(Loc::new(5, 5)), Feat::Floor);
        assert_eq!(w.cave.feat(Loc::new(5, 6)), Feat::Floor);
        assert_eq!(w.cave.feat(Loc::new(4, 4)), Feat::Rubble);
    }
}
