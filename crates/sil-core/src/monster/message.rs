//! Monster descriptions and message templates
//!
//! Templates carry `{tag}` placeholders filled in from the acting monster.
//! The player is always the target of monster messages.

use super::{BlowMethod, MonsterId};
use crate::world::World;

/// Describe a monster the way a message refers to it
///
/// Unseen monsters are "it"; uniques go by name, others by "the" and
/// their race name.
pub fn monster_desc(world: &World, mid: MonsterId, capital: bool) -> String {
    let visible = world.monsters.get(mid).is_some_and(|m| m.ml);
    let desc = match world.monster_race(mid) {
        Some(race) if visible && race.is_unique() => race.name.clone(),
        Some(race) if visible => format!("the {}", race.name),
        _ => String::from("it"),
    };
    if capital { capitalize(&desc) } else { desc }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// At the start of the text or of a sentence within it
fn sentence_leading(out: &str) -> bool {
    let trimmed = out.trim_end();
    trimmed.is_empty() || trimmed.ends_with(['.', '!', '?'])
}

/// Fill in `{tag}` placeholders for a monster acting on the player
pub fn expand_message(world: &World, mid: MonsterId, template: &str) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            rest = "";
            break;
        };
        let tag = &after[..close];
        rest = &after[close + 1..];

        let leading = sentence_leading(&out);
        let text = match tag {
            "name" => monster_desc(world, mid, leading),
            "pronoun" => {
                let p = world.monster_race(mid).map_or("its", |r| r.possessive());
                if leading { capitalize(p) } else { p.to_string() }
            }
            "target" => String::from(if leading { "You" } else { "you" }),
            "oftarget" => String::from(if leading { "Your" } else { "your" }),
            "has" | "have" => String::from("have"),
            _ => {
                log::warn!("unknown message tag {{{tag}}}");
                format!("{{{tag}}}")
            }
        };
        out.push_str(&text);

        // Keep words apart when a tag runs straight into the next one
        if rest.starts_with(|c: char| c.is_alphanumeric()) {
            out.push(' ');
        }
    }
    out.push_str(rest);
    out
}

/// The message shown when a monster lands a blow
pub fn monster_blow_method_action(world: &World, mid: MonsterId, method: BlowMethod) -> String {
    let mut template = format!("{{name}} {}", method.action());
    if !template.ends_with(['.', '!', '?']) {
        template.push('.');
    }
    expand_message(world, mid, &template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameData;
    use crate::dungeon::Loc;
    use crate::monster::{Monster, RaceFlags};
    use crate::rng::GameRng;
    use std::sync::Arc;

    fn world_with(race: usize, ml: bool) -> (World, MonsterId) {
        let mut w = World::new(Arc::new(GameData::standard()), GameRng::new(1));
        let mid = w
            .place_monster(Monster {
                race: race as u16,
                hp: 5,
                maxhp: 5,
                grid: Loc::new(3, 3),
                ml,
                ..Default::default()
            })
            .unwrap();
        (w, mid)
    }

    #[test]
    fn test_monster_desc() {
        let (w, mid) = world_with(1, true);
        let name = &w.data.races[1].name;
        assert_eq!(monster_desc(&w, mid, false), format!("the {name}"));
        assert!(monster_desc(&w, mid, true).starts_with("The "));
        let (w, mid) = world_with(1, false);
        assert_eq!(monster_desc(&w, mid, true), "It");
    }

    #[test]
    fn test_unique_goes_by_name() {
        let data = GameData::standard();
        let unique = data
            .races
            .iter()
            .position(|r| r.flags.contains(RaceFlags::UNIQUE))
            .unwrap();
        let (w, mid) = world_with(unique, true);
        assert_eq!(monster_desc(&w, mid, false), w.data.races[unique].name);
    }

    #[test]
    fn test_expand_tags() {
        let (w, mid) = world_with(1, false);
        assert_eq!(expand_message(&w, mid, "{name} bites {target}."), "It bites you.");
        assert_eq!(
            expand_message(&w, mid, "{target} {have} been seen. {oftarget} pack is light."),
            "You have been seen. Your pack is light."
        );
        assert_eq!(expand_message(&w, mid, "{name}screams"), "It screams");
        assert_eq!(expand_message(&w, mid, "{name}, {pronoun} eyes"), "It, its eyes");
        assert_eq!(expand_message(&w, mid, "odd {tag"), "odd {tag");
    }

    #[test]
    fn test_blow_action() {
        let (w, mid) = world_with(1, false);
        assert_eq!(monster_blow_method_action(&w, mid, BlowMethod::Hit), "It hits you.");
        assert_eq!(monster_blow_method_action(&w, mid, BlowMethod::Insult), "It insults you!");
    }
}
