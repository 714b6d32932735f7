//! The built-in definition set

use super::{GameData, House, PlayerRace};
use crate::combat::{DamageType, Element};
use crate::dungeon::{TrapFlags, TrapKind};
use crate::monster::{
    BlowEffect, BlowMethod, MonsterBlow, MonsterRace, MonsterSpell, RaceFlags, SpellEffect,
    SpellFlags, SpellKind, SpellLevel,
};
use crate::object::{Artifact, ObjFlags, ObjectKind, Tval};
use crate::player::{
    Ability, AbilitySet, ChangeGrade, GradeChain, TimedDescriptor, TimedEffect, TimedGrade,
    TimedTable,
};
use crate::world::{MessageType, Quest, Redraw};

/// Ceiling of ordinary timed effects
const TIMED_CAP: i32 = 10000;

impl GameData {
    /// A small, self-consistent set of definitions
    pub fn standard() -> Self {
        Self {
            races: races(),
            kinds: kinds(),
            artifacts: artifacts(),
            trap_kinds: trap_kinds(),
            timed: timed_table(),
            spells: spells(),
            player_races: player_races(),
            houses: houses(),
            quests: vec![Quest {
                name: String::from("Morgoth"),
                level: 20,
                race: MORGOTH,
                cur_num: 0,
                max_num: 1,
            }],
        }
    }
}

/// Race index of the final foe
pub const MORGOTH: u16 = 8;

fn blow(method: BlowMethod, effect: BlowEffect, att: i16, dd: u8, ds: u8) -> MonsterBlow {
    MonsterBlow { method, effect, att, dd, ds }
}

fn races() -> Vec<MonsterRace> {
    use BlowEffect as E;
    use BlowMethod as M;
    vec![
        MonsterRace::default(),
        MonsterRace {
            name: String::from("wolf"),
            plural: Some(String::from("wolves")),
            level: 4,
            rarity: 1,
            speed: 2,
            hdice: 4,
            hside: 6,
            evn: 4,
            pd: 1,
            ps: 4,
            sleep: 20,
            per: 5,
            stl: 3,
            will: 1,
            flags: RaceFlags::WOLF | RaceFlags::FRIENDS,
            blows: vec![blow(M::Bite, E::Hurt, 3, 1, 6)],
            ..Default::default()
        },
        MonsterRace {
            name: String::from("orc archer"),
            level: 8,
            rarity: 1,
            speed: 2,
            hdice: 6,
            hside: 10,
            evn: 3,
            pd: 1,
            ps: 6,
            sleep: 30,
            per: 3,
            stl: 2,
            will: 3,
            spell_power: 8,
            mana: 20,
            freq_ranged: 3,
            flags: RaceFlags::ORC | RaceFlags::MALE | RaceFlags::HURT_LITE | RaceFlags::FRIENDS,
            spell_flags: SpellFlags::ARROW1 | SpellFlags::SCARE | SpellFlags::SHRIEK,
            blows: vec![blow(M::Hit, E::Hurt, 6, 1, 8)],
            ..Default::default()
        },
        MonsterRace {
            name: String::from("Gorgol the Cleaver"),
            level: 12,
            rarity: 2,
            speed: 2,
            hdice: 30,
            hside: 10,
            evn: 6,
            pd: 3,
            ps: 4,
            light: 1,
            sleep: 20,
            per: 6,
            stl: 1,
            will: 8,
            spell_power: 12,
            mana: 10,
            freq_ranged: 6,
            flags: RaceFlags::UNIQUE
                | RaceFlags::MALE
                | RaceFlags::ORC
                | RaceFlags::ELFBANE
                | RaceFlags::ESCORTS
                | RaceFlags::RES_CRIT
                | RaceFlags::SMART,
            spell_flags: SpellFlags::RALLY,
            blows: vec![
                blow(M::Hit, E::Wound, 9, 2, 8),
                blow(M::Hit, E::Disarm, 9, 1, 8),
            ],
            ..Default::default()
        },
        MonsterRace {
            name: String::from("cave spider"),
            level: 3,
            rarity: 1,
            speed: 3,
            hdice: 2,
            hside: 4,
            evn: 5,
            per: 4,
            stl: 4,
            flags: RaceFlags::SPIDER | RaceFlags::FRIENDS | RaceFlags::HURT_LITE,
            blows: vec![blow(M::Bite, E::Poison, 4, 1, 4)],
            ..Default::default()
        },
        MonsterRace {
            name: String::from("barrow-wight"),
            level: 14,
            rarity: 2,
            speed: 2,
            hdice: 20,
            hside: 10,
            evn: 8,
            pd: 2,
            ps: 4,
            sleep: 10,
            per: 7,
            stl: 4,
            will: 10,
            spell_power: 14,
            mana: 30,
            freq_ranged: 4,
            flags: RaceFlags::UNDEAD
                | RaceFlags::SEE_INVIS
                | RaceFlags::SMART
                | RaceFlags::NO_FEAR
                | RaceFlags::NO_CONF
                | RaceFlags::RES_COLD,
            spell_flags: SpellFlags::HOLD | SpellFlags::SCARE | SpellFlags::DARKNESS,
            blows: vec![
                blow(M::Touch, E::Terrify, 12, 1, 6),
                blow(M::Hit, E::Hurt, 12, 1, 8),
            ],
            ..Default::default()
        },
        MonsterRace {
            name: String::from("cold-drake"),
            level: 16,
            rarity: 3,
            speed: 2,
            hdice: 40,
            hside: 10,
            evn: 6,
            pd: 4,
            ps: 4,
            sleep: 50,
            per: 6,
            stl: 2,
            will: 8,
            spell_power: 16,
            freq_ranged: 5,
            flags: RaceFlags::DRAGON | RaceFlags::RES_COLD | RaceFlags::NO_CONF,
            spell_flags: SpellFlags::BR_COLD,
            blows: vec![
                blow(M::Bite, E::Hurt, 13, 3, 8),
                blow(M::Claw, E::Hurt, 13, 2, 6),
            ],
            ..Default::default()
        },
        MonsterRace {
            name: String::from("stone-troll"),
            level: 15,
            rarity: 2,
            speed: 2,
            hdice: 30,
            hside: 12,
            evn: 3,
            pd: 4,
            ps: 6,
            sleep: 40,
            per: 3,
            stl: 1,
            will: 4,
            spell_power: 15,
            freq_ranged: 6,
            flags: RaceFlags::TROLL | RaceFlags::MALE | RaceFlags::HURT_LITE,
            spell_flags: SpellFlags::BOULDER,
            blows: vec![
                blow(M::Hit, E::Batter, 12, 3, 8),
                blow(M::Bite, E::Hurt, 12, 2, 6),
            ],
            ..Default::default()
        },
        MonsterRace {
            name: String::from("Morgoth, Lord of Darkness"),
            level: 20,
            rarity: 1,
            speed: 3,
            hdice: 200,
            hside: 10,
            evn: 20,
            pd: 7,
            ps: 6,
            sleep: 0,
            per: 20,
            stl: 1,
            will: 25,
            spell_power: 25,
            mana: 100,
            freq_ranged: 4,
            flags: RaceFlags::UNIQUE
                | RaceFlags::QUESTOR
                | RaceFlags::MALE
                | RaceFlags::SEE_INVIS
                | RaceFlags::NO_FEAR
                | RaceFlags::NO_CONF
                | RaceFlags::NO_STUN
                | RaceFlags::NO_SLEEP
                | RaceFlags::NEVER_MOVE
                | RaceFlags::ELFBANE,
            spell_flags: SpellFlags::SNG_OATHS
                | SpellFlags::SNG_BIND
                | SpellFlags::SNG_PIERCE
                | SpellFlags::EARTHQUAKE
                | SpellFlags::SHATTER
                | SpellFlags::DARKNESS,
            blows: vec![
                blow(M::Hit, E::Shatter, 20, 4, 10),
                blow(M::Hit, E::Shatter, 20, 4, 10),
            ],
            ..Default::default()
        },
        MonsterRace {
            name: String::from("easterling thief"),
            level: 6,
            rarity: 2,
            speed: 2,
            hdice: 5,
            hside: 8,
            evn: 6,
            pd: 1,
            ps: 4,
            sleep: 10,
            per: 5,
            stl: 5,
            will: 2,
            flags: RaceFlags::MAN | RaceFlags::MALE,
            blows: vec![
                blow(M::Touch, E::EatItem, 5, 0, 0),
                blow(M::Hit, E::Hurt, 5, 1, 6),
            ],
            ..Default::default()
        },
    ]
}

fn kind(name: &str, tval: Tval, sval: u8, weight: i16) -> ObjectKind {
    ObjectKind {
        name: name.to_string(),
        tval,
        sval,
        weight,
        ..Default::default()
    }
}

fn kinds() -> Vec<ObjectKind> {
    vec![
        ObjectKind::default(),
        ObjectKind { dd: 1, ds: 7, att: 0, evn: 1, ..kind("Dagger", Tval::Sword, 1, 12) },
        kind("Potion of Cure Light Wounds", Tval::Potion, 1, 4),
        kind("Flask of Oil", Tval::Flask, 1, 10),
        ObjectKind { evn: -1, pd: 0, ps: 4, ..kind("Leather Armour", Tval::SoftArmour, 1, 80) },
        ObjectKind { pd: 1, ps: 3, ..kind("Leather Shield", Tval::Shield, 1, 60) },
        kind("Lembas", Tval::Food, 1, 3),
        ObjectKind { pd: 1, ps: 2, ..kind("Ring of Protection", Tval::Ring, 1, 1) },
        ObjectKind { flags: ObjFlags::PROT_CONF, ..kind("Amulet of Clarity", Tval::Amulet, 1, 3) },
        ObjectKind { pval: 2, ..kind("Wooden Torch", Tval::Light, 1, 30) },
        ObjectKind { dd: 2, ds: 5, att: 1, ..kind("Longsword", Tval::Sword, 2, 30) },
        ObjectKind { ds: 4, ..kind("Iron Crown", Tval::Crown, 1, 40) },
    ]
}

fn artifacts() -> Vec<Artifact> {
    vec![
        Artifact::default(),
        Artifact {
            name: String::from("the Iron Crown of Morgoth"),
            tval: Tval::Crown,
            sval: 1,
            flags: ObjFlags::SEE_INVIS | ObjFlags::PROT_FEAR | ObjFlags::AGGRAVATE,
        },
        Artifact {
            name: String::from("'Anguirel'"),
            tval: Tval::Sword,
            sval: 2,
            flags: ObjFlags::RES_DARK | ObjFlags::SUST_STR,
        },
    ]
}

fn trap_kinds() -> Vec<TrapKind> {
    let trap = |name: &str, desc: &str, flags: TrapFlags, level: u8| TrapKind {
        name: name.to_string(),
        desc: desc.to_string(),
        flags: TrapFlags::TRAP | flags,
        level,
    };
    vec![
        TrapKind::default(),
        trap("pit", "A pit in the floor.", TrapFlags::FLOOR | TrapFlags::PIT, 1),
        trap("trap door", "A trap door to the level below.", TrapFlags::FLOOR | TrapFlags::DOWN, 2),
        trap("web", "A thick spider web.", TrapFlags::WEB | TrapFlags::VISIBLE, 3),
        TrapKind {
            name: String::from("glyph of warding"),
            desc: String::from("A glyph monsters cannot pass."),
            flags: TrapFlags::GLYPH | TrapFlags::VISIBLE,
            level: 0,
        },
    ]
}

fn grade(max: i32, name: &str, up: Option<&str>, down: Option<&str>) -> TimedGrade {
    TimedGrade {
        max,
        name: name.to_string(),
        color: 0,
        up_msg: up.map(String::from),
        down_msg: down.map(String::from),
    }
}

/// A two-band effect: off, then on
fn simple(name: &str, begin: &str, end: &str, msg_type: MessageType) -> TimedDescriptor {
    TimedDescriptor {
        name: name.to_string(),
        on_end: Some(end.to_string()),
        on_increase: None,
        on_decrease: None,
        msg_type,
        fail: None,
        temp_resist: None,
        este: false,
        save: false,
        floor: 0,
        redraw: Redraw::STATUS,
        chain: GradeChain::Graded(vec![
            grade(0, "", None, None),
            grade(TIMED_CAP, name, Some(begin), None),
        ]),
    }
}

fn opposition(elem: Element, word: &str) -> TimedDescriptor {
    TimedDescriptor {
        on_increase: Some(format!("You feel even more resistant to {word}!")),
        temp_resist: Some(elem),
        ..simple(
            &format!("Res{word}"),
            &format!("You feel resistant to {word}!"),
            &format!("You feel less resistant to {word}."),
            MessageType::Resist,
        )
    }
}

fn timed_table() -> TimedTable {
    use TimedEffect as T;
    let mut effects = Vec::with_capacity(crate::player::TMD_MAX);
    for effect in [
        T::Fast,
        T::Slow,
        T::Blind,
        T::Entranced,
        T::Confused,
        T::Afraid,
        T::Image,
        T::Poisoned,
        T::Cut,
        T::Stun,
        T::Rage,
        T::Invis,
        T::SInvis,
        T::OppFire,
        T::OppCold,
        T::OppPois,
        T::Food,
    ] {
        let desc = match effect {
            T::Fast => TimedDescriptor {
                redraw: Redraw::SPEED,
                ..simple("Fast", "You feel yourself moving faster!", "You feel yourself slow down.", MessageType::Fast)
            },
            T::Slow => TimedDescriptor {
                redraw: Redraw::SPEED,
                fail: Some(ObjFlags::FREE_ACT),
                ..simple("Slow", "You feel yourself moving slower!", "You feel yourself speed up.", MessageType::Slow)
            },
            T::Blind => TimedDescriptor {
                fail: Some(ObjFlags::PROT_BLIND),
                redraw: Redraw::STATUS | Redraw::MAP,
                ..simple("Blind", "You are blind.", "You can see again.", MessageType::Blind)
            },
            T::Entranced => TimedDescriptor {
                fail: Some(ObjFlags::FREE_ACT),
                save: true,
                ..simple("Entranced", "You fall into a deep trance!", "You wake from the trance.", MessageType::Entranced)
            },
            T::Confused => TimedDescriptor {
                fail: Some(ObjFlags::PROT_CONF),
                este: true,
                ..simple("Confused", "You are confused!", "You feel less confused now.", MessageType::Confused)
            },
            T::Afraid => TimedDescriptor {
                fail: Some(ObjFlags::PROT_FEAR),
                save: true,
                este: true,
                ..simple("Afraid", "You are terrified!", "You feel bolder now.", MessageType::Afraid)
            },
            T::Image => TimedDescriptor {
                fail: Some(ObjFlags::PROT_HALLU),
                este: true,
                redraw: Redraw::STATUS | Redraw::MAP,
                ..simple("Halluc", "You feel drugged!", "You can see clearly again.", MessageType::Hallu)
            },
            T::Poisoned => TimedDescriptor {
                on_decrease: Some(String::from("You feel a little less poisoned.")),
                ..simple("Poisoned", "You are poisoned!", "You are no longer poisoned.", MessageType::Poisoned)
            },
            T::Cut => cut(),
            T::Stun => stun(),
            T::Rage => simple("Rage", "You feel a sudden rage!", "Your rage subsides.", MessageType::Generic),
            T::Invis => simple("Invis", "You fade from sight!", "You are no longer invisible.", MessageType::Generic),
            T::SInvis => simple(
                "SInvis",
                "Your eyes feel very sensitive!",
                "Your eyes feel less sensitive.",
                MessageType::Generic,
            ),
            T::OppFire => opposition(Element::Fire, "fire"),
            T::OppCold => opposition(Element::Cold, "cold"),
            T::OppPois => opposition(Element::Poison, "poison"),
            T::Food => food(),
        };
        effects.push(desc);
    }
    // The table above is complete and ordered, so building it cannot fail
    match TimedTable::new(effects) {
        Ok(table) => table,
        Err(e) => unreachable!("standard timed table: {e}"),
    }
}

fn cut() -> TimedDescriptor {
    let step = |max: i32, inc: &str, active: Option<&str>| ChangeGrade {
        max,
        inc_msg: inc.to_string(),
        inc_msg_active: active.map(String::from),
    };
    TimedDescriptor {
        name: String::from("Cut"),
        on_end: Some(String::from("You are no longer bleeding.")),
        on_increase: None,
        on_decrease: Some(String::from("Your wound is healing.")),
        msg_type: MessageType::Cut,
        fail: None,
        temp_resist: None,
        este: false,
        save: false,
        floor: 0,
        redraw: Redraw::CUT,
        chain: GradeChain::Changing {
            steps: vec![
                step(10, "You have been given a graze.", Some("Your wound gets a little worse.")),
                step(25, "You have been given a light cut.", Some("Your wound gets worse.")),
                step(50, "You have been given a bad cut.", Some("Your wound gets much worse.")),
                step(100, "You have been given a nasty cut.", Some("Your wound gets far worse.")),
                step(200, "You have been given a severe cut.", None),
                step(1000, "You have been given a mortal wound.", None),
            ],
            max: TIMED_CAP,
            divisor: 2,
        },
    }
}

fn stun() -> TimedDescriptor {
    TimedDescriptor {
        name: String::from("Stun"),
        on_end: Some(String::from("You are no longer stunned.")),
        on_increase: None,
        on_decrease: None,
        msg_type: MessageType::Stun,
        fail: Some(ObjFlags::PROT_STUN),
        temp_resist: None,
        este: false,
        save: false,
        floor: 0,
        redraw: Redraw::STUN,
        chain: GradeChain::Graded(vec![
            grade(0, "", None, None),
            grade(50, "Stun", Some("You have been stunned."), Some("You feel a little less stunned.")),
            grade(
                crate::player::STUN_HEAVY_MAX,
                "Heavy Stun",
                Some("You have been heavily stunned."),
                Some("You regain consciousness."),
            ),
            grade(150, "Knocked Out", Some("You have been knocked out!"), None),
        ]),
    }
}

fn food() -> TimedDescriptor {
    TimedDescriptor {
        name: String::from("Nourishment"),
        on_end: None,
        on_increase: None,
        on_decrease: None,
        msg_type: MessageType::Hungry,
        fail: None,
        temp_resist: None,
        este: false,
        save: false,
        floor: 1,
        redraw: Redraw::HUNGER,
        chain: GradeChain::Graded(vec![
            grade(100, "Starving", None, Some("You are starving!!")),
            grade(1000, "Weak", None, Some("You are getting weak from hunger!")),
            grade(2000, "Hungry", None, Some("You are getting hungry.")),
            grade(8000, "Fed", Some("You are no longer hungry."), None),
            grade(10000, "Full", Some("You are full!"), None),
            grade(20000, "Gorged", Some("You have gorged yourself!"), None),
        ]),
    }
}

fn level(vis: &str, invis: &str) -> SpellLevel {
    SpellLevel {
        power: 0,
        message_vis: vis.to_string(),
        message_invis: invis.to_string(),
        ..Default::default()
    }
}

fn spell(
    flag: SpellFlags,
    name: &str,
    mana: u8,
    range: i32,
    kind: SpellKind,
    levels: Vec<SpellLevel>,
    effect: SpellEffect,
) -> MonsterSpell {
    MonsterSpell {
        flag,
        name: name.to_string(),
        mana,
        range,
        kind,
        levels,
        effect,
    }
}

fn spells() -> Vec<MonsterSpell> {
    use SpellFlags as F;
    use SpellKind as K;
    let bolt = |typ, dd, ds| SpellEffect::Bolt { typ, dd, ds };
    let damage = |typ, dd, ds| SpellEffect::Damage { typ, dd, ds };
    let timed = |effect, base| SpellEffect::Timed { effect, base };
    let saving = |vis: &str, invis: &str, save: &str| SpellLevel {
        message_save: Some(save.to_string()),
        ..level(vis, invis)
    };
    let singing = |vis: &str, invis: &str| SpellLevel {
        message_silence: Some(String::from("{name} tries to sing, but falters.")),
        ..level(vis, invis)
    };

    vec![
        spell(
            F::SHRIEK,
            "shriek",
            0,
            20,
            K::INNATE,
            vec![level("{name} makes a high-pitched shriek.", "Something makes a high-pitched shriek.")],
            SpellEffect::Wake,
        ),
        spell(
            F::SCREECH,
            "screech",
            0,
            20,
            K::INNATE,
            vec![level("{name} screeches.", "Something screeches.")],
            SpellEffect::Wake,
        ),
        spell(
            F::RALLY,
            "rally",
            0,
            20,
            K::INNATE,
            vec![level("{name} rallies {pronoun} companions.", "You hear a rallying cry.")],
            SpellEffect::Rally,
        ),
        spell(
            F::ARROW1,
            "arrow",
            0,
            16,
            K::ARCHERY | K::DISTANT | K::INNATE,
            vec![level("{name} fires an arrow.", "You hear the twang of a bowstring.")],
            bolt(DamageType::Arrow, 1, 7),
        ),
        spell(
            F::ARROW2,
            "heavy arrow",
            0,
            16,
            K::ARCHERY | K::DISTANT | K::INNATE,
            vec![level("{name} fires a heavy arrow.", "You hear the twang of a great bow.")],
            bolt(DamageType::Arrow, 2, 7),
        ),
        spell(
            F::BOULDER,
            "boulder",
            0,
            10,
            K::ARCHERY | K::DISTANT | K::INNATE,
            vec![level("{name} hurls a boulder.", "You hear a grunt of exertion.")],
            bolt(DamageType::Boulder, 4, 6),
        ),
        spell(
            F::BR_FIRE,
            "fire breath",
            0,
            10,
            K::BREATH | K::INNATE,
            vec![level("{name} breathes fire.", "You hear a roar and feel a blast of heat.")],
            damage(DamageType::Fire, 4, 8),
        ),
        spell(
            F::BR_COLD,
            "frost breath",
            0,
            10,
            K::BREATH | K::INNATE,
            vec![level("{name} breathes frost.", "You hear a roar and feel a blast of cold.")],
            damage(DamageType::Cold, 4, 8),
        ),
        spell(
            F::BR_POIS,
            "poison breath",
            0,
            10,
            K::BREATH | K::INNATE,
            vec![level("{name} breathes poison.", "You hear a hiss and choke on foul air.")],
            damage(DamageType::Poison, 4, 8),
        ),
        spell(
            F::BR_DARK,
            "dark breath",
            0,
            10,
            K::BREATH | K::INNATE,
            vec![level("{name} breathes darkness.", "You are engulfed in darkness.")],
            damage(DamageType::Dark, 4, 8),
        ),
        spell(
            F::EARTHQUAKE,
            "earthquake",
            5,
            10,
            K::empty(),
            vec![level(
                "{name} strikes the ground with great force.",
                "You hear a mighty blow.",
            )],
            SpellEffect::Earthquake { radius: 3 },
        ),
        spell(
            F::SHATTER,
            "shatter",
            5,
            10,
            K::empty(),
            vec![level("{name} brings down {pronoun} hammer.", "You hear a crash of stone.")],
            SpellEffect::Shatter { radius: 2 },
        ),
        spell(
            F::SCARE,
            "scare",
            2,
            16,
            K::empty(),
            vec![
                saving("{name} casts a fearful illusion.", "Something makes scary noises.", "You stand your ground."),
                saving(
                    "{name} fills your mind with visions of death.",
                    "A terrible voice whispers of death.",
                    "You refuse to be cowed.",
                )
                .with_power(15),
            ],
            timed(TimedEffect::Afraid, 4),
        ),
        spell(
            F::CONF,
            "confuse",
            2,
            16,
            K::empty(),
            vec![saving("{name} creates a mesmerising illusion.", "Something mumbles.", "You disbelieve the feeble spell.")],
            timed(TimedEffect::Confused, 3),
        ),
        spell(
            F::HOLD,
            "hold",
            4,
            16,
            K::empty(),
            vec![saving("{name} stares deep into your eyes.", "Something whispers to you.", "You resist the enchantment.")],
            timed(TimedEffect::Entranced, 3),
        ),
        spell(
            F::SLOW,
            "slow",
            3,
            16,
            K::empty(),
            vec![saving("{name} drains power from your muscles.", "Something drains power from your muscles.", "You fight off the lethargy.")],
            timed(TimedEffect::Slow, 4),
        ),
        spell(
            F::DARKNESS,
            "darkness",
            2,
            10,
            K::empty(),
            vec![level("{name} gestures in shadow.", "Something mumbles.")],
            SpellEffect::Darkness { radius: 3 },
        ),
        spell(
            F::SNG_BIND,
            "song of binding",
            0,
            16,
            K::SONG,
            vec![singing("{name} sings a song of binding.", "You hear a song of binding.")],
            timed(TimedEffect::Slow, 2),
        ),
        spell(
            F::SNG_PIERCE,
            "song of piercing",
            0,
            16,
            K::SONG,
            vec![singing("{name} sings a piercing song.", "You hear a piercing song.")],
            damage(DamageType::Dark, 2, 8),
        ),
        spell(
            F::SNG_OATHS,
            "song of oaths",
            0,
            16,
            K::SONG,
            vec![singing("{name} sings of broken oaths.", "You hear a song of broken oaths.")],
            SpellEffect::Rally,
        ),
    ]
}

impl SpellLevel {
    fn with_power(self, power: i32) -> Self {
        Self { power, ..self }
    }
}

fn player_races() -> Vec<PlayerRace> {
    vec![
        PlayerRace {
            name: String::from("Noldor"),
            stat_adj: [0, 2, 1, 2],
            skill_adj: [0, 0, 0, 0, 0, 0, 1, 1],
            elven: true,
            start_kit: vec![10, 4, 9, 2],
        },
        PlayerRace {
            name: String::from("Sindar"),
            stat_adj: [-1, 2, 0, 2],
            skill_adj: [0, 1, 0, 1, 1, 0, 0, 1],
            elven: true,
            start_kit: vec![1, 4, 9, 2],
        },
        PlayerRace {
            name: String::from("Naugrim"),
            stat_adj: [2, -1, 3, -1],
            skill_adj: [0, 0, 0, 0, 0, 1, 2, -1],
            elven: false,
            start_kit: vec![10, 4, 5, 9],
        },
        PlayerRace {
            name: String::from("Edain"),
            stat_adj: [1, 0, 1, 0],
            skill_adj: [0; 8],
            elven: false,
            start_kit: vec![10, 4, 9, 6],
        },
    ]
}

fn abilities(list: &[Ability]) -> AbilitySet {
    let mut set = AbilitySet::default();
    for &a in list {
        set.insert(a);
    }
    set
}

fn houses() -> Vec<House> {
    vec![
        House {
            name: String::from("House of Feanor"),
            race: 0,
            stat_adj: [1, 0, 0, 0],
            skill_adj: [0, 0, 0, 0, 0, 0, 1, 0],
            abilities: abilities(&[]),
        },
        House {
            name: String::from("House of Fingolfin"),
            race: 0,
            stat_adj: [0, 0, 1, 0],
            skill_adj: [0, 0, 0, 0, 0, 1, 0, 0],
            abilities: abilities(&[]),
        },
        House {
            name: String::from("People of Doriath"),
            race: 1,
            stat_adj: [0, 0, 0, 1],
            skill_adj: [0, 0, 0, 0, 0, 0, 0, 1],
            abilities: abilities(&[]),
        },
        House {
            name: String::from("House of Nogrod"),
            race: 2,
            stat_adj: [0, 0, 0, 0],
            skill_adj: [0, 0, 0, 0, 0, 0, 1, 0],
            abilities: abilities(&[Ability::Hardiness]),
        },
        House {
            name: String::from("House of Hador"),
            race: 3,
            stat_adj: [1, 0, 0, 0],
            skill_adj: [1, 0, 0, 0, 0, 0, 0, 0],
            abilities: abilities(&[Ability::PoisonResistance]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tables_are_consistent() {
        let data = GameData::standard();
        assert_eq!(data.races[MORGOTH as usize].name, "Morgoth, Lord of Darkness");
        for race in &data.races[1..] {
            assert!(race.blows.len() <= crate::consts::MONSTER_BLOW_MAX, "{}", race.name);
            for flag in race.spell_flags.iter() {
                assert!(data.spell(flag).is_some(), "{} lacks {flag:?}", race.name);
            }
        }
        for house in &data.houses {
            assert!((house.race as usize) < data.player_races.len());
        }
        for race in &data.player_races {
            assert!(race.start_kit.iter().all(|&k| (k as usize) < data.kinds.len()));
        }
    }

    #[test]
    fn test_name_lookup() {
        let data = GameData::standard();
        assert_eq!(data.race_by_name("WOLF").unwrap(), 1);
        assert_eq!(data.kind_by_name("lembas").unwrap(), 6);
        assert!(data.kind_by_name("mithril coat").is_err());
    }
}
