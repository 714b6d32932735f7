//! Damage types and elements

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr};

use crate::monster::RaceFlags;
use crate::object::ObjFlags;
use crate::player::TimedEffect;

/// Elements an object can carry percentage resistance against; the
/// discriminant indexes `Object::percent_res`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, FromRepr,
)]
#[repr(u8)]
pub enum Element {
    Fire = 0,
    Cold = 1,
    Poison = 2,
    Dark = 3,
    Light = 4,
}

impl Element {
    /// Object flag granting resistance
    pub const fn res_flag(self) -> ObjFlags {
        match self {
            Element::Fire => ObjFlags::RES_FIRE,
            Element::Cold => ObjFlags::RES_COLD,
            Element::Poison => ObjFlags::RES_POIS,
            Element::Dark => ObjFlags::RES_DARK,
            Element::Light => ObjFlags::empty(),
        }
    }

    /// Race flag granting resistance
    pub const fn race_flag(self) -> RaceFlags {
        match self {
            Element::Fire => RaceFlags::RES_FIRE,
            Element::Cold => RaceFlags::RES_COLD,
            Element::Poison => RaceFlags::RES_POIS,
            Element::Dark | Element::Light => RaceFlags::empty(),
        }
    }

    /// Timed effect giving temporary resistance
    pub const fn temp_effect(self) -> Option<TimedEffect> {
        match self {
            Element::Fire => Some(TimedEffect::OppFire),
            Element::Cold => Some(TimedEffect::OppCold),
            Element::Poison => Some(TimedEffect::OppPois),
            Element::Dark | Element::Light => None,
        }
    }
}

/// What kind of harm an attack does
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
    FromRepr,
)]
#[repr(u8)]
pub enum DamageType {
    /// Plain physical damage
    #[default]
    Hurt = 0,
    Arrow = 1,
    Boulder = 2,
    Fire = 3,
    Cold = 4,
    Poison = 5,
    Dark = 6,
    Light = 7,
}

impl DamageType {
    pub const fn element(self) -> Option<Element> {
        match self {
            DamageType::Fire => Some(Element::Fire),
            DamageType::Cold => Some(Element::Cold),
            DamageType::Poison => Some(Element::Poison),
            DamageType::Dark => Some(Element::Dark),
            DamageType::Light => Some(Element::Light),
            DamageType::Hurt | DamageType::Arrow | DamageType::Boulder => None,
        }
    }
}
