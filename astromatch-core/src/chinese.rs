//! Chinese zodiac animals and their fixed affinities.
//!
//! Animals sit on a 12-step cycle starting at the Rat. Trines, secret
//! friends, allies and opposites are all properties of that cycle, so every
//! relation defined here is symmetric.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::SignatureError;

/// Harmonious group of three animals spaced four steps apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TrineGroup {
    /// Rat, Dragon and Monkey.
    Visionaries,
    /// Ox, Snake and Rooster.
    Strategists,
    /// Tiger, Horse and Dog.
    Adventurers,
    /// Rabbit, Goat and Pig.
    Artists,
}

impl TrineGroup {
    /// Return the group name as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Visionaries => "visionaries",
            Self::Strategists => "strategists",
            Self::Adventurers => "adventurers",
            Self::Artists => "artists",
        }
    }
}

/// Yin/yang polarity of an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Polarity {
    /// Outgoing, fast-tempo animals.
    Yang,
    /// Receptive, steady animals.
    Yin,
}

/// One of the twelve animals of the Chinese zodiac, in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChineseAnimal {
    /// Cycle position 0.
    Rat,
    /// Cycle position 1.
    Ox,
    /// Cycle position 2.
    Tiger,
    /// Cycle position 3.
    Rabbit,
    /// Cycle position 4.
    Dragon,
    /// Cycle position 5.
    Snake,
    /// Cycle position 6.
    Horse,
    /// Cycle position 7. Also known as the Sheep.
    #[cfg_attr(feature = "serde", serde(alias = "sheep"))]
    Goat,
    /// Cycle position 8.
    Monkey,
    /// Cycle position 9.
    Rooster,
    /// Cycle position 10.
    Dog,
    /// Cycle position 11.
    Pig,
}

impl ChineseAnimal {
    /// All animals in cycle order.
    pub const ALL: [Self; 12] = [
        Self::Rat,
        Self::Ox,
        Self::Tiger,
        Self::Rabbit,
        Self::Dragon,
        Self::Snake,
        Self::Horse,
        Self::Goat,
        Self::Monkey,
        Self::Rooster,
        Self::Dog,
        Self::Pig,
    ];

    /// Resolve the animal for a Gregorian year.
    ///
    /// The mapping is `(year - 4) mod 12` on the cycle, so 1900, 1984 and
    /// 2020 are all Rat years. It is total over every `i32`.
    ///
    /// The lunar new year is not taken into account: someone born in
    /// January or early February is assigned the animal of the Gregorian
    /// year, not of the preceding lunar year.
    ///
    /// # Examples
    /// ```
    /// use astromatch_core::ChineseAnimal;
    ///
    /// assert_eq!(ChineseAnimal::from_year(1984), ChineseAnimal::Rat);
    /// assert_eq!(ChineseAnimal::from_year(1990), ChineseAnimal::Horse);
    /// assert_eq!(ChineseAnimal::from_year(-8), ChineseAnimal::Rat);
    /// ```
    #[must_use]
    pub const fn from_year(year: i32) -> Self {
        // Year 4 is a Rat year; shift the residue so it lands on index 0.
        match year.rem_euclid(12) {
            4 => Self::Rat,
            5 => Self::Ox,
            6 => Self::Tiger,
            7 => Self::Rabbit,
            8 => Self::Dragon,
            9 => Self::Snake,
            10 => Self::Horse,
            11 => Self::Goat,
            0 => Self::Monkey,
            1 => Self::Rooster,
            2 => Self::Dog,
            _ => Self::Pig,
        }
    }

    /// Return the animal at `index` on the cycle, wrapping past the Pig.
    #[must_use]
    pub const fn from_cycle_index(index: u8) -> Self {
        match index.rem_euclid(12) {
            0 => Self::Rat,
            1 => Self::Ox,
            2 => Self::Tiger,
            3 => Self::Rabbit,
            4 => Self::Dragon,
            5 => Self::Snake,
            6 => Self::Horse,
            7 => Self::Goat,
            8 => Self::Monkey,
            9 => Self::Rooster,
            10 => Self::Dog,
            _ => Self::Pig,
        }
    }

    /// Position on the cycle, Rat being `0`.
    #[must_use]
    pub const fn cycle_index(self) -> u8 {
        match self {
            Self::Rat => 0,
            Self::Ox => 1,
            Self::Tiger => 2,
            Self::Rabbit => 3,
            Self::Dragon => 4,
            Self::Snake => 5,
            Self::Horse => 6,
            Self::Goat => 7,
            Self::Monkey => 8,
            Self::Rooster => 9,
            Self::Dog => 10,
            Self::Pig => 11,
        }
    }

    /// Shortest number of steps between two animals on the cycle, in `0..=6`.
    #[must_use]
    pub const fn cycle_distance(self, other: Self) -> u8 {
        let diff = self.cycle_index().abs_diff(other.cycle_index());
        if diff > 6 { 12 - diff } else { diff }
    }

    /// Trine group containing the animal.
    #[must_use]
    pub const fn trine(self) -> TrineGroup {
        match self {
            Self::Rat | Self::Dragon | Self::Monkey => TrineGroup::Visionaries,
            Self::Ox | Self::Snake | Self::Rooster => TrineGroup::Strategists,
            Self::Tiger | Self::Horse | Self::Dog => TrineGroup::Adventurers,
            Self::Rabbit | Self::Goat | Self::Pig => TrineGroup::Artists,
        }
    }

    /// The animal's one-to-one secret friend.
    #[must_use]
    pub const fn secret_friend(self) -> Self {
        match self {
            Self::Rat => Self::Ox,
            Self::Ox => Self::Rat,
            Self::Tiger => Self::Pig,
            Self::Pig => Self::Tiger,
            Self::Rabbit => Self::Dog,
            Self::Dog => Self::Rabbit,
            Self::Dragon => Self::Rooster,
            Self::Rooster => Self::Dragon,
            Self::Snake => Self::Monkey,
            Self::Monkey => Self::Snake,
            Self::Horse => Self::Goat,
            Self::Goat => Self::Horse,
        }
    }

    /// The animal six steps away on the cycle.
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::from_cycle_index(self.cycle_index() + 6)
    }

    /// The two allies two steps either side on the cycle.
    ///
    /// Allies always belong to the paired trine (Visionaries with
    /// Adventurers, Strategists with Artists) and never coincide with a
    /// trine-mate, the secret friend or the opposite.
    #[must_use]
    pub const fn allies(self) -> [Self; 2] {
        let index = self.cycle_index();
        [
            Self::from_cycle_index(index + 2),
            Self::from_cycle_index(index + 10),
        ]
    }

    /// Report whether `other` is one of this animal's allies.
    #[must_use]
    pub const fn is_ally_of(self, other: Self) -> bool {
        self.cycle_distance(other) == 2
    }

    /// Yin/yang polarity, alternating around the cycle from a yang Rat.
    #[must_use]
    pub const fn polarity(self) -> Polarity {
        match self {
            Self::Rat | Self::Tiger | Self::Dragon | Self::Horse | Self::Monkey | Self::Dog => {
                Polarity::Yang
            }
            Self::Ox | Self::Rabbit | Self::Snake | Self::Goat | Self::Rooster | Self::Pig => {
                Polarity::Yin
            }
        }
    }

    /// Return the animal as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rat => "rat",
            Self::Ox => "ox",
            Self::Tiger => "tiger",
            Self::Rabbit => "rabbit",
            Self::Dragon => "dragon",
            Self::Snake => "snake",
            Self::Horse => "horse",
            Self::Goat => "goat",
            Self::Monkey => "monkey",
            Self::Rooster => "rooster",
            Self::Dog => "dog",
            Self::Pig => "pig",
        }
    }
}

impl fmt::Display for ChineseAnimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChineseAnimal {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        if lowered == "sheep" {
            return Ok(Self::Goat);
        }
        Self::ALL
            .into_iter()
            .find(|animal| animal.as_str() == lowered)
            .ok_or_else(|| SignatureError::UnknownAnimal {
                input: s.to_owned(),
            })
    }
}
