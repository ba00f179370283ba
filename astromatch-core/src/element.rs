//! Five-element (Wu Xing) phases derived from the birth year.
//!
//! The heavenly-stem cycle assigns each element to two consecutive years,
//! repeating every decade. Elements relate through the generating (Sheng)
//! and restraining (Ke) cycles.
//!
//! # Examples
//! ```
//! use astromatch_core::{YearElement, YearRelation};
//!
//! let wood = YearElement::from_year(1984);
//! assert_eq!(wood, YearElement::Wood);
//! assert_eq!(wood.generates(), YearElement::Fire);
//! assert_eq!(wood.relation_to(YearElement::Earth), YearRelation::Clashing);
//! ```

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Element of the Chinese birth year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum YearElement {
    /// Years ending in 4 or 5.
    Wood,
    /// Years ending in 6 or 7.
    Fire,
    /// Years ending in 8 or 9.
    Earth,
    /// Years ending in 0 or 1.
    Metal,
    /// Years ending in 2 or 3.
    Water,
}

impl YearElement {
    /// All elements in generating order.
    pub const ALL: [Self; 5] = [Self::Wood, Self::Fire, Self::Earth, Self::Metal, Self::Water];

    /// Resolve the element for a Gregorian year, anchored at 1984 (Wood).
    #[must_use]
    pub const fn from_year(year: i32) -> Self {
        match year.rem_euclid(10) {
            4 | 5 => Self::Wood,
            6 | 7 => Self::Fire,
            8 | 9 => Self::Earth,
            0 | 1 => Self::Metal,
            _ => Self::Water,
        }
    }

    /// The element this one generates (Sheng cycle).
    #[must_use]
    pub const fn generates(self) -> Self {
        match self {
            Self::Wood => Self::Fire,
            Self::Fire => Self::Earth,
            Self::Earth => Self::Metal,
            Self::Metal => Self::Water,
            Self::Water => Self::Wood,
        }
    }

    /// The element this one restrains (Ke cycle).
    #[must_use]
    pub const fn restrains(self) -> Self {
        match self {
            Self::Wood => Self::Earth,
            Self::Earth => Self::Water,
            Self::Water => Self::Fire,
            Self::Fire => Self::Metal,
            Self::Metal => Self::Wood,
        }
    }

    /// Classify the relation between two year elements, independent of order.
    #[must_use]
    pub fn relation_to(self, other: Self) -> YearRelation {
        if self == other {
            YearRelation::Same
        } else if self.generates() == other || other.generates() == self {
            YearRelation::Supportive
        } else {
            // On the pentagon every non-adjacent pair lies on the Ke cycle.
            YearRelation::Clashing
        }
    }

    /// Return the element as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Fire => "fire",
            Self::Earth => "earth",
            Self::Metal => "metal",
            Self::Water => "water",
        }
    }
}

impl fmt::Display for YearElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relation between two year elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum YearRelation {
    /// Both people share the element.
    Same,
    /// One element generates the other.
    Supportive,
    /// One element restrains the other.
    Clashing,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1984, YearElement::Wood)]
    #[case(1985, YearElement::Wood)]
    #[case(1986, YearElement::Fire)]
    #[case(1988, YearElement::Earth)]
    #[case(1990, YearElement::Metal)]
    #[case(1992, YearElement::Water)]
    #[case(1993, YearElement::Water)]
    #[case(1974, YearElement::Wood)]
    #[case(-6, YearElement::Wood)]
    fn stem_cycle_repeats_every_decade(#[case] year: i32, #[case] expected: YearElement) {
        assert_eq!(YearElement::from_year(year), expected);
    }

    #[rstest]
    fn cycles_are_disjoint_five_cycles() {
        for element in YearElement::ALL {
            assert_ne!(element.generates(), element.restrains());
            let mut generated = element;
            let mut restrained = element;
            for _ in 0..5 {
                generated = generated.generates();
                restrained = restrained.restrains();
            }
            assert_eq!(generated, element);
            assert_eq!(restrained, element);
        }
    }

    #[rstest]
    fn relation_is_symmetric_and_total() {
        for a in YearElement::ALL {
            for b in YearElement::ALL {
                assert_eq!(a.relation_to(b), b.relation_to(a));
                let expected_clash = a.restrains() == b || b.restrains() == a;
                assert_eq!(a.relation_to(b) == YearRelation::Clashing, expected_clash);
            }
        }
    }
}
