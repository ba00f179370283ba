//! Western zodiac signs with their elements and modalities.
//!
//! Signs are resolved from fixed tropical calendar ranges rather than
//! astronomical positions, so a given day always maps to the same sign
//! regardless of the year.
//!
//! # Examples
//! ```
//! use astromatch_core::{Element, Modality, WesternSign};
//!
//! assert_eq!(WesternSign::Libra.element(), Element::Air);
//! assert_eq!(WesternSign::Libra.modality(), Modality::Cardinal);
//! assert_eq!(WesternSign::Libra.as_str(), "libra");
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::SignatureError;

/// Classical element of a Western sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Element {
    /// Aries, Leo and Sagittarius.
    Fire,
    /// Taurus, Virgo and Capricorn.
    Earth,
    /// Gemini, Libra and Aquarius.
    Air,
    /// Cancer, Scorpio and Pisces.
    Water,
}

impl Element {
    /// All elements in declaration order.
    pub const ALL: [Self; 4] = [Self::Fire, Self::Earth, Self::Air, Self::Water];

    /// Return the element as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::Earth => "earth",
            Self::Air => "air",
            Self::Water => "water",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Modality (quality) of a Western sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Modality {
    /// Initiating signs.
    Cardinal,
    /// Stabilising signs.
    Fixed,
    /// Adapting signs.
    Mutable,
}

impl Modality {
    /// Return the modality as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cardinal => "cardinal",
            Self::Fixed => "fixed",
            Self::Mutable => "mutable",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the twelve Western zodiac signs, in wheel order from Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WesternSign {
    /// March 21 to April 19.
    Aries,
    /// April 20 to May 20.
    Taurus,
    /// May 21 to June 20.
    Gemini,
    /// June 21 to July 22.
    Cancer,
    /// July 23 to August 22.
    Leo,
    /// August 23 to September 22.
    Virgo,
    /// September 23 to October 22.
    Libra,
    /// October 23 to November 21.
    Scorpio,
    /// November 22 to December 21.
    Sagittarius,
    /// December 22 to January 19.
    Capricorn,
    /// January 20 to February 18.
    Aquarius,
    /// February 19 to March 20.
    Pisces,
}

impl WesternSign {
    /// All signs in wheel order.
    pub const ALL: [Self; 12] = [
        Self::Aries,
        Self::Taurus,
        Self::Gemini,
        Self::Cancer,
        Self::Leo,
        Self::Virgo,
        Self::Libra,
        Self::Scorpio,
        Self::Sagittarius,
        Self::Capricorn,
        Self::Aquarius,
        Self::Pisces,
    ];

    /// Classical element of the sign.
    #[must_use]
    pub const fn element(self) -> Element {
        match self {
            Self::Aries | Self::Leo | Self::Sagittarius => Element::Fire,
            Self::Taurus | Self::Virgo | Self::Capricorn => Element::Earth,
            Self::Gemini | Self::Libra | Self::Aquarius => Element::Air,
            Self::Cancer | Self::Scorpio | Self::Pisces => Element::Water,
        }
    }

    /// Modality of the sign.
    #[must_use]
    pub const fn modality(self) -> Modality {
        match self {
            Self::Aries | Self::Cancer | Self::Libra | Self::Capricorn => Modality::Cardinal,
            Self::Taurus | Self::Leo | Self::Scorpio | Self::Aquarius => Modality::Fixed,
            Self::Gemini | Self::Virgo | Self::Sagittarius | Self::Pisces => Modality::Mutable,
        }
    }

    /// Position on the zodiac wheel, Aries being `0`.
    #[must_use]
    pub const fn wheel_index(self) -> u8 {
        match self {
            Self::Aries => 0,
            Self::Taurus => 1,
            Self::Gemini => 2,
            Self::Cancer => 3,
            Self::Leo => 4,
            Self::Virgo => 5,
            Self::Libra => 6,
            Self::Scorpio => 7,
            Self::Sagittarius => 8,
            Self::Capricorn => 9,
            Self::Aquarius => 10,
            Self::Pisces => 11,
        }
    }

    /// Shortest distance between two signs around the wheel, in `0..=6`.
    #[must_use]
    pub const fn wheel_distance(self, other: Self) -> u8 {
        let diff = self.wheel_index().abs_diff(other.wheel_index());
        if diff > 6 { 12 - diff } else { diff }
    }

    /// Return the sign as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aries => "aries",
            Self::Taurus => "taurus",
            Self::Gemini => "gemini",
            Self::Cancer => "cancer",
            Self::Leo => "leo",
            Self::Virgo => "virgo",
            Self::Libra => "libra",
            Self::Scorpio => "scorpio",
            Self::Sagittarius => "sagittarius",
            Self::Capricorn => "capricorn",
            Self::Aquarius => "aquarius",
            Self::Pisces => "pisces",
        }
    }

    /// Resolve the sign for a calendar day.
    ///
    /// Boundaries are inclusive start dates of the tropical ranges, so every
    /// day of every year maps to exactly one sign. The year is ignored.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use astromatch_core::WesternSign;
    ///
    /// let date = NaiveDate::from_ymd_opt(1990, 3, 21).ok_or("valid date")?;
    /// assert_eq!(WesternSign::from_date(date), WesternSign::Aries);
    /// # Ok::<(), &'static str>(())
    /// ```
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_month_day(date.month(), date.day())
    }

    /// Resolve the sign from a month (`1..=12`) and day of month.
    ///
    /// Out-of-range values still resolve: the pair is read as a `MMDD`
    /// stamp, and anything past December 21 is Capricorn.
    #[must_use]
    pub const fn from_month_day(month: u32, day: u32) -> Self {
        let stamp = month.saturating_mul(100).saturating_add(day);
        match stamp {
            0..=119 => Self::Capricorn,
            120..=218 => Self::Aquarius,
            219..=320 => Self::Pisces,
            321..=419 => Self::Aries,
            420..=520 => Self::Taurus,
            521..=620 => Self::Gemini,
            621..=722 => Self::Cancer,
            723..=822 => Self::Leo,
            823..=922 => Self::Virgo,
            923..=1022 => Self::Libra,
            1023..=1121 => Self::Scorpio,
            1122..=1221 => Self::Sagittarius,
            _ => Self::Capricorn,
        }
    }
}

impl fmt::Display for WesternSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WesternSign {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|sign| sign.as_str() == lowered)
            .ok_or_else(|| SignatureError::UnknownWesternSign {
                input: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 19, WesternSign::Capricorn)]
    #[case(1, 20, WesternSign::Aquarius)]
    #[case(2, 18, WesternSign::Aquarius)]
    #[case(2, 19, WesternSign::Pisces)]
    #[case(2, 29, WesternSign::Pisces)]
    #[case(3, 20, WesternSign::Pisces)]
    #[case(3, 21, WesternSign::Aries)]
    #[case(11, 21, WesternSign::Scorpio)]
    #[case(11, 22, WesternSign::Sagittarius)]
    #[case(12, 21, WesternSign::Sagittarius)]
    #[case(12, 22, WesternSign::Capricorn)]
    #[case(12, 31, WesternSign::Capricorn)]
    fn boundaries_are_inclusive_start_dates(
        #[case] month: u32,
        #[case] day: u32,
        #[case] expected: WesternSign,
    ) {
        assert_eq!(WesternSign::from_month_day(month, day), expected);
    }

    #[rstest]
    #[case(WesternSign::Aries, WesternSign::Aries, 0)]
    #[case(WesternSign::Aries, WesternSign::Libra, 6)]
    #[case(WesternSign::Aries, WesternSign::Pisces, 1)]
    #[case(WesternSign::Taurus, WesternSign::Capricorn, 4)]
    #[case(WesternSign::Gemini, WesternSign::Pisces, 3)]
    fn wheel_distance_wraps(#[case] a: WesternSign, #[case] b: WesternSign, #[case] expected: u8) {
        assert_eq!(a.wheel_distance(b), expected);
        assert_eq!(b.wheel_distance(a), expected);
    }

    #[rstest]
    fn each_element_has_three_signs() {
        for element in Element::ALL {
            let count = WesternSign::ALL
                .iter()
                .filter(|sign| sign.element() == element)
                .count();
            assert_eq!(count, 3, "{element} should own three signs");
        }
    }

    #[rstest]
    fn parsing_is_case_insensitive() {
        assert_eq!("Scorpio".parse::<WesternSign>(), Ok(WesternSign::Scorpio));
        assert_eq!(" PISCES ".parse::<WesternSign>(), Ok(WesternSign::Pisces));
    }

    #[rstest]
    fn parsing_rejects_unknown() {
        let err = "ophiuchus".parse::<WesternSign>();
        assert_eq!(
            err,
            Err(SignatureError::UnknownWesternSign {
                input: "ophiuchus".to_owned()
            })
        );
    }
}
