//! Astrological signatures and the keys used to address them.
//!
//! A [`Signature`] combines a Western sign with a Chinese animal and,
//! when derived from a birth date, the year element. Signatures are plain
//! values: two signatures built from the same inputs are equal.
//!
//! # Examples
//! ```
//! use astromatch_core::{BirthDate, ChineseAnimal, PairKey, Signature, WesternSign};
//!
//! # fn main() -> Result<(), astromatch_core::SignatureError> {
//! let date = BirthDate::parse("1992-10-01")?;
//! let signature = Signature::from_birth_date(date);
//! assert_eq!(signature.west(), WesternSign::Libra);
//! assert_eq!(signature.east(), ChineseAnimal::Monkey);
//! assert_eq!(signature.key(), "libra_monkey");
//!
//! let other: Signature = "aquarius_rat".parse()?;
//! let key = PairKey::new(signature, other);
//! assert_eq!(key.as_str(), "aquarius_rat|libra_monkey");
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ChineseAnimal, SignatureError, WesternSign, YearElement};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A validated Gregorian birth date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    /// Parse an ISO `YYYY-MM-DD` date.
    ///
    /// # Errors
    /// Returns [`SignatureError::InvalidDate`] when the text is not a valid
    /// calendar date.
    pub fn parse(input: &str) -> Result<Self, SignatureError> {
        NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|source| SignatureError::InvalidDate {
                input: input.to_owned(),
                source,
            })
    }

    /// Build a date from its components.
    ///
    /// # Errors
    /// Returns [`SignatureError::OutOfRangeDate`] when the components do not
    /// name a real day, such as February 30.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, SignatureError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(SignatureError::OutOfRangeDate { year, month, day })
    }

    /// Gregorian year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Underlying `chrono` date.
    #[must_use]
    pub const fn as_naive(self) -> NaiveDate {
        self.0
    }

    /// Western sign for the day.
    #[must_use]
    pub fn western_sign(self) -> WesternSign {
        WesternSign::from_date(self.0)
    }

    /// Chinese animal for the Gregorian year.
    ///
    /// See [`ChineseAnimal::from_year`] for the lunar new-year caveat.
    #[must_use]
    pub fn chinese_animal(self) -> ChineseAnimal {
        ChineseAnimal::from_year(self.year())
    }
}

impl From<NaiveDate> for BirthDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl FromStr for BirthDate {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// A person's astrological signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Signature {
    west: WesternSign,
    east: ChineseAnimal,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    year_element: Option<YearElement>,
}

impl Signature {
    /// Build a signature without a year element.
    #[must_use]
    pub const fn new(west: WesternSign, east: ChineseAnimal) -> Self {
        Self {
            west,
            east,
            year_element: None,
        }
    }

    /// Attach a year element.
    #[must_use]
    pub const fn with_year_element(mut self, element: YearElement) -> Self {
        self.year_element = Some(element);
        self
    }

    /// Derive the full signature, including year element, from a birth date.
    #[must_use]
    pub fn from_birth_date(date: BirthDate) -> Self {
        Self::new(date.western_sign(), date.chinese_animal())
            .with_year_element(YearElement::from_year(date.year()))
    }

    /// Western sign.
    #[must_use]
    pub const fn west(self) -> WesternSign {
        self.west
    }

    /// Chinese animal.
    #[must_use]
    pub const fn east(self) -> ChineseAnimal {
        self.east
    }

    /// Year element, when the signature came from a birth date.
    #[must_use]
    pub const fn year_element(self) -> Option<YearElement> {
        self.year_element
    }

    /// Drop the year element, keeping sign and animal.
    #[must_use]
    pub const fn without_year_element(self) -> Self {
        Self::new(self.west, self.east)
    }

    /// Lowercase `{west}_{east}` key. The year element is not part of it.
    #[must_use]
    pub fn key(self) -> String {
        format!("{}_{}", self.west.as_str(), self.east.as_str())
    }

    /// Every year-less signature, ordered by sign then animal.
    pub fn all() -> impl Iterator<Item = Self> {
        WesternSign::ALL.into_iter().flat_map(|west| {
            ChineseAnimal::ALL
                .into_iter()
                .map(move |east| Self::new(west, east))
        })
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.west, self.east)
    }
}

impl FromStr for Signature {
    type Err = SignatureError;

    /// Parse a `{west}_{east}` key, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (west, east) = s
            .trim()
            .split_once('_')
            .ok_or_else(|| SignatureError::MalformedKey {
                input: s.to_owned(),
            })?;
        Ok(Self::new(west.parse()?, east.parse()?))
    }
}

/// Order-independent identifier for a pair of signatures.
///
/// The two signature keys are sorted lexicographically, so `A|B` and `B|A`
/// produce the same key. Writers and readers of cached results must both go
/// through this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct PairKey(String);

impl PairKey {
    /// Build the normalised key for two signatures.
    #[must_use]
    pub fn new(a: Signature, b: Signature) -> Self {
        Self::from_keys(&a.key(), &b.key())
    }

    fn from_keys(a: &str, b: &str) -> Self {
        if a <= b {
            Self(format!("{a}|{b}"))
        } else {
            Self(format!("{b}|{a}"))
        }
    }

    /// Borrow the key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the key back into its two signatures, in key order.
    ///
    /// # Errors
    /// Returns [`SignatureError`] if the stored text no longer parses, which
    /// only happens for keys built outside this type.
    pub fn signatures(&self) -> Result<(Signature, Signature), SignatureError> {
        let (a, b) = split_pair(&self.0)?;
        Ok((a.parse()?, b.parse()?))
    }
}

fn split_pair(input: &str) -> Result<(&str, &str), SignatureError> {
    input
        .split_once('|')
        .ok_or_else(|| SignatureError::MalformedPairKey {
            input: input.to_owned(),
        })
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PairKey {
    type Err = SignatureError;

    /// Parse `a|b` in either order, normalising case, aliases and ordering.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = split_pair(s.trim())?;
        let first: Signature = a.parse()?;
        let second: Signature = b.parse()?;
        Ok(Self::new(first, second))
    }
}

impl TryFrom<String> for PairKey {
    type Error = SignatureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PairKey> for String {
    fn from(value: PairKey) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn birth_date_derives_full_signature() {
        let date = BirthDate::parse("1984-02-02").expect("valid date");
        let signature = Signature::from_birth_date(date);

        assert_eq!(signature.west(), WesternSign::Aquarius);
        assert_eq!(signature.east(), ChineseAnimal::Rat);
        assert_eq!(signature.year_element(), Some(YearElement::Wood));
    }

    #[rstest]
    #[case("not-a-date")]
    #[case("1990-02-30")]
    #[case("1990-13-01")]
    #[case("")]
    fn rejects_unparseable_dates(#[case] input: &str) {
        let err = BirthDate::parse(input).expect_err("date should be rejected");
        assert!(matches!(err, SignatureError::InvalidDate { .. }));
    }

    #[rstest]
    fn rejects_impossible_components() {
        let err = BirthDate::from_ymd(2023, 2, 29).expect_err("not a leap year");
        assert_eq!(
            err,
            SignatureError::OutOfRangeDate {
                year: 2023,
                month: 2,
                day: 29
            }
        );
    }

    #[rstest]
    #[case("aries_rat", WesternSign::Aries, ChineseAnimal::Rat)]
    #[case("Cancer_Sheep", WesternSign::Cancer, ChineseAnimal::Goat)]
    #[case(" pisces_pig ", WesternSign::Pisces, ChineseAnimal::Pig)]
    fn parses_signature_keys(
        #[case] input: &str,
        #[case] west: WesternSign,
        #[case] east: ChineseAnimal,
    ) {
        let signature: Signature = input.parse().expect("key should parse");
        assert_eq!(signature, Signature::new(west, east));
    }

    #[rstest]
    fn rejects_key_without_separator() {
        let err = "ariesrat".parse::<Signature>().expect_err("missing separator");
        assert!(matches!(err, SignatureError::MalformedKey { .. }));
    }

    #[rstest]
    fn pair_key_is_order_independent() {
        let a = Signature::new(WesternSign::Taurus, ChineseAnimal::Rabbit);
        let b = Signature::new(WesternSign::Cancer, ChineseAnimal::Goat);

        assert_eq!(PairKey::new(a, b), PairKey::new(b, a));
        assert_eq!(PairKey::new(a, b).as_str(), "cancer_goat|taurus_rabbit");
    }

    #[rstest]
    fn pair_key_parsing_normalises_order_and_aliases() {
        let parsed: PairKey = "TAURUS_RABBIT|cancer_sheep".parse().expect("pair parses");
        assert_eq!(parsed.as_str(), "cancer_goat|taurus_rabbit");
        let (first, second) = parsed.signatures().expect("signatures parse");
        assert_eq!(first.key(), "cancer_goat");
        assert_eq!(second.key(), "taurus_rabbit");
    }

    #[rstest]
    fn enumerates_every_signature_once() {
        let all: Vec<_> = Signature::all().collect();
        assert_eq!(all.len(), 144);
        let unique: std::collections::BTreeSet<_> = all.iter().copied().collect();
        assert_eq!(unique.len(), 144);
    }
}
