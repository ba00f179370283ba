//! Exhaustive coverage of the calendar-based signature mapping.

use astromatch_core::{BirthDate, ChineseAnimal, Signature, WesternSign};
use chrono::{Datelike, NaiveDate};
use rstest::rstest;

/// Published Gregorian-year animal table for 1960 to 2035, one decade per row.
const ANIMALS_BY_YEAR: [(i32, [ChineseAnimal; 10]); 7] = {
    use ChineseAnimal::{Dog, Dragon, Goat, Horse, Monkey, Ox, Pig, Rabbit, Rat, Rooster, Snake, Tiger};
    [
        (1960, [Rat, Ox, Tiger, Rabbit, Dragon, Snake, Horse, Goat, Monkey, Rooster]),
        (1970, [Dog, Pig, Rat, Ox, Tiger, Rabbit, Dragon, Snake, Horse, Goat]),
        (1980, [Monkey, Rooster, Dog, Pig, Rat, Ox, Tiger, Rabbit, Dragon, Snake]),
        (1990, [Horse, Goat, Monkey, Rooster, Dog, Pig, Rat, Ox, Tiger, Rabbit]),
        (2000, [Dragon, Snake, Horse, Goat, Monkey, Rooster, Dog, Pig, Rat, Ox]),
        (2010, [Tiger, Rabbit, Dragon, Snake, Horse, Goat, Monkey, Rooster, Dog, Pig]),
        (2020, [Rat, Ox, Tiger, Rabbit, Dragon, Snake, Horse, Goat, Monkey, Rooster]),
    ]
};

const TAIL_YEARS: [(i32, ChineseAnimal); 6] = [
    (2030, ChineseAnimal::Dog),
    (2031, ChineseAnimal::Pig),
    (2032, ChineseAnimal::Rat),
    (2033, ChineseAnimal::Ox),
    (2034, ChineseAnimal::Tiger),
    (2035, ChineseAnimal::Rabbit),
];

fn leap_year_days() -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid start date");
    while day.year() == 2024 {
        days.push(day);
        day = day.succ_opt().expect("next day exists");
    }
    days
}

#[rstest]
fn every_day_of_a_leap_year_maps_to_one_sign_without_gaps() {
    let days = leap_year_days();
    assert_eq!(days.len(), 366);

    let mut transitions = Vec::new();
    for window in days.windows(2) {
        let [previous, next] = window else {
            panic!("windows of two always hold two days");
        };
        let (before, after) = (WesternSign::from_date(*previous), WesternSign::from_date(*next));
        if before != after {
            transitions.push((next.month(), next.day(), after));
        }
    }

    assert_eq!(
        transitions,
        vec![
            (1, 20, WesternSign::Aquarius),
            (2, 19, WesternSign::Pisces),
            (3, 21, WesternSign::Aries),
            (4, 20, WesternSign::Taurus),
            (5, 21, WesternSign::Gemini),
            (6, 21, WesternSign::Cancer),
            (7, 23, WesternSign::Leo),
            (8, 23, WesternSign::Virgo),
            (9, 23, WesternSign::Libra),
            (10, 23, WesternSign::Scorpio),
            (11, 22, WesternSign::Sagittarius),
            (12, 22, WesternSign::Capricorn),
        ]
    );
}

#[rstest]
fn each_sign_owns_a_plausible_share_of_the_year() {
    for sign in WesternSign::ALL {
        let owned = leap_year_days()
            .into_iter()
            .filter(|day| WesternSign::from_date(*day) == sign)
            .count();
        assert!((29..=32).contains(&owned), "{sign} owns {owned} days");
    }
}

#[rstest]
fn year_formula_matches_the_published_table() {
    for (decade, animals) in ANIMALS_BY_YEAR {
        for (year, expected) in (decade..).zip(animals) {
            assert_eq!(ChineseAnimal::from_year(year), expected, "year {year}");
        }
    }
    for (year, expected) in TAIL_YEARS {
        assert_eq!(ChineseAnimal::from_year(year), expected, "year {year}");
    }
}

#[rstest]
#[case("1990-01-15", WesternSign::Capricorn, ChineseAnimal::Horse)]
#[case("1990-02-20", WesternSign::Pisces, ChineseAnimal::Horse)]
#[case("2000-12-31", WesternSign::Capricorn, ChineseAnimal::Dragon)]
fn lunar_new_year_is_not_applied(
    #[case] input: &str,
    #[case] west: WesternSign,
    #[case] east: ChineseAnimal,
) {
    let signature = Signature::from_birth_date(BirthDate::parse(input).expect("valid date"));
    assert_eq!(signature.west(), west);
    assert_eq!(signature.east(), east);
}
