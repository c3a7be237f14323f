//! Parsing of the compact weekday/period notation used by the catalog,
//! e.g. `一1,三3A` (Monday period 1, Wednesday periods 3 and A).

use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

// Anchored at the segment start only; anything after the period run is ignored.
static SEGMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([一二三四五])([0-9NABCD]+)").unwrap());

/// Maps a weekday glyph (Monday through Friday) to its day number.
fn weekday_number(glyph: char) -> Option<u8> {
    match glyph {
        '一' => Some(1),
        '二' => Some(2),
        '三' => Some(3),
        '四' => Some(4),
        '五' => Some(5),
        _ => None,
    }
}

fn is_period(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, 'N' | 'A' | 'B' | 'C' | 'D')
}

/// One weekday/period unit of time, rendered as the slot token `"{day}-{period}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeSlot {
    day: u8,
    period: char,
}

impl TimeSlot {
    /// Creates a slot, returning `None` if the day is outside 1..=5 or the
    /// period is not one of `0-9`, `N`, `A`, `B`, `C`, `D`.
    pub fn new(day: u8, period: char) -> Option<Self> {
        if (1..=5).contains(&day) && is_period(period) {
            Some(Self { day, period })
        } else {
            None
        }
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn period(&self) -> char {
        self.period
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.day, self.period)
    }
}

/// Returned when a string is not a well-formed slot token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid slot token: {0:?}")]
pub struct InvalidSlotToken(pub String);

impl FromStr for TimeSlot {
    type Err = InvalidSlotToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidSlotToken(s.to_string());

        let (day, period) = s.split_once('-').ok_or_else(invalid)?;
        let day: u8 = day.parse().map_err(|_| invalid())?;

        let mut chars = period.chars();
        match (chars.next(), chars.next()) {
            (Some(period), None) => TimeSlot::new(day, period).ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }
}

/// Parses a raw course time string into its set of time slots.
///
/// Segments are separated by commas. Each segment is a weekday glyph followed
/// by a run of period characters, every character being its own period.
/// Segments that don't match are skipped, so malformed input degrades to
/// fewer (or no) slots rather than an error.
///
/// # Arguments
/// * `raw_time` - Time string as it appears in the catalog, e.g. `"一1,三3A"`
///
/// # Returns
/// The set of slots the course occupies. Empty input yields an empty set.
pub fn parse_course_time(raw_time: &str) -> HashSet<TimeSlot> {
    let mut slots = HashSet::new();

    for segment in raw_time.split(',') {
        let segment = segment.trim();
        let Some(caps) = SEGMENT_REGEX.captures(segment) else {
            continue;
        };

        let Some(day) = caps[1].chars().next().and_then(weekday_number) else {
            continue;
        };

        slots.extend(caps[2].chars().filter_map(|period| TimeSlot::new(day, period)));
    }

    slots
}

/// Times a user is already committed to, supplied per request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusySlots(HashSet<TimeSlot>);

impl BusySlots {
    /// Builds a busy set from slot tokens such as `"1-1"` or `"3-A"`.
    ///
    /// Tokens that aren't valid slots can never collide with a course's
    /// parsed slots, so they are dropped here.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut slots = HashSet::new();
        for token in tokens {
            match token.as_ref().parse::<TimeSlot>() {
                Ok(slot) => {
                    slots.insert(slot);
                }
                Err(e) => debug!("Dropping busy time token: {}", e),
            }
        }
        Self(slots)
    }

    pub fn contains(&self, slot: &TimeSlot) -> bool {
        self.0.contains(slot)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
