//! Weekday/period time codes and busy-slot conflict detection
mod conflict;
mod time_code;

pub use conflict::has_time_conflict;
pub use time_code::{parse_course_time, BusySlots, InvalidSlotToken, TimeSlot};
