use super::time_code::{parse_course_time, BusySlots};

/// Returns true if any slot of the course time overlaps the busy set.
pub fn has_time_conflict(raw_time: &str, busy: &BusySlots) -> bool {
    if busy.is_empty() {
        return false;
    }

    parse_course_time(raw_time)
        .iter()
        .any(|slot| busy.contains(slot))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_on_shared_slot() {
        let busy = BusySlots::from_tokens(["1-1"]);
        assert!(has_time_conflict("一1", &busy));
    }

    #[test]
    fn test_no_conflict_on_other_day() {
        let busy = BusySlots::from_tokens(["2-1"]);
        assert!(!has_time_conflict("一1", &busy));
    }

    #[test]
    fn test_single_overlap_is_enough() {
        let busy = BusySlots::from_tokens(["3-A"]);
        assert!(has_time_conflict("一1234,三89A", &busy));
    }

    #[test]
    fn test_unparsable_time_never_conflicts() {
        let busy = BusySlots::from_tokens(["1-1", "2-2"]);
        assert!(!has_time_conflict("", &busy));
        assert!(!has_time_conflict("TBA", &busy));
    }

    #[test]
    fn test_empty_busy_set() {
        assert!(!has_time_conflict("一1", &BusySlots::default()));
    }
}
