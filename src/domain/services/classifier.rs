use crate::domain::models::booking::ClassCategory;

/// Exact, case-sensitive match on the event title. Anything unrecognised is a
/// regular class.
pub fn classify(event_title: &str) -> ClassCategory {
    match event_title {
        "Basic" | "Advance" => ClassCategory::Regular,
        "Workshop" => ClassCategory::Special,
        "Rehearsal" => ClassCategory::Practice,
        _ => ClassCategory::Regular,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_titles() {
        assert_eq!(classify("Basic"), ClassCategory::Regular);
        assert_eq!(classify("Advance"), ClassCategory::Regular);
        assert_eq!(classify("Workshop"), ClassCategory::Special);
        assert_eq!(classify("Rehearsal"), ClassCategory::Practice);
    }

    #[test]
    fn test_unknown_titles_default_to_regular() {
        for title in ["", "workshop", "REHEARSAL", "Open Practice", "Basic "] {
            assert_eq!(classify(title), ClassCategory::Regular, "title {:?}", title);
        }
    }
}
