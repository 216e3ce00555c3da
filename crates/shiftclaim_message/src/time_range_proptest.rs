#[cfg(test)]
mod tests {
    use crate::phrases::PhraseMatcher;
    use crate::time_range::extract_time_range;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use shiftclaim_common::ObservedMessage;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()
    }

    proptest! {
        // Any range that parses is ordered and stays on one day
        #[test]
        fn test_parsed_ranges_are_ordered(
            start_hour in 0u32..30,
            end_hour in 0u32..30,
            start_minute in prop::sample::select(vec![None, Some(0u32), Some(15), Some(30), Some(45)]),
            separator in prop::sample::select(vec![" to ", "-", " - ", "–", " till "]),
            suffix in prop::sample::select(vec!["", "am", "pm", " p.m."]),
        ) {
            let start = match start_minute {
                Some(m) => format!("{}:{:02}", start_hour, m),
                None => start_hour.to_string(),
            };
            let text = format!("can someone cover {}{}{}{} today", start, separator, end_hour, suffix);

            if let Some(candidate) = extract_time_range(&text, today()) {
                prop_assert!(candidate.start < candidate.end, "unordered range from {:?}", text);
                prop_assert_eq!(candidate.start.date(), today());
                prop_assert_eq!(candidate.end.date(), today());
            }
        }

        // Text without digits never yields a range
        #[test]
        fn test_text_without_digits_never_parses(text in "[a-zA-Z ,.!?'-]{0,80}") {
            prop_assert!(extract_time_range(&text, today()).is_none());
        }

        // Without any configured phrase in the text there is never a match
        #[test]
        fn test_no_phrase_no_match(text in "[a-z0-9 ,.]{0,80}") {
            let matcher = PhraseMatcher::new(["can someone cover", "need someone for"]);
            let message = ObservedMessage::new(text.clone());
            let contains = message.normalized().contains("can someone cover")
                || message.normalized().contains("need someone for");
            prop_assert_eq!(matcher.matches(&message), contains);
        }
    }
}
