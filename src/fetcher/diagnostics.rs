// Failure diagnostics - maps yt-dlp stderr to a typed failure
//
// Rules are evaluated top to bottom and the first match wins, so a
// "live event will begin" message is never mistaken for disabled comments
// even when both phrases appear in the same output.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::errors::FetchError;
use super::models::ResourceKind;

struct Rule {
    name: &'static str,
    pattern: Regex,
    /// Restricts the rule to one resource kind
    only_for: Option<ResourceKind>,
    /// Returning `None` lets evaluation continue with the next rule
    build: fn(&Captures<'_>) -> Option<FetchError>,
}

fn captured_number(caps: &Captures<'_>) -> Option<u64> {
    caps.get(1)?.as_str().parse().ok()
}

lazy_static! {
    static ref RULES: Vec<Rule> = vec![
        Rule {
            name: "future-event-hours",
            pattern: Regex::new(r"(?i)this live event will begin in (\d+) hours?").unwrap(),
            only_for: None,
            build: |caps| captured_number(caps).map(FetchError::FutureEventHours),
        },
        Rule {
            name: "future-event-minutes",
            pattern: Regex::new(r"(?i)this live event will begin in (\d+) minutes?").unwrap(),
            only_for: None,
            build: |caps| captured_number(caps).map(FetchError::FutureEventMinutes),
        },
        Rule {
            name: "future-event",
            pattern: Regex::new(r"(?i)this live event will begin").unwrap(),
            only_for: None,
            build: |_| Some(FetchError::FutureEventUnknown),
        },
        Rule {
            name: "comments-disabled",
            pattern: Regex::new(r"(?i)comments are disabled").unwrap(),
            only_for: None,
            build: |_| Some(FetchError::CommentsDisabled),
        },
        Rule {
            name: "no-live-chat",
            pattern: Regex::new(
                r"(?i)no subtitles for the requested languages|doesn't have subtitles|live chat (replay )?is not available"
            )
            .unwrap(),
            only_for: Some(ResourceKind::LiveChat),
            build: |_| Some(FetchError::NoLiveChat),
        },
    ];
}

/// Classify a failed yt-dlp run.
///
/// `status` is the rendered exit status, kept verbatim in the generic
/// fallback together with the raw stderr.
pub fn classify_failure(kind: ResourceKind, status: &str, stderr: &str) -> FetchError {
    for rule in RULES.iter() {
        if rule.only_for.map_or(false, |only| only != kind) {
            continue;
        }
        let Some(caps) = rule.pattern.captures(stderr) else {
            continue;
        };
        if let Some(err) = (rule.build)(&caps) {
            tracing::debug!(rule = rule.name, %kind, "classified yt-dlp failure");
            return err;
        }
    }

    FetchError::GenericFailure {
        status: status.to_string(),
        stderr: stderr.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(kind: ResourceKind, stderr: &str) -> FetchError {
        classify_failure(kind, "exit status: 1", stderr)
    }

    #[test]
    fn test_future_event_hours() {
        let err = classify(
            ResourceKind::Comments,
            "ERROR: [youtube] abc: This live event will begin in 3 hours.",
        );
        assert!(matches!(err, FetchError::FutureEventHours(3)));
    }

    #[test]
    fn test_future_event_single_hour() {
        let err = classify(ResourceKind::LiveChat, "This live event will begin in 1 hour");
        assert!(matches!(err, FetchError::FutureEventHours(1)));
    }

    #[test]
    fn test_future_event_minutes() {
        let err = classify(ResourceKind::Comments, "This live event will begin in 25 minutes.");
        assert!(matches!(err, FetchError::FutureEventMinutes(25)));
    }

    #[test]
    fn test_future_event_without_duration() {
        let err = classify(ResourceKind::Comments, "This live event will begin in a few moments.");
        assert!(matches!(err, FetchError::FutureEventUnknown));
    }

    #[test]
    fn test_future_event_beats_comments_disabled() {
        let err = classify(
            ResourceKind::Comments,
            "comments are disabled\nThis live event will begin in 3 hours",
        );
        assert!(matches!(err, FetchError::FutureEventHours(3)));
    }

    #[test]
    fn test_oversized_hours_fall_back_to_unknown() {
        let err = classify(
            ResourceKind::Comments,
            "This live event will begin in 99999999999999999999999 hours",
        );
        assert!(matches!(err, FetchError::FutureEventUnknown));
    }

    #[test]
    fn test_comments_disabled() {
        let err = classify(
            ResourceKind::Comments,
            "WARNING: [youtube] abc: Comments are disabled for this video",
        );
        assert!(matches!(err, FetchError::CommentsDisabled));
    }

    #[test]
    fn test_no_live_chat_only_in_chat_context() {
        let stderr = "WARNING: There are no subtitles for the requested languages";
        assert!(matches!(
            classify(ResourceKind::LiveChat, stderr),
            FetchError::NoLiveChat
        ));
        assert!(matches!(
            classify(ResourceKind::Comments, stderr),
            FetchError::GenericFailure { .. }
        ));
    }

    #[test]
    fn test_missing_subtitles_marker() {
        let stderr = "WARNING: [youtube] abc: This video doesn't have subtitles";
        assert!(matches!(
            classify(ResourceKind::LiveChat, stderr),
            FetchError::NoLiveChat
        ));
        assert!(matches!(
            classify(ResourceKind::Comments, stderr),
            FetchError::GenericFailure { .. }
        ));
    }

    #[test]
    fn test_live_chat_unavailable_markers() {
        for stderr in [
            "ERROR: Live chat replay is not available for this video",
            "ERROR: live chat is not available",
        ] {
            assert!(
                matches!(classify(ResourceKind::LiveChat, stderr), FetchError::NoLiveChat),
                "{stderr}"
            );
            assert!(
                matches!(
                    classify(ResourceKind::Comments, stderr),
                    FetchError::GenericFailure { .. }
                ),
                "{stderr}"
            );
        }
    }

    #[test]
    fn test_comments_disabled_in_chat_context() {
        let err = classify(
            ResourceKind::LiveChat,
            "WARNING: [youtube] abc: COMMENTS ARE DISABLED for this video",
        );
        assert!(matches!(err, FetchError::CommentsDisabled));
    }

    #[test]
    fn test_generic_failure_keeps_status_and_text() {
        match classify_failure(ResourceKind::Comments, "exit status: 2", "ERROR: Video unavailable") {
            FetchError::GenericFailure { status, stderr } => {
                assert_eq!(status, "exit status: 2");
                assert_eq!(stderr, "ERROR: Video unavailable");
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }
}
