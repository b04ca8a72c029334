//! Recursive container parsing and VEVENT extraction.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::calendar_event::{CalendarEvent, EventStart};
use crate::constants::SHORT_UID_LEN;
use crate::error::FeedParseError;
use crate::ics::content_line::{ContentLine, PropertyName, tokenize, unescape_text, unfold_lines};
use crate::sync_window::SyncWindow;

/// Parse a raw feed into the events that start inside `window`.
///
/// Events outside the window are dropped as soon as their container closes.
/// Any structural error discards the whole feed.
pub fn parse_feed(text: &str, window: &SyncWindow) -> Result<Vec<CalendarEvent>, FeedParseError> {
    let tokens = tokenize(&unfold_lines(text))?;
    let mut lines = tokens.into_iter();
    let mut events = Vec::new();

    // Only BEGIN opens a block at the top level; stray properties are ignored.
    while let Some(line) = lines.next() {
        if line.name == PropertyName::Begin {
            parse_container(&line.value, &mut lines, window, &mut events)?;
        }
    }

    Ok(events)
}

/// Known fields of one container. Later duplicates overwrite earlier ones.
#[derive(Debug, Default)]
struct CalendarEventFields {
    uid: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    dtstart: Option<String>,
    last_modified: Option<String>,
}

impl CalendarEventFields {
    fn set(&mut self, line: ContentLine) {
        let slot = match line.name {
            PropertyName::Uid => &mut self.uid,
            PropertyName::Summary => &mut self.summary,
            PropertyName::Description => &mut self.description,
            PropertyName::DtStart => &mut self.dtstart,
            PropertyName::LastModified => &mut self.last_modified,
            PropertyName::Begin | PropertyName::End => return,
        };
        *slot = Some(line.value);
    }

    fn into_event(self) -> Result<CalendarEvent, FeedParseError> {
        let uid = self.uid.ok_or(FeedParseError::MissingField("UID"))?;
        let summary = self.summary.ok_or(FeedParseError::MissingField("SUMMARY"))?;
        let description = self
            .description
            .ok_or(FeedParseError::MissingField("DESCRIPTION"))?;
        let dtstart = self.dtstart.ok_or(FeedParseError::MissingField("DTSTART"))?;

        let start = match parse_feed_date(&dtstart)? {
            FeedDate::Date(d) => EventStart::Date(d),
            FeedDate::DateTime(dt) => EventStart::DateTime(dt),
        };
        let last_modified = self
            .last_modified
            .as_deref()
            .map(parse_feed_date)
            .transpose()?
            .map(FeedDate::into_datetime);

        Ok(CalendarEvent {
            uid: uid.chars().take(SHORT_UID_LEN).collect(),
            title: unescape_text(&summary),
            description: unescape_text(&description),
            start,
            last_modified,
        })
    }
}

/// Consume tokens up to the END matching `name`, recursing into nested blocks.
///
/// The iterator is shared with the caller and never rewound, so a nested
/// container swallows exactly its own lines.
fn parse_container<I>(
    name: &str,
    lines: &mut I,
    window: &SyncWindow,
    events: &mut Vec<CalendarEvent>,
) -> Result<(), FeedParseError>
where
    I: Iterator<Item = ContentLine>,
{
    if name != name.to_uppercase() {
        tracing::warn!(container = %name, "Container name is not all-uppercase");
    }

    let mut fields = CalendarEventFields::default();

    loop {
        let Some(line) = lines.next() else {
            return Err(FeedParseError::Unterminated(name.to_string()));
        };

        match line.name {
            PropertyName::Begin => parse_container(&line.value, lines, window, events)?,
            PropertyName::End => {
                if !line.value.eq_ignore_ascii_case(name) {
                    return Err(FeedParseError::MismatchedEnd {
                        expected: name.to_string(),
                        found: line.value,
                    });
                }
                break;
            }
            _ => fields.set(line),
        }
    }

    if name.eq_ignore_ascii_case("VEVENT") {
        let event = fields.into_event()?;
        if event.is_in_window(window) {
            tracing::debug!(event = %event, "Event inside sync window");
            events.push(event);
        } else {
            tracing::trace!(event = %event, "Event outside sync window");
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeedDate {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl FeedDate {
    fn into_datetime(self) -> NaiveDateTime {
        match self {
            FeedDate::Date(d) => d.and_time(chrono::NaiveTime::MIN),
            FeedDate::DateTime(dt) => dt,
        }
    }
}

/// Parse a DATE or DATE-TIME value. The encoding is chosen by length alone
/// once separators are stripped: 8 characters for a date, 15 for a date-time.
///
/// UTC date-times (`Z` suffix) are converted to local wall-clock time.
fn parse_feed_date(value: &str) -> Result<FeedDate, FeedParseError> {
    let is_utc = value.ends_with(['Z', 'z']);
    let compact: String = value
        .chars()
        .filter(|c| !matches!(c, '/' | '-' | 'Z' | 'z'))
        .collect();

    match compact.len() {
        8 => NaiveDate::parse_from_str(&compact, "%Y%m%d")
            .map(FeedDate::Date)
            .map_err(|_| FeedParseError::DateValue(value.to_string())),
        15 => {
            let dt = NaiveDateTime::parse_from_str(&compact, "%Y%m%dT%H%M%S")
                .map_err(|_| FeedParseError::DateValue(value.to_string()))?;
            if is_utc {
                Ok(FeedDate::DateTime(Local.from_utc_datetime(&dt).naive_local()))
            } else {
                Ok(FeedDate::DateTime(dt))
            }
        }
        _ => Err(FeedParseError::DateLength(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn window() -> SyncWindow {
        SyncWindow::at(
            NaiveDate::from_ymd_opt(2025, 3, 10)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        )
    }

    fn vevent(uid: &str, start: &str, summary: &str) -> String {
        format!(
            "BEGIN:VEVENT\r\n\
             DTSTART;VALUE=DATE:{start}\r\n\
             UID:{uid}\r\n\
             SUMMARY:{summary}\r\n\
             DESCRIPTION:* w 1k\\n* s 400m @04:00\r\n\
             LAST-MODIFIED:20250310T070000Z\r\n\
             END:VEVENT\r\n"
        )
    }

    fn feed(events: &[String]) -> String {
        format!(
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Google Inc//Google Calendar 70.9054//EN\r\n{}END:VCALENDAR\r\n",
            events.concat()
        )
    }

    #[test]
    fn test_parse_event_fields() {
        let text = feed(&[vevent("7kq2abc@google.com", "20250312", "Track\\, session")]);
        let events = parse_feed(&text, &window()).unwrap();

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.uid, "7k");
        assert_eq!(event.title, "Track, session");
        assert_eq!(event.description, "* w 1k\n* s 400m @04:00");
        assert_eq!(
            event.start,
            EventStart::Date(NaiveDate::from_ymd_opt(2025, 3, 12).unwrap())
        );
        assert!(event.last_modified.is_some());
    }

    #[test]
    fn test_window_filtering() {
        let w = window();
        let fmt = |d: NaiveDate| d.format("%Y%m%d").to_string();
        let text = feed(&[
            vevent("a1", &fmt(w.today - Duration::days(1)), "Yesterday"),
            vevent("b2", &fmt(w.today), "Today"),
            vevent("c3", &fmt(w.today + Duration::days(7)), "Week"),
            vevent("d4", &fmt(w.today + Duration::days(8)), "Too far"),
        ]);

        let titles: Vec<_> = parse_feed(&text, &w)
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["Today", "Week"]);
    }

    #[test]
    fn test_datetime_start() {
        let text = feed(&[
            "BEGIN:VEVENT\nUID:zz\nSUMMARY:Run\nDESCRIPTION:\nDTSTART:20250311T063000\nEND:VEVENT\n"
                .to_string(),
        ]);
        let events = parse_feed(&text, &window()).unwrap();
        assert_eq!(
            events[0].start,
            EventStart::DateTime(
                NaiveDate::from_ymd_opt(2025, 3, 11)
                    .unwrap()
                    .and_hms_opt(6, 30, 0)
                    .unwrap()
            )
        );
        assert_eq!(events[0].last_modified, None);
    }

    #[test]
    fn test_nested_containers_keep_their_own_fields() {
        let text = feed(&[
            "BEGIN:VTIMEZONE\nTZID:Europe/Brussels\nBEGIN:STANDARD\nDTSTART:19701025T030000\nEND:STANDARD\nEND:VTIMEZONE\n"
                .to_string(),
            "BEGIN:VEVENT\nUID:xy\nSUMMARY:Run\nDESCRIPTION:* s 5k\nDTSTART;VALUE=DATE:20250311\nBEGIN:VALARM\nDESCRIPTION:This is an event reminder\nEND:VALARM\nEND:VEVENT\n"
                .to_string(),
        ]);
        let events = parse_feed(&text, &window()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].description, "* s 5k");
    }

    #[test]
    fn test_mismatched_end_is_fatal() {
        let text = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nUID:a\nEND:VTODO\nEND:VCALENDAR\n";
        assert_eq!(
            parse_feed(text, &window()),
            Err(FeedParseError::MismatchedEnd {
                expected: "VEVENT".to_string(),
                found: "VTODO".to_string()
            })
        );
    }

    #[test]
    fn test_missing_end_is_fatal() {
        let text = "BEGIN:VCALENDAR\nBEGIN:VTODO\nUID:a\nEND:VTODO\n";
        assert_eq!(
            parse_feed(text, &window()),
            Err(FeedParseError::Unterminated("VCALENDAR".to_string()))
        );
    }

    #[test]
    fn test_unrecognized_date_length_is_fatal() {
        let text = feed(&[vevent("ab", "2025031", "Bad date")]);
        assert_eq!(
            parse_feed(&text, &window()),
            Err(FeedParseError::DateLength("2025031".to_string()))
        );
    }

    #[test]
    fn test_missing_required_field_is_fatal_even_outside_window() {
        let text = feed(&[
            "BEGIN:VEVENT\nUID:ab\nDESCRIPTION:\nDTSTART;VALUE=DATE:20200101\nEND:VEVENT\n".to_string(),
        ]);
        assert_eq!(
            parse_feed(&text, &window()),
            Err(FeedParseError::MissingField("SUMMARY"))
        );
    }

    #[test]
    fn test_dashed_dates_are_accepted() {
        assert_eq!(
            parse_feed_date("2025-03-11").unwrap(),
            FeedDate::Date(NaiveDate::from_ymd_opt(2025, 3, 11).unwrap())
        );
        assert!(matches!(
            parse_feed_date("20251341"),
            Err(FeedParseError::DateValue(_))
        ));
    }

    #[test]
    fn test_feed_generated_by_icalendar_crate() {
        use icalendar::{Calendar, Component, Event, EventLike};

        let w = window();
        let description = "* w 1k\n* x 3 2\n* s 400m @04:00\n* r 200m\n* c 1k, easy";
        let calendar = Calendar::new()
            .push(
                Event::new()
                    .uid("q1w2e3r4t5@google.com")
                    .summary("Intervals, track")
                    .description(description)
                    .all_day(w.today + Duration::days(2))
                    .done(),
            )
            .done();

        let events = parse_feed(&calendar.to_string(), &w).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].uid, "q1");
        assert_eq!(events[0].title, "Intervals, track");
        assert_eq!(events[0].description, description);
        assert_eq!(events[0].start_date(), w.today + Duration::days(2));
    }
}
