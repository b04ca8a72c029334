//! Line unfolding and content line tokenizing.

use crate::error::FeedParseError;

/// Properties the parser keeps. Everything else is dropped while tokenizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PropertyName {
    Begin,
    End,
    Uid,
    Summary,
    Description,
    DtStart,
    LastModified,
}

impl PropertyName {
    fn from_ics_str(name: &str) -> Option<Self> {
        match name {
            "BEGIN" => Some(PropertyName::Begin),
            "END" => Some(PropertyName::End),
            "UID" => Some(PropertyName::Uid),
            "SUMMARY" => Some(PropertyName::Summary),
            "DESCRIPTION" => Some(PropertyName::Description),
            "DTSTART" => Some(PropertyName::DtStart),
            "LAST-MODIFIED" => Some(PropertyName::LastModified),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ContentLine {
    pub name: PropertyName,
    pub value: String,
}

impl ContentLine {
    /// Parse one unfolded line. Returns `None` for properties outside the kept set.
    ///
    /// Parameters (`DTSTART;VALUE=DATE`, `DTSTART;TZID=...`) are accepted and
    /// dropped; the value starts after the first colon outside a quoted
    /// parameter value.
    pub fn parse(line: &str) -> Result<Option<Self>, FeedParseError> {
        if line.contains('\n') || line.contains('\r') {
            return Err(FeedParseError::RawLineBreak(line.to_string()));
        }

        let Some(colon) = value_separator(line) else {
            return Ok(None);
        };

        let head = &line[..colon];
        let base_name = head.split(';').next().unwrap_or(head);

        Ok(PropertyName::from_ics_str(base_name).map(|name| ContentLine {
            name,
            value: line[colon + 1..].to_string(),
        }))
    }
}

fn value_separator(line: &str) -> Option<usize> {
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => return Some(i),
            _ => {}
        }
    }
    None
}

/// Join folded physical lines into logical lines.
///
/// A line starting with a space or tab continues the previous one; the
/// leading whitespace character is removed.
pub(crate) fn unfold_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for raw in split_physical_lines(text) {
        if current.is_empty() {
            current = raw.to_string();
        } else if raw.starts_with(' ') || raw.starts_with('\t') {
            current.push_str(&raw[1..]);
        } else {
            lines.push(std::mem::take(&mut current));
            current = raw.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Split on CRLF, LF or a lone CR, and nothing else.
///
/// Unicode line separators inside a value are content, not line breaks.
fn split_physical_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .flat_map(|l| l.strip_suffix('\r').unwrap_or(l).split('\r'))
}

pub(crate) fn tokenize(unfolded: &[String]) -> Result<Vec<ContentLine>, FeedParseError> {
    let mut tokens = Vec::new();
    for line in unfolded {
        if let Some(token) = ContentLine::parse(line)? {
            tokens.push(token);
        }
    }
    Ok(tokens)
}

/// Undo RFC 5545 TEXT escaping.
pub(crate) fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(',') => out.push(','),
            Some(';') => out.push(';'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfold_joins_continuations() {
        let text = "DESCRIPTION:* w 1k\\n* s\r\n  400m\r\n\tmore\r\nUID:abc\r\n";
        assert_eq!(
            unfold_lines(text),
            vec!["DESCRIPTION:* w 1k\\n* s 400mmore".to_string(), "UID:abc".to_string()]
        );
    }

    #[test]
    fn test_unfold_lone_cr() {
        assert_eq!(unfold_lines("A:1\rB:2"), vec!["A:1".to_string(), "B:2".to_string()]);
    }

    #[test]
    fn test_parse_drops_unknown_properties() {
        assert_eq!(ContentLine::parse("LOCATION:Track").unwrap(), None);
        assert_eq!(ContentLine::parse("no colon here").unwrap(), None);
    }

    #[test]
    fn test_parse_strips_parameters() {
        let line = ContentLine::parse("DTSTART;VALUE=DATE:20250310").unwrap().unwrap();
        assert_eq!(line.name, PropertyName::DtStart);
        assert_eq!(line.value, "20250310");

        let line = ContentLine::parse("DESCRIPTION;ALTREP=\"http://x/y\":* w 1k")
            .unwrap()
            .unwrap();
        assert_eq!(line.name, PropertyName::Description);
        assert_eq!(line.value, "* w 1k");
    }

    #[test]
    fn test_parse_splits_on_first_colon() {
        let line = ContentLine::parse("DESCRIPTION:* s 10:00t @04:30").unwrap().unwrap();
        assert_eq!(line.value, "* s 10:00t @04:30");
    }

    #[test]
    fn test_parse_rejects_raw_line_break() {
        assert!(matches!(
            ContentLine::parse("SUMMARY:a\nb"),
            Err(FeedParseError::RawLineBreak(_))
        ));
    }

    #[test]
    fn test_unescape_text() {
        assert_eq!(
            unescape_text("* w 1k\\n* s 400m\\, easy\\; ok \\\\ \\q"),
            "* w 1k\n* s 400m, easy; ok \\ \\q"
        );
    }
}
