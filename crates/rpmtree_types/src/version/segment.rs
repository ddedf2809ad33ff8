use std::cmp::Ordering;

/// A single token of a version string as seen by `rpmvercmp`.
///
/// Runs of ASCII digits and runs of ASCII letters form segments, `~` and `^` are tokens of their
/// own and everything else only separates segments.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub(crate) enum Segment<'a> {
    /// `~`, sorts before everything, even the end of the string.
    Tilde,
    /// `^`, sorts after the end of the string but before any other segment.
    Caret,
    /// A run of digits with its leading zeros stripped.
    Numeric(&'a str),
    /// A run of letters.
    Alpha(&'a str),
}

impl Ord for Segment<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::Numeric(a), Segment::Numeric(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (Segment::Alpha(a), Segment::Alpha(b)) => a.cmp(b),
            (Segment::Numeric(_), Segment::Alpha(_)) => Ordering::Greater,
            (Segment::Alpha(_), Segment::Numeric(_)) => Ordering::Less,
            (Segment::Tilde, Segment::Tilde) | (Segment::Caret, Segment::Caret) => Ordering::Equal,
            (Segment::Tilde, _) => Ordering::Less,
            (_, Segment::Tilde) => Ordering::Greater,
            (Segment::Caret, _) => Ordering::Less,
            (_, Segment::Caret) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Segment<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Iterator over the [`Segment`]s of a version string.
pub(crate) struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Segments<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { rest: input }
    }
}

fn is_separator(c: char) -> bool {
    !(c.is_ascii_alphanumeric() || c == '~' || c == '^')
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let trimmed = self.rest.trim_start_matches(is_separator);
        let first = trimmed.chars().next()?;

        let (segment, rest) = match first {
            '~' => (Segment::Tilde, &trimmed[1..]),
            '^' => (Segment::Caret, &trimmed[1..]),
            c if c.is_ascii_digit() => {
                let end = trimmed
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(trimmed.len());
                let (run, rest) = trimmed.split_at(end);
                (Segment::Numeric(run.trim_start_matches('0')), rest)
            }
            _ => {
                let end = trimmed
                    .find(|c: char| !c.is_ascii_alphabetic())
                    .unwrap_or(trimmed.len());
                let (run, rest) = trimmed.split_at(end);
                (Segment::Alpha(run), rest)
            }
        };

        self.rest = rest;
        Some(segment)
    }
}

/// Compares two version strings the way `rpmvercmp` from librpm does.
///
/// When one of the strings runs out of segments the other one is newer, unless the next segment of
/// the other one is a `~`.
pub fn rpmvercmp(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let mut left = Segments::new(a);
    let mut right = Segments::new(b);
    loop {
        let ordering = match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (Some(Segment::Tilde), None) => Ordering::Less,
            (None, Some(Segment::Tilde)) => Ordering::Greater,
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(&b),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}
