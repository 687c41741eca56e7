//! Semantic version value type
//!
//! Grammar is `MAJOR.MINOR.PATCH` optionally followed by a single separator
//! character and a pre-release tag, e.g. `1.2.3-rc1`. The separator is kept
//! for formatting but takes no part in equality or ordering.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::common::{Error, Result};

/// The element of a version bumped by a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Major,
    Minor,
    Patch,
}

#[derive(Debug, Clone)]
struct PreRelease {
    separator: char,
    tag: String,
}

/// An immutable semantic version.
#[derive(Debug, Clone)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    pre_release: Option<PreRelease>,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self { major, minor, patch, pre_release: None }
    }

    pub fn with_pre_release(
        major: u64,
        minor: u64,
        patch: u64,
        separator: char,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            major,
            minor,
            patch,
            pre_release: Some(PreRelease { separator, tag: tag.into() }),
        }
    }

    /// Parse `MAJOR.MINOR.PATCH(<sep><tag>)?`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rest = text;
        let major = take_number(&mut rest, text)?;
        expect_dot(&mut rest, text)?;
        let minor = take_number(&mut rest, text)?;
        expect_dot(&mut rest, text)?;
        let patch = take_number(&mut rest, text)?;
        if rest.is_empty() {
            return Ok(Version::new(major, minor, patch));
        }
        // The first leftover character cannot be a digit (the patch component
        // consumed them all), so it is the user's separator.
        let mut chars = rest.chars();
        let separator = match chars.next() {
            Some(c) => c,
            None => return Err(malformed(text)),
        };
        let tag = chars.as_str();
        if tag.is_empty() {
            return Err(malformed(text));
        }
        Ok(Version::with_pre_release(major, minor, patch, separator, tag))
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// The pre-release tag, without its separator.
    pub fn pre_release(&self) -> Option<&str> {
        self.pre_release.as_ref().map(|pre| pre.tag.as_str())
    }

    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }

    /// A version before the first stable release; inference is undefined for
    /// these and validation is unconstrained.
    pub fn is_development(&self) -> bool {
        self.major == 0
    }

    /// Bump the given element, zeroing the lower ones and dropping any
    /// pre-release tag.
    pub fn next(&self, element: Element) -> Version {
        match element {
            Element::Major => Version::new(self.major + 1, 0, 0),
            Element::Minor => Version::new(self.major, self.minor + 1, 0),
            Element::Patch => Version::new(self.major, self.minor, self.patch + 1),
        }
    }
}

fn take_number(rest: &mut &str, full: &str) -> Result<u64> {
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if end == 0 {
        return Err(malformed(full));
    }
    let (digits, tail) = rest.split_at(end);
    let value = digits.parse::<u64>().map_err(|_| malformed(full))?;
    *rest = tail;
    Ok(value)
}

fn expect_dot(rest: &mut &str, full: &str) -> Result<()> {
    match rest.strip_prefix('.') {
        Some(tail) => {
            *rest = tail;
            Ok(())
        }
        None => Err(malformed(full)),
    }
}

fn malformed(text: &str) -> Error {
    Error::invalid_argument(format!("malformed version string: '{}'", text))
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        Version::parse(text)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre_release {
            write!(f, "{}{}", pre.separator, pre.tag)?;
        }
        Ok(())
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    /// Lexicographic on the number triple; at an equal triple a pre-release
    /// is strictly less than no pre-release, and two pre-releases compare by
    /// tag.
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => a.tag.cmp(&b.tag),
            })
    }
}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.pre_release().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_pre_release_forms() {
        let plain = Version::parse("1.2.3").expect("plain version");
        assert_eq!(plain, Version::new(1, 2, 3));

        let pre = Version::parse("1.2.3-rc1").expect("pre-release version");
        assert_eq!(pre.pre_release(), Some("rc1"));
        assert_eq!(pre.to_string(), "1.2.3-rc1");

        let dotted = Version::parse("1.2.3.beta").expect("dotted separator");
        assert_eq!(dotted.pre_release(), Some("beta"));
        assert_eq!(dotted.to_string(), "1.2.3.beta");
    }

    #[test]
    fn rejects_malformed_strings() {
        for text in ["", "1", "1.2", "a.b.c", "1.2.x", "1.2.3-", "1..3"] {
            assert!(Version::parse(text).is_err(), "accepted '{}'", text);
        }
    }

    #[test]
    fn pre_release_sorts_below_release_at_same_triple() {
        let release = Version::new(1, 1, 0);
        let rc1 = Version::with_pre_release(1, 1, 0, '-', "rc1");
        let rc2 = Version::with_pre_release(1, 1, 0, '-', "rc2");
        assert!(rc1 < rc2);
        assert!(rc2 < release);
        assert!(release < Version::new(1, 1, 1));
    }

    #[test]
    fn next_zeroes_lower_elements_and_drops_the_tag() {
        let version = Version::with_pre_release(1, 2, 3, '-', "rc1");
        assert_eq!(version.next(Element::Major), Version::new(2, 0, 0));
        assert_eq!(version.next(Element::Minor), Version::new(1, 3, 0));
        assert_eq!(version.next(Element::Patch), Version::new(1, 2, 4));
    }

    #[test]
    fn separator_is_formatting_only() {
        let dash = Version::with_pre_release(1, 1, 0, '-', "rc1");
        let dot = Version::with_pre_release(1, 1, 0, '.', "rc1");
        assert_eq!(dash, dot);
    }
}
