//! Input/output locators: plain paths, or `file:///` URIs qualified by vessel,
//! day and line (`file:///D:/Survey/Project.hips?Vessel=V1;Day=2023-328;Line=L2`).
use std::path::Path;

use chrono::NaiveDate;
use tracing::warn;
use url::Url;

use crate::error::{Error, Result};

const QUERY_DELIMITER: &str = ";";
/// Characters that would split or end the `Vessel=..;Day=..;Line=..` query.
const QUERY_RESERVED: [char; 4] = [';', '=', '?', '#'];

/// Vessel/day/line selection appended to a HIPS URI.
///
/// Segments are emitted vessels first, then days, then lines, each group in the
/// order supplied. Empty values are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Qualifiers {
    pub vessels: Vec<String>,
    pub days: Vec<String>,
    pub lines: Vec<String>,
}

impl Qualifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vessel(mut self, vessel: impl Into<String>) -> Self {
        self.vessels.push(vessel.into());
        self
    }

    pub fn day(mut self, day: impl Into<String>) -> Self {
        self.days.push(day.into());
        self
    }

    /// Adds the day containing `date`, in the tool's `YYYY-DDD` spelling.
    pub fn day_of(self, date: NaiveDate) -> Self {
        self.day(day_of_year(date))
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.segments().next().is_none()
    }

    fn segments(&self) -> impl Iterator<Item = String> + '_ {
        let vessels = self.vessels.iter().map(|v| ("Vessel", v));
        let days = self.days.iter().map(|v| ("Day", v));
        let lines = self.lines.iter().map(|v| ("Line", v));
        vessels
            .chain(days)
            .chain(lines)
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("{}={}", key, value))
    }

    /// `Vessel=..;Day=..;Line=..;Line=..`
    pub fn query(&self) -> String {
        self.segments().collect::<Vec<_>>().join(QUERY_DELIMITER)
    }

    fn has_reserved(&self) -> bool {
        self.vessels
            .iter()
            .chain(&self.days)
            .chain(&self.lines)
            .any(|value| value.contains(QUERY_RESERVED))
    }
}

/// Formats a calendar date as a HIPS day name, e.g. `2023-11-24` -> `2023-328`.
pub fn day_of_year(date: NaiveDate) -> String {
    date.format("%Y-%j").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Path(String),
    Uri(String),
}

impl Locator {
    pub fn as_str(&self) -> &str {
        match self {
            Locator::Path(s) | Locator::Uri(s) => s,
        }
    }

    pub fn is_uri(&self) -> bool {
        matches!(self, Locator::Uri(_))
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Build a locator from a path.
///
/// With `as_uri` the path must be absolute (`/data/...`, `//server/share/...` or
/// `D:\...`); backslashes become forward slashes, the path is percent-encoded
/// (`/My Survey/P#1.hips` -> `file:///My%20Survey/P%231.hips`) and non-empty
/// qualifiers are appended as the query. Qualifier values may not contain `;`,
/// `=`, `?` or `#`. Without `as_uri` the path is passed through unchanged and
/// qualifiers are ignored.
pub fn build_locator(
    path: impl AsRef<Path>,
    as_uri: bool,
    qualifiers: &Qualifiers,
) -> Result<Locator> {
    let path = path.as_ref();
    let raw = path.to_str().ok_or_else(|| Error::InvalidLocator {
        path: path.to_string_lossy().into_owned(),
        reason: "path is not valid UTF-8",
    })?;

    if raw.trim().is_empty() {
        return Err(Error::InvalidLocator {
            path: raw.to_string(),
            reason: "path is empty",
        });
    }

    if !as_uri {
        if !qualifiers.is_empty() {
            warn!("Ignoring vessel/day/line qualifiers for plain path {}", raw);
        }
        return Ok(Locator::Path(raw.to_string()));
    }

    if qualifiers.has_reserved() {
        return Err(Error::InvalidLocator {
            path: raw.to_string(),
            reason: "qualifier values cannot contain ';', '=', '?' or '#'",
        });
    }

    let uri = file_uri(raw)?;
    if qualifiers.is_empty() {
        Ok(Locator::Uri(uri))
    } else {
        Ok(Locator::Uri(format!("{}?{}", uri, qualifiers.query())))
    }
}

fn file_uri(raw: &str) -> Result<String> {
    let invalid = |reason| Error::InvalidLocator {
        path: raw.to_string(),
        reason,
    };

    let slashed = raw.replace('\\', "/");
    let (host, path) = if let Some(share) = slashed.strip_prefix("//") {
        // UNC share: the server becomes the URI authority
        match share.split_once('/') {
            Some((server, rest)) if !server.is_empty() => {
                (Some(server.to_string()), format!("/{}", rest))
            }
            _ => return Err(invalid("a UNC path needs a server and a share")),
        }
    } else if slashed.starts_with('/') {
        (None, slashed)
    } else if has_drive_prefix(&slashed) {
        (None, format!("/{}", slashed))
    } else {
        return Err(invalid("a URI requires an absolute path"));
    };

    let mut url = Url::parse("file:///").map_err(|_| invalid("cannot build a file URI"))?;
    if let Some(server) = host {
        url.set_host(Some(&server))
            .map_err(|_| invalid("invalid UNC server name"))?;
    }
    // set_path keeps existing escapes, so a literal '%' is escaped first
    url.set_path(&path.replace('%', "%25"));
    Ok(url.into())
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/'
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_query_order_is_vessel_day_lines() {
        let q = Qualifiers::new()
            .lines(["Line002", "Line003"])
            .day("2023-328")
            .vessel("Vessel1");
        assert_eq!(q.query(), "Vessel=Vessel1;Day=2023-328;Line=Line002;Line=Line003");
    }

    #[test]
    fn test_query_skips_empty_values() {
        let q = Qualifiers::new().vessel("").day("2023-001").line("");
        assert_eq!(q.query(), "Day=2023-001");
        assert!(Qualifiers::new().vessel("").is_empty());
    }

    #[test]
    fn test_day_of_year() {
        let date = NaiveDate::from_ymd_opt(2023, 11, 24).unwrap();
        assert_eq!(day_of_year(date), "2023-328");
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(day_of_year(date), "2024-005");
        assert_eq!(Qualifiers::new().day_of(date).query(), "Day=2024-005");
    }

    #[test]
    fn test_plain_path_passes_through() {
        let loc = build_locator("relative/file.all", false, &Qualifiers::new()).unwrap();
        assert_eq!(loc, Locator::Path("relative/file.all".to_string()));
        assert!(!loc.is_uri());
    }

    #[test]
    fn test_uri_from_unix_path() {
        let q = Qualifiers::new().vessel("Vessel1");
        let loc = build_locator("/survey/Project.hips", true, &q).unwrap();
        assert_eq!(loc.as_str(), "file:///survey/Project.hips?Vessel=Vessel1");
    }

    #[test]
    fn test_uri_from_windows_path() {
        let loc = build_locator(r"D:\Survey\Project.hips", true, &Qualifiers::new()).unwrap();
        assert_eq!(loc.as_str(), "file:///D:/Survey/Project.hips");
    }

    #[test]
    fn test_uri_from_unc_path() {
        let loc = build_locator(r"\\nas\survey\Project.hips", true, &Qualifiers::new()).unwrap();
        assert_eq!(loc.as_str(), "file://nas/survey/Project.hips");
    }

    #[test]
    fn test_uri_percent_encodes_the_path() {
        let q = Qualifiers::new().vessel("Vessel1");
        let loc = build_locator("/data/what?.hips", true, &q).unwrap();
        assert_eq!(loc.as_str(), "file:///data/what%3F.hips?Vessel=Vessel1");

        let loc = build_locator("/My Survey/Project#1.hips", true, &q).unwrap();
        assert_eq!(
            loc.as_str(),
            "file:///My%20Survey/Project%231.hips?Vessel=Vessel1"
        );

        let loc = build_locator(r"D:\Full 100%\Project.hips", true, &Qualifiers::new()).unwrap();
        assert_eq!(loc.as_str(), "file:///D:/Full%20100%25/Project.hips");
    }

    #[test]
    fn test_uri_encodes_non_ascii() {
        let loc = build_locator("/data/S\u{fc}d.hips", true, &Qualifiers::new()).unwrap();
        assert_eq!(loc.as_str(), "file:///data/S%C3%BCd.hips");
    }

    #[test]
    fn test_qualifier_delimiters_are_rejected() {
        for value in ["A;Line=X", "A=B", "A?", "A#1"] {
            let result = build_locator("/s/P.hips", true, &Qualifiers::new().vessel(value));
            assert!(
                matches!(result, Err(Error::InvalidLocator { .. })),
                "{value} was accepted"
            );
        }
        let result = build_locator("/s/P.hips", true, &Qualifiers::new().line("L;1"));
        assert!(matches!(result, Err(Error::InvalidLocator { .. })));
    }

    #[test]
    fn test_unc_path_needs_a_server() {
        assert!(matches!(
            build_locator(r"\\\share\P.hips", true, &Qualifiers::new()),
            Err(Error::InvalidLocator { .. })
        ));
    }

    #[test]
    fn test_uri_rejects_relative_and_empty_paths() {
        assert!(matches!(
            build_locator("Project.hips", true, &Qualifiers::new()),
            Err(Error::InvalidLocator { .. })
        ));
        assert!(matches!(
            build_locator("", false, &Qualifiers::new()),
            Err(Error::InvalidLocator { .. })
        ));
    }
}
