//! Line-level parsing of Debian Contents indices.
//!
//! Each line of a Contents index has the shape
//!
//! ```text
//! usr/bin/busybox          utils/busybox,admin/busybox-static
//! └─── file path ───┘     └────────── package list ─────────┘
//! ```
//!
//! The package list is the text after the *last* whitespace run and holds
//! comma-separated references of the form `[[area/]section/]name`.

/// How to treat lines that lack a whitespace separator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Treat the whole line as the package list.
    #[default]
    Lenient,
    /// Reject the line as malformed.
    Strict,
}

/// A package reference in `[[area/]section/]name` form.
///
/// Area and section are discarded; only the name is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageRef<'a> {
    name: &'a str,
}

impl<'a> PackageRef<'a> {
    /// Take the name from a reference.
    ///
    /// Identifiers are not trimmed; the name is everything after the last `/`.
    pub fn parse(reference: &'a str) -> Self {
        let name = reference
            .rsplit_once('/')
            .map_or(reference, |(_, name)| name);
        Self { name }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }
}

/// Package list of one logical line of a Contents index.
///
/// The file path column is not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentsRecord<'a> {
    packages: &'a str,
}

impl<'a> ContentsRecord<'a> {
    /// Package references named by this record, in order.
    ///
    /// References with an empty name (`a,,b`, `utils/`) are skipped.
    pub fn packages(&self) -> impl Iterator<Item = PackageRef<'a>> + 'a {
        self.packages
            .split(',')
            .map(PackageRef::parse)
            .filter(|pkg| !pkg.name().is_empty())
    }
}

/// A line without a whitespace separator was seen in strict mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingSeparator;

/// Parse a single index line.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_line(
    line: &str,
    mode: ParseMode,
) -> Result<Option<ContentsRecord<'_>>, MissingSeparator> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    match line.rsplit_once(char::is_whitespace) {
        Some((_, packages)) => Ok(Some(ContentsRecord { packages })),
        None => match mode {
            ParseMode::Lenient => Ok(Some(ContentsRecord { packages: line })),
            ParseMode::Strict => Err(MissingSeparator),
        },
    }
}
