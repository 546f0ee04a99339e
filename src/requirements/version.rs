//! Version parsing and operator comparison.
//!
//! Versions follow a lenient PEP 440 reading: an optional epoch, a dotted
//! numeric release, and optional pre/post/dev/local parts. Anything that
//! does not fit is kept as a legacy version, which sorts below every
//! release version, so comparisons never fail.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?xi)
        ^\s*v?
        (?:(?P<epoch>[0-9]+)!)?
        (?P<release>[0-9]+(?:\.[0-9]+)*)
        (?:[-_.]?(?P<pre_l>alpha|beta|preview|pre|rc|a|b|c)[-_.]?(?P<pre_n>[0-9]+)?)?
        (?:-(?P<post_n1>[0-9]+)|[-_.]?(?P<post_l>post|rev|r)[-_.]?(?P<post_n2>[0-9]+)?)?
        (?:[-_.]?(?P<dev_l>dev)[-_.]?(?P<dev_n>[0-9]+)?)?
        (?:\+(?P<local>[a-z0-9]+(?:[-_.][a-z0-9]+)*))?
        \s*$",
    )
    .unwrap()
});

/// A comparison operator from a requirement specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `==`
    Eq,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `<`
    Lt,
}

impl Operator {
    /// All supported operators, longest symbols first.
    pub const ALL: [Operator; 5] = [
        Operator::Eq,
        Operator::Ge,
        Operator::Le,
        Operator::Gt,
        Operator::Lt,
    ];

    /// The operator as written in a manifest.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Lt => "<",
        }
    }

    /// Look up an operator by its symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol.trim())
    }

    /// Whether the operator accepts an equal version (`==`, `>=`, `<=`).
    pub fn is_inclusive(&self) -> bool {
        matches!(self, Operator::Eq | Operator::Ge | Operator::Le)
    }

    /// Whether `installed` satisfies this operator applied to `required`.
    pub fn compare(&self, installed: &str, required: &str) -> bool {
        let ordering = parse_version(installed).cmp(&parse_version(required));
        match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Ge => ordering != Ordering::Less,
            Operator::Le => ordering != Ordering::Greater,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Lt => ordering == Ordering::Less,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s).ok_or_else(|| format!("unknown operator: {}", s))
    }
}

/// Compare an installed version against a required version.
///
/// Unknown operators (including an empty string) fall back to `>=`.
///
/// ```
/// use requirementz::requirements::compare_versions;
///
/// assert!(compare_versions("1.0.1", ">=", "1.0.0"));
/// assert!(!compare_versions("2.0.0", "<=", "1.0.0"));
/// assert!(compare_versions("2", "WAT", "1"));
/// ```
pub fn compare_versions(installed: &str, op: &str, required: &str) -> bool {
    Operator::from_symbol(op)
        .unwrap_or(Operator::Ge)
        .compare(installed, required)
}

/// Pre-release phase, in release order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum PrePhase {
    Alpha,
    Beta,
    Candidate,
}

/// Position of a version relative to its final release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum PreKey {
    /// `1.0.dev1`: a dev release with no pre/post part sorts before `1.0a1`.
    DevOnly,
    Pre(PrePhase, u64),
    Final,
}

/// A version that parsed under the release scheme.
#[derive(Debug, Clone)]
pub struct ReleaseVersion {
    epoch: u64,
    release: Vec<u64>,
    pre: Option<(PrePhase, u64)>,
    post: Option<u64>,
    dev: Option<u64>,
    local: Option<String>,
}

impl ReleaseVersion {
    /// Parse a version string, returning `None` when it is not a release version.
    pub fn parse(s: &str) -> Option<Self> {
        let caps = VERSION_REGEX.captures(s)?;
        let number = |name: &str| -> Option<Option<u64>> {
            match caps.name(name) {
                Some(m) => m.as_str().parse().ok().map(Some),
                None => Some(None),
            }
        };

        let epoch = number("epoch")?.unwrap_or(0);
        let release = caps
            .name("release")?
            .as_str()
            .split('.')
            .map(|part| part.parse().ok())
            .collect::<Option<Vec<u64>>>()?;

        let pre = match caps.name("pre_l") {
            Some(label) => {
                let phase = match label.as_str().to_lowercase().as_str() {
                    "a" | "alpha" => PrePhase::Alpha,
                    "b" | "beta" => PrePhase::Beta,
                    _ => PrePhase::Candidate,
                };
                Some((phase, number("pre_n")?.unwrap_or(0)))
            }
            None => None,
        };

        let post = if caps.name("post_n1").is_some() {
            number("post_n1")?
        } else if caps.name("post_l").is_some() {
            Some(number("post_n2")?.unwrap_or(0))
        } else {
            None
        };

        let dev = if caps.name("dev_l").is_some() {
            Some(number("dev_n")?.unwrap_or(0))
        } else {
            None
        };

        Some(Self {
            epoch,
            release,
            pre,
            post,
            dev,
            local: caps.name("local").map(|m| m.as_str().to_lowercase()),
        })
    }

    fn trimmed_release(&self) -> &[u64] {
        let end = self
            .release
            .iter()
            .rposition(|&n| n != 0)
            .map_or(0, |i| i + 1);
        &self.release[..end]
    }

    fn pre_key(&self) -> PreKey {
        match (self.pre, self.post, self.dev) {
            (None, None, Some(_)) => PreKey::DevOnly,
            (Some((phase, n)), _, _) => PreKey::Pre(phase, n),
            _ => PreKey::Final,
        }
    }

    fn dev_key(&self) -> (bool, u64) {
        // Missing dev sorts after any dev release.
        match self.dev {
            Some(n) => (false, n),
            None => (true, 0),
        }
    }
}

impl Ord for ReleaseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| self.trimmed_release().cmp(other.trimmed_release()))
            .then_with(|| self.pre_key().cmp(&other.pre_key()))
            .then_with(|| self.post.cmp(&other.post))
            .then_with(|| self.dev_key().cmp(&other.dev_key()))
            .then_with(|| self.local.cmp(&other.local))
    }
}

impl PartialOrd for ReleaseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ReleaseVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ReleaseVersion {}

/// A comparable version key.
///
/// Legacy versions sort before release versions and compare among
/// themselves by their lowercase text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ParsedVersion {
    /// A string that is not a release version.
    Legacy(String),
    /// A release version.
    Release(ReleaseVersion),
}

/// Parse any version string into a comparable key.
pub fn parse_version(s: &str) -> ParsedVersion {
    match ReleaseVersion::parse(s) {
        Some(version) => ParsedVersion::Release(version),
        None => ParsedVersion::Legacy(s.trim().to_lowercase()),
    }
}
