//! A single parsed manifest entry.
//!
//! Three line shapes are recognized:
//!
//! - plain: `name[extra1,extra2] >= 1.0, < 2.0`
//! - local path: `-e ./path/to/project` or a bare `./path`
//! - version control: `-e git+https://host/repo.git@rev#egg=name`
//!
//! A plain entry with no specifier is stored with the synthetic `> 0` spec,
//! which any installed version satisfies.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ReqzError, Result};

use super::version::Operator;

/// Version-control schemes accepted before `+` in a URL.
const VCS_SCHEMES: [&str; 4] = ["git+", "hg+", "svn+", "bzr+"];

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?$").unwrap());

static PLAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)\s*(?:\[(?P<extras>[^\[\]]*)\])?\s*(?P<specs>.*)$")
        .unwrap()
});

static SPEC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<op>==|>=|<=|>|<)\s*(?P<version>[A-Za-z0-9][A-Za-z0-9.*+!_-]*)$").unwrap()
});

/// One (operator, version) constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Spec {
    pub op: Operator,
    pub version: String,
}

impl Spec {
    /// Create a spec.
    pub fn new(op: Operator, version: impl Into<String>) -> Self {
        Self {
            op,
            version: version.into(),
        }
    }

    /// The synthetic "any installed version" spec (`> 0`).
    pub fn any() -> Self {
        Self::new(Operator::Gt, "0")
    }

    /// Whether this is the synthetic "any installed version" spec.
    pub fn is_any(&self) -> bool {
        self.op == Operator::Gt && self.version == "0"
    }

    /// Whether `version` satisfies this spec.
    ///
    /// The synthetic spec accepts every version, including `0` and
    /// legacy strings that sort below it.
    pub fn satisfied_by(&self, version: &str) -> bool {
        self.is_any() || self.op.compare(version, &self.version)
    }
}

impl fmt::Display for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op, self.version)
    }
}

/// Where a requirement comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementSource {
    /// A package from the index.
    Plain,
    /// A project on the local filesystem.
    LocalPath { path: String, editable: bool },
    /// A version-control checkout.
    VersionControl {
        uri: String,
        revision: Option<String>,
        editable: bool,
    },
}

impl RequirementSource {
    /// Whether the line carried `-e`.
    pub fn is_editable(&self) -> bool {
        match self {
            RequirementSource::Plain => false,
            RequirementSource::LocalPath { editable, .. }
            | RequirementSource::VersionControl { editable, .. } => *editable,
        }
    }
}

/// A parsed requirement line.
///
/// Structural equality ignores name case, extras order and spec order.
/// The looser "same requirement" test used when adding entries is
/// [`RequirementRecord::overlaps`].
#[derive(Debug, Clone)]
pub struct RequirementRecord {
    name: String,
    extras: Vec<String>,
    specs: Vec<Spec>,
    source: RequirementSource,
}

impl RequirementRecord {
    /// Parse one manifest line.
    pub fn parse(line: &str) -> Result<Self> {
        let fail = |message: &str| ReqzError::Parse {
            line: line.trim().to_string(),
            message: message.to_string(),
        };

        let text = strip_inline_comment(line.trim());
        if text.is_empty() {
            return Err(fail("empty requirement"));
        }

        let (editable, target) = match split_editable(text) {
            Some(rest) if rest.is_empty() => return Err(fail("-e requires a path or URL")),
            Some(rest) => (true, rest),
            None => (false, text),
        };

        if is_vcs_url(target) {
            return parse_vcs(target, editable).map_err(|m| fail(&m));
        }
        if target.contains("://") {
            return Err(fail(
                "URL requirements need a VCS scheme (git+, hg+, svn+, bzr+)",
            ));
        }
        if editable || looks_like_path(target) {
            return parse_local(target, editable).map_err(|m| fail(&m));
        }
        parse_plain(target).map_err(|m| fail(&m))
    }

    /// Package name as written.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercase name used for comparisons.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Extras in the order they were written.
    pub fn extras(&self) -> &[String] {
        &self.extras
    }

    /// Version specs; never empty.
    pub fn specs(&self) -> &[Spec] {
        &self.specs
    }

    /// The source kind of this requirement.
    pub fn source(&self) -> &RequirementSource {
        &self.source
    }

    /// Whether this requirement accepts any installed version.
    pub fn is_any_version(&self) -> bool {
        self.specs == [Spec::any()]
    }

    /// Whether both records name the same package and share a spec verbatim.
    pub fn overlaps(&self, other: &RequirementRecord) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
            && self.specs.iter().any(|spec| other.specs.contains(spec))
    }

    /// Whether any spec is satisfied by `version`.
    ///
    /// Specs are unioned: `>= 1.0, <= 2.0` is satisfied by `3.0` because
    /// the first spec matches.
    pub fn satisfied_by(&self, version: &str) -> bool {
        self.specs.iter().any(|spec| spec.satisfied_by(version))
    }

    /// Whether any spec is satisfied by any of `versions`.
    pub fn satisfied_by_any<'a, I>(&self, versions: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        versions.into_iter().any(|v| self.satisfied_by(v))
    }

    /// Whether `version` appears verbatim in an inclusive spec.
    pub fn pins_version(&self, version: &str) -> bool {
        self.specs
            .iter()
            .any(|spec| spec.op.is_inclusive() && spec.version == version)
    }

    /// The specs joined as written in a manifest: `>= 1.0,< 2.0`.
    pub fn spec_string(&self) -> String {
        self.specs
            .iter()
            .map(Spec::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// The extras as written in a manifest, including brackets.
    pub fn extras_string(&self) -> String {
        if self.extras.is_empty() {
            String::new()
        } else {
            format!("[{}]", self.extras.join(", "))
        }
    }
}

impl PartialEq for RequirementRecord {
    fn eq(&self, other: &Self) -> bool {
        let extras = |r: &Self| r.extras.iter().map(|e| e.to_lowercase()).collect::<HashSet<_>>();
        let specs = |r: &Self| r.specs.iter().cloned().collect::<HashSet<_>>();
        self.name.eq_ignore_ascii_case(&other.name)
            && self.source == other.source
            && extras(self) == extras(other)
            && specs(self) == specs(other)
    }
}

impl Eq for RequirementRecord {}

impl FromStr for RequirementRecord {
    type Err = ReqzError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RequirementRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.source.is_editable() { "-e " } else { "" };
        match &self.source {
            RequirementSource::LocalPath { path, .. } => write!(f, "{}{}", prefix, path),
            RequirementSource::VersionControl { uri, revision, .. } => {
                write!(f, "{}{}", prefix, uri)?;
                if let Some(rev) = revision {
                    write!(f, "@{}", rev)?;
                }
                write!(f, "#egg={}", self.name)
            }
            RequirementSource::Plain => write!(
                f,
                "{}{} {}",
                self.name,
                self.extras_string(),
                self.spec_string()
            ),
        }
    }
}

/// Whether a manifest line is a pip option rather than a requirement.
pub fn is_option_line(line: &str) -> bool {
    const OPTIONS: [&str; 12] = [
        "-r",
        "--requirement",
        "-c",
        "--constraint",
        "-i",
        "--index-url",
        "--extra-index-url",
        "-f",
        "--find-links",
        "--no-index",
        "--pre",
        "--trusted-host",
    ];
    let first = line.split_whitespace().next().unwrap_or("");
    let flag = first.split('=').next().unwrap_or("");
    OPTIONS.contains(&flag)
}

fn strip_inline_comment(text: &str) -> &str {
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'#' && (i == 0 || bytes[i - 1].is_ascii_whitespace()) {
            return text[..i].trim_end();
        }
    }
    text
}

fn split_editable(text: &str) -> Option<&str> {
    for flag in ["--editable", "-e"] {
        if let Some(rest) = text.strip_prefix(flag) {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) || rest.starts_with('=') {
                return Some(rest.trim_start_matches('=').trim());
            }
        }
    }
    None
}

fn is_vcs_url(text: &str) -> bool {
    let lower = text.to_lowercase();
    VCS_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) && lower.contains("://")
}

fn looks_like_path(text: &str) -> bool {
    text.starts_with('.')
        || text.starts_with('/')
        || text.starts_with('~')
        || text.contains('/')
        || text.contains('\\')
}

fn egg_name(fragment: &str) -> Option<&str> {
    fragment
        .split('&')
        .find_map(|part| part.strip_prefix("egg="))
        .filter(|name| !name.is_empty())
}

fn parse_vcs(target: &str, editable: bool) -> std::result::Result<RequirementRecord, String> {
    let (url, fragment) = target
        .split_once('#')
        .ok_or_else(|| "VCS requirements need an #egg=name fragment".to_string())?;
    let name = egg_name(fragment)
        .ok_or_else(|| "VCS requirements need an #egg=name fragment".to_string())?;
    if !NAME_REGEX.is_match(name) {
        return Err(format!("invalid package name in #egg fragment: {}", name));
    }

    // The revision '@' must follow the host, so user@host is left alone.
    let path_start = url
        .find("://")
        .and_then(|i| url[i + 3..].find('/').map(|j| i + 3 + j))
        .unwrap_or(url.len());
    let (uri, revision) = match url[path_start..].rfind('@') {
        Some(at) => {
            let at = path_start + at;
            let rev = &url[at + 1..];
            if rev.is_empty() {
                return Err("empty revision after '@'".to_string());
            }
            (url[..at].to_string(), Some(rev.to_string()))
        }
        None => (url.to_string(), None),
    };

    Ok(RequirementRecord {
        name: name.to_string(),
        extras: Vec::new(),
        specs: vec![Spec::any()],
        source: RequirementSource::VersionControl {
            uri,
            revision,
            editable,
        },
    })
}

fn parse_local(target: &str, editable: bool) -> std::result::Result<RequirementRecord, String> {
    let (path, fragment) = match target.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (target, None),
    };
    let (path, extras) = split_path_extras(path)?;
    let trimmed = match path.trim_end_matches(['/', '\\']) {
        "" => path,
        trimmed => trimmed,
    };
    let name = match fragment.and_then(egg_name) {
        Some(name) => name,
        None => trimmed.rsplit(['/', '\\']).next().unwrap_or(""),
    };
    // `.` and `..` name no project; the path itself stands in for the name.
    let name = if name.is_empty() || name == "." || name == ".." {
        trimmed.to_string()
    } else {
        name.to_string()
    };

    Ok(RequirementRecord {
        name,
        extras,
        specs: vec![Spec::any()],
        source: RequirementSource::LocalPath {
            path: target.to_string(),
            editable,
        },
    })
}

/// Split `./proj[dev, test]` into the path and its extras.
fn split_path_extras(path: &str) -> std::result::Result<(&str, Vec<String>), String> {
    let Some(open) = path.strip_suffix(']').and_then(|p| p.rfind('[')) else {
        return Ok((path, Vec::new()));
    };
    let extras = path[open + 1..path.len() - 1]
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(|e| {
            if NAME_REGEX.is_match(e) {
                Ok(e.to_string())
            } else {
                Err(format!("invalid extra: {}", e))
            }
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((&path[..open], extras))
}

fn parse_plain(target: &str) -> std::result::Result<RequirementRecord, String> {
    // Environment markers do not affect the manifest model.
    let target = target.split(';').next().unwrap_or("").trim();

    let caps = PLAIN_REGEX
        .captures(target)
        .ok_or_else(|| format!("invalid package name: {}", target))?;
    let name = caps["name"].to_string();
    let rest = caps.name("specs").map_or("", |m| m.as_str()).trim();

    if rest.contains('[') || rest.contains(']') {
        return Err("unbalanced extras brackets".to_string());
    }

    let extras = match caps.name("extras") {
        Some(m) => m
            .as_str()
            .split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(|e| {
                if NAME_REGEX.is_match(e) {
                    Ok(e.to_string())
                } else {
                    Err(format!("invalid extra: {}", e))
                }
            })
            .collect::<std::result::Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    let specs = if rest.is_empty() {
        vec![Spec::any()]
    } else {
        rest.split(',').map(parse_spec).collect::<std::result::Result<Vec<_>, _>>()?
    };

    Ok(RequirementRecord {
        name,
        extras,
        specs,
        source: RequirementSource::Plain,
    })
}

fn parse_spec(text: &str) -> std::result::Result<Spec, String> {
    let text = text.trim();
    if text.is_empty() {
        return Err("empty version specifier".to_string());
    }
    for unsupported in ["===", "!=", "~="] {
        if text.starts_with(unsupported) {
            return Err(format!("unsupported operator '{}'", unsupported));
        }
    }
    let caps = SPEC_REGEX
        .captures(text)
        .ok_or_else(|| format!("malformed version specifier: {}", text))?;
    let op = Operator::from_symbol(&caps["op"])
        .ok_or_else(|| format!("malformed version specifier: {}", text))?;
    Ok(Spec::new(op, &caps["version"]))
}
