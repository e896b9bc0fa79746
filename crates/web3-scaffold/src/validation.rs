//! Project name validation
//!
//! A project name becomes the `name` field of the generated `package.json`,
//! so it must satisfy npm's rules for new packages. It must also not match a
//! package the template depends on, or the package manager would resolve the
//! project itself in place of that dependency.

use crate::config::ScaffoldConfig;
use crate::error::{Error, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Characters `encodeURIComponent` leaves untouched
static URL_SAFE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\-_.!~*'()]*$").expect("url-safe regex is valid"));

/// `@scope/name` split
static SCOPED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([^/]+)/([^/]+)$").expect("scoped name regex is valid"));

static SPECIAL_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[~'!()*]").expect("special chars regex is valid"));

const MAX_NAME_LENGTH: usize = 214;

const BLOCKLIST: &[&str] = &["node_modules", "favicon.ico"];

/// Node.js core module names
const NODE_BUILTINS: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// Result of validating a candidate name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameValidation {
    /// Name can be used
    Valid,
    /// Name breaks npm naming rules
    Invalid { problems: Vec<String> },
    /// Name is on the reserved list
    Reserved,
}

impl NameValidation {
    /// Whether the name can be used
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// `invalid-name` or `reserved` when not valid
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Self::Valid => None,
            Self::Invalid { .. } => Some("invalid-name"),
            Self::Reserved => Some("reserved"),
        }
    }

    /// Convert into the matching friendly error
    pub fn into_result(self, name: &str) -> Result<()> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid { problems } => Err(Error::invalid_project_name(name, problems)),
            Self::Reserved => Err(Error::reserved_project_name(name)),
        }
    }
}

/// Validates project names against npm rules and a reserved set
#[derive(Debug, Clone, Default)]
pub struct NameValidator {
    reserved: BTreeSet<String>,
}

impl NameValidator {
    /// Create a validator with the given reserved names
    pub fn new<I, S>(reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reserved: reserved.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a validator from the configured reserved names
    pub fn from_config(config: &ScaffoldConfig) -> Self {
        Self::new(config.reserved_names.iter().cloned())
    }

    /// Whether `name` is reserved
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }

    /// Validate a trimmed, non-empty candidate
    pub fn validate(&self, name: &str) -> NameValidation {
        let problems = npm_name_problems(name);
        if !problems.is_empty() {
            return NameValidation::Invalid { problems };
        }
        if self.is_reserved(name) {
            return NameValidation::Reserved;
        }
        NameValidation::Valid
    }
}

/// Problems that make `name` unusable as a new npm package name
pub fn npm_name_problems(name: &str) -> Vec<String> {
    let mut problems = Vec::new();

    if name.is_empty() {
        problems.push("name length must be greater than zero".to_string());
        return problems;
    }
    if name.starts_with('.') {
        problems.push("name cannot start with a period".to_string());
    }
    if name.starts_with('_') {
        problems.push("name cannot start with an underscore".to_string());
    }
    if name.trim() != name {
        problems.push("name cannot contain leading or trailing spaces".to_string());
    }

    let lower = name.to_lowercase();
    if BLOCKLIST.contains(&lower.as_str()) {
        problems.push(format!("{} is a blocklisted name", lower));
    }
    if NODE_BUILTINS.contains(&lower.as_str()) {
        problems.push(format!("{} is a core module name", name));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        problems.push(format!(
            "name can no longer contain more than {} characters",
            MAX_NAME_LENGTH
        ));
    }
    if lower != name {
        problems.push("name can no longer contain capital letters".to_string());
    }

    let last_segment = name.rsplit('/').next().unwrap_or(name);
    if SPECIAL_CHARS_RE.is_match(last_segment) {
        problems.push("name can no longer contain special characters (\"~'!()*\")".to_string());
    }

    if !is_url_safe(name) {
        problems.push("name can only contain URL-friendly characters".to_string());
    }

    problems
}

fn is_url_safe(name: &str) -> bool {
    if URL_SAFE_RE.is_match(name) {
        return true;
    }
    match SCOPED_RE.captures(name) {
        Some(caps) => URL_SAFE_RE.is_match(&caps[1]) && URL_SAFE_RE.is_match(&caps[2]),
        None => false,
    }
}
