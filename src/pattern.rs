//! Path patterns used by rules, exclusions and cache groups.
//!
//! Two syntaxes are accepted:
//! - `/source/flags` is a regular expression searched anywhere in the path.
//!   Any text of letters after the closing `/` is a flag list; the only
//!   supported flag is `i` (case-insensitive), others are rejected.
//! - Anything else is a glob matched against the whole path (`*` crosses `/`).
//!   A rooted glob ending in a letters-only segment (`/assets/i`) reads as a
//!   regex literal; write it without the leading `/`.
//!
//! Paths are normalized to forward slashes before matching.

use crate::error::{BuildplanError, Result};
use globset::{Glob, GlobMatcher};
use regex::{Regex, RegexBuilder};
use regex_automata::dfa::{Automaton, StartKind, dense};
use regex_automata::nfa::thompson;
use regex_automata::util::syntax;
use regex_automata::{Anchored, Input, MatchKind};
use serde::{Serialize, Serializer};
use std::collections::{HashSet, VecDeque};
use std::fmt;

/// Upper bound on state pairs explored when intersecting two patterns.
const MAX_OVERLAP_STATES: usize = 20_000;

/// Regex flags accepted after the closing `/` of a regex literal.
const SUPPORTED_REGEX_FLAGS: &[char] = &['i'];

/// A parsed, not yet compiled, path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathPattern {
    Glob(String),
    Regex {
        source: String,
        case_insensitive: bool,
    },
}

impl PathPattern {
    /// Parse a raw pattern string.
    ///
    /// Fails when the pattern (or a regex body) is empty, or when a regex
    /// literal carries a flag other than `i`.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(BuildplanError::validation("pattern must be non-empty"));
        }

        if let Some((source, flags)) = split_regex_literal(raw) {
            if let Some(flag) = flags.chars().find(|c| !SUPPORTED_REGEX_FLAGS.contains(c)) {
                return Err(BuildplanError::validation(format!(
                    "unsupported regex flag '{}' in '{}' (only 'i' is supported; \
                     write rooted globs without the leading '/')",
                    flag, raw
                )));
            }
            if source.is_empty() {
                return Err(BuildplanError::validation(format!(
                    "regex pattern '{}' has an empty body",
                    raw
                )));
            }
            return Ok(PathPattern::Regex {
                source: source.to_string(),
                case_insensitive: flags.contains('i'),
            });
        }

        Ok(PathPattern::Glob(normalize_path(raw)))
    }

    /// Compile the pattern into a reusable matcher.
    pub fn compile(&self) -> Result<PathMatcher> {
        let kind = match self {
            PathPattern::Glob(glob) => {
                MatcherKind::Glob(parse_glob(glob)?.compile_matcher())
            }
            PathPattern::Regex {
                source,
                case_insensitive,
            } => {
                let compiled = RegexBuilder::new(source)
                    .case_insensitive(*case_insensitive)
                    .build()
                    .map_err(|e| {
                        BuildplanError::validation(format!("invalid regex '{}': {}", self, e))
                    })?;
                MatcherKind::Regex(compiled)
            }
        };

        Ok(PathMatcher {
            pattern: self.clone(),
            kind,
        })
    }

    /// A regex whose anchored whole-input matches are exactly the paths
    /// this pattern matches.
    fn whole_path_regex(&self) -> Result<String> {
        match self {
            PathPattern::Glob(glob) => {
                Ok(parse_glob(glob)?.regex().to_string())
            }
            PathPattern::Regex {
                source,
                case_insensitive,
            } => {
                let flags = if *case_insensitive { "(?i)" } else { "" };
                Ok(format!("(?s:.)*(?:{}{})(?s:.)*", flags, source))
            }
        }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathPattern::Glob(glob) => f.write_str(glob),
            PathPattern::Regex {
                source,
                case_insensitive,
            } => {
                write!(f, "/{}/", source)?;
                if *case_insensitive {
                    f.write_str("i")?;
                }
                Ok(())
            }
        }
    }
}

fn parse_glob(glob: &str) -> Result<Glob> {
    Glob::new(glob)
        .map_err(|e| BuildplanError::validation(format!("invalid glob '{}': {}", glob, e)))
}

/// Split `/source/flags` into its parts when `raw` is a regex literal.
///
/// A leading `/` alone does not make a regex: the text after the last `/`
/// must be empty or letters only, so `/src/**` stays a glob. Whether the
/// letters are supported flags is checked by the caller.
fn split_regex_literal(raw: &str) -> Option<(&str, &str)> {
    let body = raw.strip_prefix('/')?;
    let end = body.rfind('/')?;
    let (source, rest) = body.split_at(end);
    let flags = &rest[1..];
    if flags.chars().all(|c| c.is_ascii_alphabetic()) {
        Some((source, flags))
    } else {
        None
    }
}

#[derive(Clone)]
enum MatcherKind {
    Glob(GlobMatcher),
    Regex(Regex),
}

/// A compiled path pattern.
///
/// Equality compares the source pattern; the compiled form is derived from it.
#[derive(Clone)]
pub struct PathMatcher {
    pattern: PathPattern,
    kind: MatcherKind,
}

impl PathMatcher {
    /// Parse and compile in one step.
    pub fn new(raw: &str) -> Result<Self> {
        PathPattern::parse(raw)?.compile()
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Check whether `path` matches. Backslashes are treated as separators.
    pub fn is_match(&self, path: &str) -> bool {
        let path = normalize_path(path);
        match &self.kind {
            MatcherKind::Glob(m) => m.is_match(&path),
            MatcherKind::Regex(r) => r.is_match(&path),
        }
    }

    /// Check whether some path is matched by both patterns.
    ///
    /// Both patterns are turned into DFAs and their product is searched for
    /// an input accepted by each. Identical patterns always overlap. When a
    /// DFA cannot be built (e.g. Unicode word boundaries) or the product is
    /// too large, only identity is used.
    pub fn overlaps(&self, other: &PathMatcher) -> bool {
        if self.pattern == other.pattern {
            return true;
        }
        match dfas_intersect(&self.pattern, &other.pattern) {
            Some(shared) => shared,
            None => {
                tracing::debug!(
                    left = %self.pattern,
                    right = %other.pattern,
                    "pattern overlap undecided; compared by identity"
                );
                false
            }
        }
    }
}

impl Serialize for PathMatcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&self.pattern)
    }
}

fn build_dfa(pattern: &PathPattern) -> Option<dense::DFA<Vec<u32>>> {
    let regex = pattern.whole_path_regex().ok()?;
    dense::Builder::new()
        .configure(
            dense::DFA::config()
                .match_kind(MatchKind::All)
                .start_kind(StartKind::Anchored),
        )
        .syntax(syntax::Config::new().utf8(false))
        .thompson(thompson::Config::new().utf8(false))
        .build(&regex)
        .ok()
}

/// Breadth-first search over the product of both DFAs for an input that
/// both accept in full. `None` when undecided.
fn dfas_intersect(left: &PathPattern, right: &PathPattern) -> Option<bool> {
    let a = build_dfa(left)?;
    let b = build_dfa(right)?;

    let input = Input::new("").anchored(Anchored::Yes);
    let start = (
        a.start_state_forward(&input).ok()?,
        b.start_state_forward(&input).ok()?,
    );

    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some((sa, sb)) = queue.pop_front() {
        if a.is_match_state(a.next_eoi_state(sa)) && b.is_match_state(b.next_eoi_state(sb)) {
            return Some(true);
        }
        for byte in 0..=u8::MAX {
            let na = a.next_state(sa, byte);
            let nb = b.next_state(sb, byte);
            if a.is_dead_state(na) || b.is_dead_state(nb) {
                continue;
            }
            if a.is_quit_state(na) || b.is_quit_state(nb) {
                return None;
            }
            if seen.insert((na, nb)) {
                if seen.len() > MAX_OVERLAP_STATES {
                    return None;
                }
                queue.push_back((na, nb));
            }
        }
    }

    Some(false)
}

impl PartialEq for PathMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl std::fmt::Debug for PathMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PathMatcher")
            .field(&self.pattern.to_string())
            .finish()
    }
}

/// Normalize a file path to use forward slashes.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}
