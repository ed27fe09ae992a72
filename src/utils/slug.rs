//! Slug generation
//!
//! `slugify` is deterministic; `allocate_slug` checks the store and
//! appends `random_suffix()` when a derived base slug is already taken.

use std::future::Future;

use lazy_static::lazy_static;
use rand::{distributions::Alphanumeric, Rng};
use regex::Regex;

use super::errors::{validation_error, AppError, AppResult};

pub const SLUG_MAX_LEN: usize = 60;
pub const SUFFIX_LEN: usize = 6;
const SUFFIX_ATTEMPTS: usize = 5;

lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref INVALID_RE: Regex = Regex::new(r"[^a-z0-9-]").unwrap();
    static ref HYPHENS_RE: Regex = Regex::new(r"-{2,}").unwrap();
}

/// Lowercase, whitespace runs to `-`, strip anything outside `[a-z0-9-]`,
/// truncate to `SLUG_MAX_LEN`.
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let hyphenated = WHITESPACE_RE.replace_all(&lowered, "-");
    let stripped = INVALID_RE.replace_all(&hyphenated, "");
    let collapsed = HYPHENS_RE.replace_all(&stripped, "-");

    let mut slug: String = collapsed.trim_matches('-').chars().take(SLUG_MAX_LEN).collect();
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Short lowercase alphanumeric suffix used on collision
pub fn random_suffix() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect()
}

/// `base` with a random suffix, still within `SLUG_MAX_LEN`
pub fn with_suffix(base: &str) -> String {
    let room = SLUG_MAX_LEN - SUFFIX_LEN - 1;
    let head: String = base.chars().take(room).collect();
    format!("{}-{}", head.trim_end_matches('-'), random_suffix())
}

/// True when `value` is already in canonical slug form
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty() && slugify(value) == value
}

/// Pick the slug for a new or renamed catalog entry.
///
/// A caller-supplied slug is normalized and must be free, otherwise the
/// request is a conflict. A derived slug gets a random suffix when its base
/// is already taken.
pub async fn allocate_slug<F, Fut>(
    resource: &str,
    requested: Option<&str>,
    source: &str,
    exists: F,
) -> AppResult<String>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = AppResult<bool>>,
{
    if let Some(raw) = requested {
        let slug = slugify(raw);
        if slug.is_empty() {
            return Err(validation_error("slug", "slug", "must contain letters or digits"));
        }
        if exists(slug.clone()).await? {
            return Err(AppError::Conflict(format!(
                "{} with slug '{}' already exists",
                resource, slug
            )));
        }
        return Ok(slug);
    }

    let base = slugify(source);
    if base.is_empty() {
        return Err(validation_error(
            "slug",
            "slug",
            "cannot be derived from the name, provide one",
        ));
    }
    if !exists(base.clone()).await? {
        return Ok(base);
    }

    for _ in 0..SUFFIX_ATTEMPTS {
        let candidate = with_suffix(&base);
        if !exists(candidate.clone()).await? {
            return Ok(candidate);
        }
    }
    Err(AppError::Conflict(format!(
        "Could not find a free slug for {} '{}'",
        resource, base
    )))
}
