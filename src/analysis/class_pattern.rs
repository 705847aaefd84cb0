//! The block class naming convention
//!
//! Native store components expose hook classes shaped like
//! `vtex-flex-layout-0-x-flexRow--home`: a base token followed by one or
//! more `--modifier` groups. The first modifier is the block class a theme
//! declares in `props.blockClass`; any later group is a state modifier
//! (`--isActive`, `--selected`) applied at runtime.

use once_cell::sync::Lazy;
use regex::Regex;

static CONVENTION_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.([A-Za-z0-9_-]+(?:--[A-Za-z0-9_-]+)+)").expect("class pattern is valid")
});

/// Separator between a class base and its modifiers
const MODIFIER_SEPARATOR: &str = "--";

/// A naming-convention class found inside a selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionMatch<'a> {
    /// Class name without the leading dot
    pub class_name: &'a str,
    /// First modifier, if it is not empty
    pub primary_suffix: Option<&'a str>,
}

/// Every naming-convention class in `selector`, left to right
pub fn convention_matches(selector: &str) -> Vec<ConventionMatch<'_>> {
    CONVENTION_CLASS
        .captures_iter(selector)
        .filter_map(|caps| caps.get(1))
        .map(|class| {
            let class_name = class.as_str();
            ConventionMatch {
                class_name,
                primary_suffix: primary_suffix(class_name),
            }
        })
        .collect()
}

/// The segment after the first `--` of a class name.
///
/// `base--x--y` yields `x`. A name without a separator, or with an empty
/// first modifier, yields `None`.
pub fn primary_suffix(class_name: &str) -> Option<&str> {
    class_name
        .splitn(3, MODIFIER_SEPARATOR)
        .nth(1)
        .filter(|suffix| !suffix.is_empty())
}

/// Primary suffixes used by `selector`, in match order
pub fn selector_suffixes(selector: &str) -> impl Iterator<Item = &str> {
    CONVENTION_CLASS
        .captures_iter(selector)
        .filter_map(|caps| caps.get(1))
        .filter_map(|class| primary_suffix(class.as_str()))
}
