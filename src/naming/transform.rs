//! Pipeline steps used by the naming strategy
//!
//! Class names use `\` between namespace segments:
//!   App\Entities\Media\Audio
//!     namespace trim (App\Entities) → Media\Audio
//!     separator replace ("_")        → Media_Audio
//!
//! Every function here is pure; the strategy decides which ones run.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::config::{CaseMode, JoinOrder};

/// Separator between namespace segments in a class name
pub const NAMESPACE_PATH_SEPARATOR: char = '\\';

/// Prefix removed from the class segment when abstract trimming is on
pub const ABSTRACT_PREFIX: &str = "Abstract";

lazy_static! {
    // lowercase immediately followed by uppercase; string start, digits and
    // runs of capitals never split
    static ref CAMEL_HUMP: Regex = Regex::new(r"([a-z])([A-Z])").unwrap();
}

/// Final path segment of a class name
/// "App\Entities\Keyword" → "Keyword"
/// "Keyword"              → "Keyword"
pub fn last_segment(class_name: &str) -> &str {
    match class_name.rfind(NAMESPACE_PATH_SEPARATOR) {
        Some(pos) => &class_name[pos + NAMESPACE_PATH_SEPARATOR.len_utf8()..],
        None => class_name,
    }
}

/// Strip `namespace` and the separator after it.
///
/// Returns `None` unless the class lives strictly below the namespace.
pub fn trim_namespace<'a>(class_name: &'a str, namespace: &str) -> Option<&'a str> {
    class_name
        .strip_prefix(namespace)?
        .strip_prefix(NAMESPACE_PATH_SEPARATOR)
        .filter(|rest| !rest.is_empty())
}

/// Drop a leading "Abstract" from the final segment only
/// "Media\AbstractAudio" → "Media\Audio"
/// "AbstractMedia\Audio" → "AbstractMedia\Audio"
pub fn trim_abstract_prefix(name: &str) -> String {
    let (head, segment) = match name.rfind(NAMESPACE_PATH_SEPARATOR) {
        Some(pos) => name.split_at(pos + NAMESPACE_PATH_SEPARATOR.len_utf8()),
        None => ("", name),
    };

    match segment.strip_prefix(ABSTRACT_PREFIX) {
        Some(rest) => format!("{}{}", head, rest),
        None => name.to_string(),
    }
}

pub fn replace_path_separator(name: &str, separator: &str) -> String {
    name.replace(NAMESPACE_PATH_SEPARATOR, separator)
}

/// Insert `separator` at every lower → upper boundary
/// "CompactDisc"   → "Compact.Disc"
/// "one_MoreThing" → "one_More.Thing"
/// "HTTPClient"    → "HTTPClient"
pub fn split_camel_case(value: &str, separator: &str) -> String {
    CAMEL_HUMP
        .replace_all(value, |caps: &Captures| {
            format!("{}{}{}", &caps[1], separator, &caps[2])
        })
        .into_owned()
}

pub fn apply_case(value: &str, case: CaseMode) -> String {
    match case {
        CaseMode::Mixed => value.to_string(),
        CaseMode::Lower => value.to_ascii_lowercase(),
        CaseMode::Upper => value.to_ascii_uppercase(),
    }
}

pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

/// Split only where two already-split parts meet.
///
/// The last char of `first`, the join `separator` and the first char of
/// `second` are the only new text; boundaries inside either part were
/// handled when that part was generated.
/// "id" + "" + "One_More.Property" → "id.One_More.Property"
pub fn split_join_seam(
    first: &str,
    separator: &str,
    second: &str,
    camel_separator: &str,
) -> String {
    let (head, tail) = match first.char_indices().last() {
        Some((pos, _)) => first.split_at(pos),
        None => ("", ""),
    };
    let (lead, rest) = match second.chars().next() {
        Some(c) => second.split_at(c.len_utf8()),
        None => ("", ""),
    };

    let seam = format!("{}{}{}", tail, separator, lead);
    format!("{}{}{}", head, split_camel_case(&seam, camel_separator), rest)
}

/// Operands of a join in output order
pub fn order_operands<'a>(
    root_name: &'a str,
    add_name: &'a str,
    order: JoinOrder,
) -> (&'a str, &'a str) {
    match order {
        JoinOrder::Prepend => (add_name, root_name),
        JoinOrder::Append => (root_name, add_name),
    }
}

/// Second operand as it appears in a joined name
pub fn join_operand(second: &str, separator: &str, case: CaseMode) -> String {
    if separator.is_empty() && case != CaseMode::Lower {
        capitalize_first(second)
    } else {
        second.to_string()
    }
}

/// Join two names around `separator`.
///
/// The second operand is capitalized when there is no separator and the
/// case mode is not lower, so "id" + "someColumn" reads "idSomeColumn".
pub fn join_names(
    root_name: &str,
    add_name: &str,
    order: JoinOrder,
    separator: &str,
    case: CaseMode,
) -> String {
    let (first, second) = order_operands(root_name, add_name, order);
    format!("{}{}{}", first, separator, join_operand(second, separator, case))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_last_segment() {
        assert_eq!(last_segment("App\\Entities\\Keyword"), "Keyword");
        assert_eq!(last_segment("Keyword"), "Keyword");
        assert_eq!(last_segment(""), "");
        assert_eq!(last_segment("App\\"), "");
    }

    #[test]
    fn test_trim_namespace() {
        assert_eq!(
            trim_namespace("App\\Entities\\Media\\Audio", "App\\Entities"),
            Some("Media\\Audio")
        );
        assert_eq!(trim_namespace("App\\Entities\\Keyword", "Other"), None);
    }

    #[test]
    fn test_trim_namespace_requires_segment_boundary() {
        assert_eq!(trim_namespace("App\\EntitiesExtra\\Keyword", "App\\Entities"), None);
        assert_eq!(trim_namespace("App\\Entities", "App\\Entities"), None);
        assert_eq!(trim_namespace("App\\Entities\\", "App\\Entities"), None);
    }

    #[test]
    fn test_trim_abstract_prefix() {
        assert_eq!(trim_abstract_prefix("AbstractMedia"), "Media");
        assert_eq!(trim_abstract_prefix("Media\\AbstractAudio"), "Media\\Audio");
        assert_eq!(trim_abstract_prefix("AbstractMedia\\Audio"), "AbstractMedia\\Audio");
        assert_eq!(trim_abstract_prefix("abstractMedia"), "abstractMedia");
        assert_eq!(trim_abstract_prefix("Media"), "Media");
    }

    #[test]
    fn test_replace_path_separator() {
        assert_eq!(replace_path_separator("Media\\Audio\\Vinyl", "_"), "Media_Audio_Vinyl");
        assert_eq!(replace_path_separator("Media\\Audio", "::"), "Media::Audio");
        assert_eq!(replace_path_separator("Keyword", "_"), "Keyword");
    }

    #[test]
    fn test_split_camel_case() {
        assert_eq!(split_camel_case("CompactDisc", "."), "Compact.Disc");
        assert_eq!(split_camel_case("yetAnotherProperty", "."), "yet.Another.Property");
        assert_eq!(split_camel_case("one_MoreProperty", "."), "one_More.Property");
    }

    #[test]
    fn test_split_camel_case_ignores_capital_runs_and_digits() {
        assert_eq!(split_camel_case("HTTPClient", "_"), "HTTPClient");
        assert_eq!(split_camel_case("Media2Audio", "_"), "Media2Audio");
        assert_eq!(split_camel_case("", "_"), "");
    }

    #[test]
    fn test_split_camel_case_separator_is_literal() {
        assert_eq!(split_camel_case("someColumn", "$1"), "some$1Column");
    }

    #[test]
    fn test_apply_case() {
        assert_eq!(apply_case("Media_Audio", CaseMode::Mixed), "Media_Audio");
        assert_eq!(apply_case("Media_Audio", CaseMode::Lower), "media_audio");
        assert_eq!(apply_case("Media_Audio", CaseMode::Upper), "MEDIA_AUDIO");
    }

    #[test]
    fn test_split_join_seam() {
        assert_eq!(split_join_seam("id", "", "One_More.Property", "."), "id.One_More.Property");
        assert_eq!(split_join_seam("somexColumn", "_", "id", "x"), "somexColumn_id");
        assert_eq!(split_join_seam("id", "", "SomexColumn", "x"), "idxSomexColumn");
        assert_eq!(split_join_seam("", "_", "id", "."), "_id");
        assert_eq!(split_join_seam("id", "", "", "."), "id");
    }

    #[test]
    fn test_join_names() {
        assert_eq!(
            join_names("someColumn", "id", JoinOrder::Prepend, "", CaseMode::Mixed),
            "idSomeColumn"
        );
        assert_eq!(
            join_names("someColumn", "id", JoinOrder::Append, "_", CaseMode::Mixed),
            "someColumn_id"
        );
        assert_eq!(
            join_names("somecolumn", "id", JoinOrder::Prepend, "", CaseMode::Lower),
            "idsomecolumn"
        );
        assert_eq!(
            join_names("Media", "Keyword", JoinOrder::Append, "", CaseMode::Upper),
            "MediaKeyword"
        );
    }
}
