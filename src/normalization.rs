use serde::{Deserialize, Deserializer};

/// Normalizes a name by stripping surrounding whitespace and
/// decomposing it into Unicode Normalization Form D, so the same name
/// typed on different keyboards produces the same slug.
///
/// ```
/// use planner::normalization::normalize_name;
/// assert_eq!(normalize_name(" h\u{ef} "), "hi\u{308}");
/// ```
pub fn normalize_name(name: impl AsRef<str>) -> String {
    use unicode_normalization::UnicodeNormalization;

    name.as_ref().trim().nfd().to_string()
}

/// Deserializes a `String` after running it through `normalize_name`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(normalize_name(s))
}
