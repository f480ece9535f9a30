//! Deterministic surrogate keys for downstream modeling.

use md5::{Digest, Md5};
use std::fmt::Display;

const SEPARATOR: &str = "|";

/// Lowercase hex MD5 digest of the values' display forms joined with `|`.
///
/// Order matters: the key of `["a", "b"]` differs from that of `["b", "a"]`.
///
/// ```
/// use weather_lake::hash_key;
///
/// assert_eq!(hash_key(["Sugarloaf", "ME"]), "f72831787ae29c9754f20744cf38b435");
/// assert_eq!(hash_key(["Sugarloaf", "ME"]).len(), 32);
/// ```
pub fn hash_key<I>(values: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let joined = values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    hex::encode(Md5::digest(joined.as_bytes()))
}
