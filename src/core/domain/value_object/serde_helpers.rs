//! Serde helpers for fields the GNS3 server may report as `null`.

use serde::{Deserialize, Deserializer};

/// Deserializes a value that may be `null`, falling back to its default.
///
/// The server reports e.g. label coordinates as `null` when it lays them out
/// itself, while the models keep plain numbers.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
