//! GitHub API model types.

use serde::{Deserialize, Deserializer};

mod contributor;
mod repository;
mod work_item;

pub use contributor::*;
pub use repository::*;
pub use work_item::*;

/// Deserialize a field, reading `null` as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
