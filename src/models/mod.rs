pub mod appointment;
pub mod doctor;
pub mod enums;
pub mod filters;
pub mod reminder;

pub use appointment::*;
pub use doctor::*;
pub use enums::*;
pub use filters::*;
pub use lab_test::*;
pub use reminder::*;

use serde::{Deserialize, Deserializer};

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) in partial updates. Pair with `#[serde(default)]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
