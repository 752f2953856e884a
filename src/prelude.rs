pub use anyhow::{anyhow, Error};
pub use log::{debug, trace, warn};
pub use std::borrow::Borrow;
pub use std::hash::Hash;
pub use std::mem::replace;
pub use thiserror::Error;

pub type IndexMap<K, V> = indexmap::IndexMap<K, V, fxhash::FxBuildHasher>;
pub type Result<T = (), E = Error> = std::result::Result<T, E>;

#[inline(always)]
pub fn default<T: Default>() -> T {
    T::default()
}
