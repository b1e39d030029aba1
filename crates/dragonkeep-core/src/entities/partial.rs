//! Partial objects
//!
//! The platform may deliver an object only by reference (its id) until it is
//! explicitly fetched. `Partial` makes that state part of the type so callers
//! cannot read fields of an object that was never loaded.

use std::future::Future;

/// Types that can be delivered by reference and fetched later
pub trait Resolvable: Sized {
    /// Identifier carried by the reference variant
    type Key: Copy + std::fmt::Debug + Send;

    /// Identifier of a resolved value
    fn key(&self) -> Self::Key;
}

/// An object that is either only referenced or fully materialized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Partial<T: Resolvable> {
    /// Only the identifier is known
    Reference(T::Key),
    /// All fields are loaded
    Resolved(T),
}

impl<T: Resolvable> Partial<T> {
    /// Identifier of the object, whichever variant holds it
    pub fn key(&self) -> T::Key {
        match self {
            Self::Reference(key) => *key,
            Self::Resolved(value) => value.key(),
        }
    }

    /// True when the object still needs a fetch
    #[inline]
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Reference(_))
    }

    /// Borrow the loaded value, if any
    pub fn as_resolved(&self) -> Option<&T> {
        match self {
            Self::Reference(_) => None,
            Self::Resolved(value) => Some(value),
        }
    }

    /// Produce a resolved value, calling `fetch` only for the reference variant
    pub async fn resolve_with<F, Fut, E>(self, fetch: F) -> Result<T, E>
    where
        F: FnOnce(T::Key) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self {
            Self::Reference(key) => fetch(key).await,
            Self::Resolved(value) => Ok(value),
        }
    }
}

impl<T: Resolvable> From<T> for Partial<T> {
    fn from(value: T) -> Self {
        Self::Resolved(value)
    }
}
