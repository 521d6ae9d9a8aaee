//! Fallible allocation for working storage.
//!
//! Every engine allocates O(n²) state up front. A failed request surfaces as
//! [`Error::AllocationFailed`] instead of aborting the process.

use crate::error::{Error, Result};

/// Allocate a vector of `len` copies of `fill`.
pub(crate) fn filled<T: Clone>(len: usize, fill: T) -> Result<Vec<T>> {
    let mut out = reserve(len)?;
    out.resize(len, fill);
    Ok(out)
}

/// Allocate a vector holding every item of an exactly-sized iterator.
pub(crate) fn collect<T, I>(iter: I) -> Result<Vec<T>>
where
    I: ExactSizeIterator<Item = T>,
{
    let mut out = reserve(iter.len())?;
    out.extend(iter);
    Ok(out)
}

/// Allocate an empty vector with room for exactly `len` items.
pub(crate) fn reserve<T>(len: usize) -> Result<Vec<T>> {
    let mut out = Vec::new();
    out.try_reserve_exact(len).map_err(|_| Error::AllocationFailed {
        bytes: len.saturating_mul(core::mem::size_of::<T>()),
    })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_has_requested_len() {
        let v = filled(4, 1.5f64).unwrap();
        assert_eq!(v, vec![1.5; 4]);
    }

    #[test]
    fn collect_keeps_order() {
        let v = collect(0..5usize).unwrap();
        assert_eq!(v, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn oversized_request_is_reported() {
        let err = reserve::<u64>(usize::MAX).unwrap_err();
        assert!(matches!(err, Error::AllocationFailed { .. }));
    }
}
