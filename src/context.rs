//! Twiddle-table contexts.
//!
//! An [`FftContext`] binds a transform size to its table of roots of unity.
//! Tables are immutable once built and shared through an [`Arc`], so cloning a
//! context is cheap and never recomputes anything.
//!
//! [`ContextCache`] owns one context per power-of-two size, indexed by the
//! base-2 exponent. With the `std` feature every thread gets its own cache for
//! each float type (see [`CachedFloat`]); nothing is shared across threads and
//! no locking is involved. All tables are released together when the cache is
//! dropped, i.e. when the owning thread exits.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::math::{is_power_of_two, power_of_two_exponent};
use crate::num::{Complex, Float};
use crate::twiddle::roots_of_unity;

/// Number of exponent slots reserved up front (sizes `1 ..= 2^19`).
const INITIAL_SLOTS: usize = 20;

/// Roots of unity for one transform size.
#[derive(Clone, Debug)]
pub struct FftContext<T: Float> {
    size: usize,
    roots: Arc<[Complex<T>]>,
}

impl<T: Float> FftContext<T> {
    /// Build an uncached context for `size`.
    ///
    /// The table lives as long as this context (and its clones).
    ///
    /// # Panics
    /// Panics if `size` is zero or not a power of two.
    pub fn new(size: usize) -> Self {
        assert!(
            is_power_of_two(size),
            "FFT context size must be a non-zero power of two, got {}",
            size
        );
        debug_log!("computing {} roots of unity for size {}", size / 2, size);
        Self {
            size,
            roots: Arc::from(roots_of_unity::<T>(size)),
        }
    }

    /// Transform size this context was built for.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The `size / 2` twiddle factors.
    pub fn roots(&self) -> &[Complex<T>] {
        &self.roots
    }

    /// Returns `true` when both contexts point at the same table allocation.
    pub fn shares_table_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.roots, &other.roots)
    }
}

/// Lazily populated, exponent-indexed store of [`FftContext`]s.
pub struct ContextCache<T: Float> {
    contexts: Vec<Option<FftContext<T>>>,
}

impl<T: Float> Default for ContextCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> ContextCache<T> {
    pub fn new() -> Self {
        let mut contexts = Vec::new();
        contexts.resize(INITIAL_SLOTS, None);
        Self { contexts }
    }

    /// Context for `size`, computing its table on first request.
    ///
    /// Repeated calls with the same size return handles to the same table.
    ///
    /// # Panics
    /// Panics if `size` is zero or not a power of two.
    pub fn get(&mut self, size: usize) -> FftContext<T> {
        assert!(
            size > 0 && is_power_of_two(size),
            "FFT context size must be a non-zero power of two, got {}",
            size
        );
        let index = power_of_two_exponent(size) as usize;
        if index >= self.contexts.len() {
            debug_log!(
                "growing context cache from {} to {} slots",
                self.contexts.len(),
                index + 1
            );
            self.contexts.resize(index + 1, None);
        }
        self.contexts[index]
            .get_or_insert_with(|| FftContext::new(size))
            .clone()
    }

    /// Number of exponent slots currently allocated.
    pub fn slots(&self) -> usize {
        self.contexts.len()
    }

    /// Number of sizes whose table has been computed.
    pub fn populated(&self) -> usize {
        self.contexts.iter().filter(|c| c.is_some()).count()
    }
}

/// Float types with a per-thread [`ContextCache`].
///
/// Without the `std` feature there is no thread-local storage; each call then
/// runs against a fresh cache and tables are rebuilt on demand.
pub trait CachedFloat: Float {
    /// Run `f` with this thread's cache for `Self`.
    fn with_context_cache<R>(f: impl FnOnce(&mut ContextCache<Self>) -> R) -> R;
}

#[cfg(feature = "std")]
std::thread_local! {
    static F32_CONTEXTS: core::cell::RefCell<ContextCache<f32>> =
        core::cell::RefCell::new(ContextCache::new());
    static F64_CONTEXTS: core::cell::RefCell<ContextCache<f64>> =
        core::cell::RefCell::new(ContextCache::new());
}

#[cfg(feature = "std")]
impl CachedFloat for f32 {
    fn with_context_cache<R>(f: impl FnOnce(&mut ContextCache<Self>) -> R) -> R {
        F32_CONTEXTS.with(|cache| f(&mut cache.borrow_mut()))
    }
}

#[cfg(feature = "std")]
impl CachedFloat for f64 {
    fn with_context_cache<R>(f: impl FnOnce(&mut ContextCache<Self>) -> R) -> R {
        F64_CONTEXTS.with(|cache| f(&mut cache.borrow_mut()))
    }
}

#[cfg(not(feature = "std"))]
impl CachedFloat for f32 {
    fn with_context_cache<R>(f: impl FnOnce(&mut ContextCache<Self>) -> R) -> R {
        f(&mut ContextCache::new())
    }
}

#[cfg(not(feature = "std"))]
impl CachedFloat for f64 {
    fn with_context_cache<R>(f: impl FnOnce(&mut ContextCache<Self>) -> R) -> R {
        f(&mut ContextCache::new())
    }
}

/// This thread's context for `size`.
///
/// # Panics
/// Panics if `size` is zero or not a power of two.
pub fn context_for_size<T: CachedFloat>(size: usize) -> FftContext<T> {
    T::with_context_cache(|cache| cache.get(size))
}
