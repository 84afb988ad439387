//! The capability a cache consults on a miss

/// Produces a value for a key and counts how often it was asked to
///
/// Implementations do no caching of their own: every call to [`fetch`]
/// does the work again and bumps the counter, whether or not the work
/// succeeded. Failures are encoded in `V` (for example a sentinel value),
/// since a memoizing caller stores whatever comes back.
///
/// [`fetch`]: ValueSource::fetch
pub trait ValueSource<K, V> {
    /// Produce the value for `key`
    fn fetch(&mut self, key: &K) -> V;

    /// Number of `fetch` calls made on this instance
    fn invocations(&self) -> u64;
}

impl<K, V, S> ValueSource<K, V> for Box<S>
where
    S: ValueSource<K, V> + ?Sized,
{
    fn fetch(&mut self, key: &K) -> V {
        (**self).fetch(key)
    }

    fn invocations(&self) -> u64 {
        (**self).invocations()
    }
}
