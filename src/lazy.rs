//! Single-pass lazy sequences
//!
//! A [`Producer`] wraps the iterator returned by a generator function. `filter`
//! and `map` wrap that iterator in a new producer without pulling any items, so
//! nothing is computed until the sequence is consumed.
//!
//! The generator function is called exactly once, when the producer is built.
//! The sequence it returns is not restartable: [`Producer::generate`] hands it
//! out on the first call and yields an empty sequence afterwards.

use std::iter::{Filter, Map};

/// A lazy, single-pass source of items
///
/// Not `Clone`: the underlying sequence exists once and is handed out once.
#[derive(Debug)]
pub struct Producer<I> {
    source: Option<I>,
}

impl<I> Producer<I>
where
    I: Iterator,
{
    /// Build a producer by calling `gen_fn` once
    pub fn new<G>(gen_fn: G) -> Self
    where
        G: FnOnce() -> I,
    {
        Self {
            source: Some(gen_fn()),
        }
    }

    /// Keep only items for which `predicate` returns true
    pub fn filter<P>(self, predicate: P) -> Producer<Filter<I, P>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        Producer {
            source: self.source.map(|iter| iter.filter(predicate)),
        }
    }

    /// Transform each item with `f`
    pub fn map<B, F>(self, f: F) -> Producer<Map<I, F>>
    where
        F: FnMut(I::Item) -> B,
    {
        Producer {
            source: self.source.map(|iter| iter.map(f)),
        }
    }

    /// Take the sequence
    ///
    /// The first call returns every item of the underlying sequence; later
    /// calls return an empty sequence.
    pub fn generate(&mut self) -> impl Iterator<Item = I::Item> {
        self.source.take().into_iter().flatten()
    }
}

/// Filter a generator function's sequence lazily
pub fn lazy_filter<I, G, P>(gen_fn: G, predicate: P) -> Producer<Filter<I, P>>
where
    I: Iterator,
    G: FnOnce() -> I,
    P: FnMut(&I::Item) -> bool,
{
    Producer::new(gen_fn).filter(predicate)
}

/// Map a generator function's sequence lazily
pub fn lazy_map<I, G, B, F>(gen_fn: G, f: F) -> Producer<Map<I, F>>
where
    I: Iterator,
    G: FnOnce() -> I,
    F: FnMut(I::Item) -> B,
{
    Producer::new(gen_fn).map(f)
}
