//! Random selection helpers used by graph generation.
//!
//! Every function takes the random source explicitly so generation can be
//! replayed from a seed.

use crate::error::SelectionError;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Pick one value with probability proportional to its weight.
///
/// Entries with zero weight are never chosen.
pub fn pick_weighted<T, R>(
    rng: &mut R,
    items: impl IntoIterator<Item = (f32, T)>,
) -> Result<T, SelectionError>
where
    R: Rng + ?Sized,
{
    let mut cumulative = Vec::new();
    let mut total = 0.0_f32;

    for (weight, value) in items {
        if !weight.is_finite() || weight < 0.0 {
            return Err(SelectionError::NegativeWeight);
        }
        total += weight;
        cumulative.push((total, value));
    }

    if cumulative.is_empty() || total <= 0.0 {
        return Err(SelectionError::EmptyInput);
    }
    if !total.is_finite() {
        return Err(SelectionError::WeightOverflow);
    }

    let roll = rng.random_range(0.0..total);
    cumulative
        .into_iter()
        .find(|(threshold, _)| *threshold > roll)
        .map(|(_, value)| value)
        .ok_or(SelectionError::EmptyInput)
}

/// Remove and return a uniformly random element
pub fn remove_random<T, R>(rng: &mut R, items: &mut Vec<T>) -> Result<T, SelectionError>
where
    R: Rng + ?Sized,
{
    if items.is_empty() {
        return Err(SelectionError::EmptyCollection);
    }
    let index = rng.random_range(0..items.len());
    Ok(items.remove(index))
}

/// Return a uniformly random element without removing it
pub fn peek_random<'a, T, R>(rng: &mut R, items: &'a [T]) -> Result<&'a T, SelectionError>
where
    R: Rng + ?Sized,
{
    items.choose(rng).ok_or(SelectionError::EmptyCollection)
}

/// Draw `count` distinct elements from a private copy of `items`.
///
/// The source slice is left untouched.
pub fn remove_random_distinct_n<T, R>(
    rng: &mut R,
    items: &[T],
    count: usize,
) -> Result<Vec<T>, SelectionError>
where
    T: Clone,
    R: Rng + ?Sized,
{
    if count > items.len() {
        return Err(SelectionError::InsufficientElements {
            requested: count,
            available: items.len(),
        });
    }

    let mut snapshot = items.to_vec();
    (0..count).map(|_| remove_random(rng, &mut snapshot)).collect()
}

/// A list that hands out its elements at random.
///
/// Used as the `connected` / `unconnected` pools during the spanning phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomPool<T> {
    items: Vec<T>,
}

impl<T> RandomPool<T> {
    pub fn new() -> Self {
        RandomPool { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Remove the first element equal to `item`.
    /// Returns true if something was removed.
    pub fn remove(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        match self.items.iter().position(|x| x == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn remove_one<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<T, SelectionError> {
        remove_random(rng, &mut self.items)
    }

    pub fn get_one<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&T, SelectionError> {
        peek_random(rng, &self.items)
    }

    /// Remove `count` elements, failing before touching the pool if it is too small
    pub fn remove_multiple<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        count: usize,
    ) -> Result<Vec<T>, SelectionError> {
        if count > self.items.len() {
            return Err(SelectionError::InsufficientElements {
                requested: count,
                available: self.items.len(),
            });
        }
        (0..count).map(|_| self.remove_one(rng)).collect()
    }

    /// Sample `count` elements with replacement
    pub fn get_multiple<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
    ) -> Result<Vec<T>, SelectionError>
    where
        T: Clone,
    {
        (0..count).map(|_| self.get_one(rng).cloned()).collect()
    }

    /// Sample `count` elements without replacement, leaving the pool intact
    pub fn get_multiple_distinct<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
    ) -> Result<Vec<T>, SelectionError>
    where
        T: Clone,
    {
        remove_random_distinct_n(rng, &self.items, count)
    }
}

impl<T> Default for RandomPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for RandomPool<T> {
    fn from(items: Vec<T>) -> Self {
        RandomPool { items }
    }
}

impl<T> FromIterator<T> for RandomPool<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        RandomPool {
            items: iter.into_iter().collect(),
        }
    }
}
