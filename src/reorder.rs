//! Bounded-lag reordering of a nearly-sorted stream
//!
//! Items are held in a window of at most `window_size` entries kept sorted by
//! key. Each new arrival pushes the oldest buffered item out, so an item can
//! overtake at most `window_size - 1` earlier arrivals. Arrivals older than the
//! whole window are handed to the late-item policy instead.

use crate::error::{ActivationError, Result};
use std::collections::VecDeque;

/// Upper bound on the buffer allocated up front; larger windows grow on demand
const INITIAL_CAPACITY: usize = 1024;

/// Build a reordering adapter over `source`.
///
/// * `window_size < 0` fails immediately without touching `source`
/// * `window_size == 0` passes every item through unchanged
/// * `on_late` decides whether an item older than the whole window is emitted
///   out of order (`true`) or dropped (`false`)
pub fn reorder<I, K, F, L>(
    window_size: i64,
    key_of: F,
    source: I,
    on_late: L,
) -> Result<Reorder<I, K, F, L>>
where
    I: Iterator,
    K: Ord + Clone,
    F: FnMut(&I::Item) -> K,
    L: FnMut(&I::Item) -> bool,
{
    if window_size < 0 {
        return Err(ActivationError::InvalidParameter(format!(
            "reorder window size must be non-negative, got {}",
            window_size
        )));
    }

    let window_size = usize::try_from(window_size).map_err(|_| {
        ActivationError::InvalidParameter(format!(
            "reorder window size {} is too large",
            window_size
        ))
    })?;

    let state = if window_size == 0 {
        State::Passthrough
    } else {
        State::Filling
    };

    Ok(Reorder {
        source,
        key_of,
        on_late,
        window_size,
        buffer: VecDeque::with_capacity(window_size.min(INITIAL_CAPACITY)),
        max_seen: None,
        state,
    })
}

/// Extension trait exposing [`reorder`] as an iterator method
pub trait ReorderExt: Iterator + Sized {
    fn sorted_by_in_window<K, F, L>(
        self,
        window_size: i64,
        key_of: F,
        on_late: L,
    ) -> Result<Reorder<Self, K, F, L>>
    where
        K: Ord + Clone,
        F: FnMut(&Self::Item) -> K,
        L: FnMut(&Self::Item) -> bool,
    {
        reorder(window_size, key_of, self, on_late)
    }
}

impl<I: Iterator> ReorderExt for I {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Passthrough,
    Filling,
    Streaming,
    Draining,
}

/// Lazy iterator returned by [`reorder`]
pub struct Reorder<I, K, F, L>
where
    I: Iterator,
{
    source: I,
    key_of: F,
    on_late: L,
    window_size: usize,
    buffer: VecDeque<(K, I::Item)>,
    max_seen: Option<K>,
    state: State,
}

impl<I, K, F, L> Reorder<I, K, F, L>
where
    I: Iterator,
    K: Ord + Clone,
    F: FnMut(&I::Item) -> K,
    L: FnMut(&I::Item) -> bool,
{
    /// Number of items currently held back
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    fn fill(&mut self) {
        while self.buffer.len() < self.window_size {
            match self.source.next() {
                Some(item) => {
                    let key = (self.key_of)(&item);
                    self.buffer.push_back((key, item));
                }
                None => {
                    self.finish_fill();
                    self.state = State::Draining;
                    return;
                }
            }
        }

        self.finish_fill();
        self.max_seen = self.buffer.back().map(|(key, _)| key.clone());
        self.state = State::Streaming;
    }

    fn finish_fill(&mut self) {
        // Stable sort keeps arrival order among equal keys.
        self.buffer
            .make_contiguous()
            .sort_by(|(a, _), (b, _)| a.cmp(b));
    }

    fn step(&mut self) -> Option<I::Item> {
        loop {
            let Some(item) = self.source.next() else {
                self.state = State::Draining;
                return self.pop_oldest();
            };

            let key = (self.key_of)(&item);
            let in_order = self.max_seen.as_ref().map_or(true, |max| key >= *max);

            if in_order {
                let oldest = self.pop_oldest();
                self.max_seen = Some(key.clone());
                self.buffer.push_back((key, item));
                return oldest;
            }

            // Upper bound: equal keys land after the ones already buffered.
            let position = self.buffer.partition_point(|(buffered, _)| *buffered <= key);

            if position == 0 {
                if (self.on_late)(&item) {
                    return Some(item);
                }
                continue;
            }

            let oldest = self.pop_oldest();
            self.buffer.insert(position - 1, (key, item));
            return oldest;
        }
    }

    fn pop_oldest(&mut self) -> Option<I::Item> {
        self.buffer.pop_front().map(|(_, item)| item)
    }
}

impl<I, K, F, L> Iterator for Reorder<I, K, F, L>
where
    I: Iterator,
    K: Ord + Clone,
    F: FnMut(&I::Item) -> K,
    L: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                State::Passthrough => return self.source.next(),
                State::Filling => self.fill(),
                State::Streaming => return self.step(),
                State::Draining => return self.pop_oldest(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn keep_none(_: &i64) -> bool {
        false
    }

    fn sorted(window: i64, input: Vec<i64>) -> Vec<i64> {
        reorder(window, |v: &i64| *v, input.into_iter(), keep_none)
            .unwrap()
            .collect()
    }

    #[test]
    fn test_negative_window_fails_before_reading() {
        let pulled = Cell::new(0);
        let source = (0..10i64).inspect(|_| pulled.set(pulled.get() + 1));
        let result = reorder(-1, |v: &i64| *v, source, keep_none);
        assert!(matches!(result, Err(ActivationError::InvalidParameter(_))));
        assert_eq!(pulled.get(), 0);
    }

    #[test]
    fn test_zero_window_is_passthrough() {
        let input = vec![5, 3, 9, 1, 1, 0, 7];
        assert_eq!(sorted(0, input.clone()), input);
    }

    #[test]
    fn test_construction_is_lazy() {
        let pulled = Cell::new(0);
        let source = (0..10i64).inspect(|_| pulled.set(pulled.get() + 1));
        let mut iter = reorder(4, |v: &i64| *v, source, keep_none).unwrap();
        assert_eq!(pulled.get(), 0);

        assert_eq!(iter.next(), Some(0));
        // window of four plus the arrival that pushed the oldest out
        assert_eq!(pulled.get(), 5);
        assert_eq!(iter.buffered(), 4);
    }

    #[test]
    fn test_short_source_emits_sorted_partial_window() {
        assert_eq!(sorted(10, vec![4, 2, 3, 1]), vec![1, 2, 3, 4]);
        assert!(sorted(3, vec![]).is_empty());
    }

    #[test]
    fn test_huge_window_does_not_preallocate() {
        let output: Vec<i64> = reorder(i64::MAX, |v: &i64| *v, vec![3i64, 1, 2].into_iter(), keep_none)
            .unwrap()
            .collect();
        assert_eq!(output, vec![1, 2, 3]);
    }

    #[test]
    fn test_chunk_reversed_stream_is_fully_sorted() {
        for window in 1..8i64 {
            let w = window as usize;
            let input: Vec<i64> = (0..(w * 12) as i64)
                .collect::<Vec<_>>()
                .chunks(w)
                .flat_map(|chunk| chunk.iter().rev().copied().collect::<Vec<_>>())
                .collect();

            let expected: Vec<i64> = (0..(w * 12) as i64).collect();
            assert_eq!(sorted(window, input), expected, "window {}", window);
        }
    }

    #[test]
    fn test_late_sample_dropped() {
        let late = Cell::new(Vec::new());
        let input = vec![10i64, 11, 12, 13, 3, 14, 15];
        let output: Vec<i64> = reorder(
            3,
            |v: &i64| *v,
            input.into_iter(),
            |v: &i64| {
                let mut seen = late.take();
                seen.push(*v);
                late.set(seen);
                false
            },
        )
        .unwrap()
        .collect();

        assert_eq!(output, vec![10, 11, 12, 13, 14, 15]);
        assert_eq!(late.take(), vec![3]);
    }

    #[test]
    fn test_late_sample_kept_in_arrival_position() {
        let input = vec![10i64, 11, 12, 13, 3, 14, 15];
        let output: Vec<i64> = reorder(3, |v: &i64| *v, input.into_iter(), |_: &i64| true)
            .unwrap()
            .collect();

        // 10 was emitted when 13 arrived; 3 is emitted right away, ahead of 11
        assert_eq!(output, vec![10, 3, 11, 12, 13, 14, 15]);
        assert_eq!(output.iter().filter(|&&v| v == 3).count(), 1);
    }

    #[test]
    fn test_displacement_of_full_window_is_late() {
        // 1 arrives three places behind its sorted slot: still within a window of 4
        assert_eq!(sorted(4, vec![2, 3, 4, 1, 5, 6]), vec![1, 2, 3, 4, 5, 6]);

        // with a window of 3 it meets a full window whose minimum is larger
        let late = Cell::new(Vec::new());
        let output: Vec<i64> = reorder(
            3,
            |v: &i64| *v,
            vec![2i64, 3, 4, 1, 5, 6].into_iter(),
            |v: &i64| {
                let mut seen = late.take();
                seen.push(*v);
                late.set(seen);
                false
            },
        )
        .unwrap()
        .collect();
        assert_eq!(output, vec![2, 3, 4, 5, 6]);
        assert_eq!(late.take(), vec![1]);
    }

    #[test]
    fn test_moderately_late_sample_catches_up() {
        assert_eq!(
            sorted(4, vec![1, 2, 5, 6, 7, 4, 8, 9]),
            vec![1, 2, 4, 5, 6, 7, 8, 9]
        );
    }

    #[test]
    fn test_emission_is_monotonic_without_late_admission() {
        let input = vec![3i64, 1, 2, 8, 5, 4, 9, 0, 7, 6, 12, 10, 11, 2, 15];
        let output = sorted(3, input);
        assert!(output.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_equal_keys_keep_arrival_order() {
        let input = vec![(3, 'a'), (5, 'b'), (3, 'c'), (3, 'e'), (6, 'f')];
        let output: Vec<char> = reorder(3, |s: &(i64, char)| s.0, input.into_iter(), |_| false)
            .unwrap()
            .map(|(_, tag)| tag)
            .collect();
        assert_eq!(output, vec!['a', 'c', 'e', 'b', 'f']);
    }

    #[test]
    fn test_extension_method() {
        let output: Vec<i64> = vec![2i64, 1, 3]
            .into_iter()
            .sorted_by_in_window(2, |v| *v, |_| false)
            .unwrap()
            .collect();
        assert_eq!(output, vec![1, 2, 3]);
    }
}
