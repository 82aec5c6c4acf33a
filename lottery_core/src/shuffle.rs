//! Shuffle strategies for the lottery's cached draw order.
//!
//! A strategy takes the canonical entry list and returns a new ordering of
//! the same values. The pool never mutates its shuffled view except by
//! replacing it with a strategy's output, so a strategy that drops or
//! duplicates values breaks every draw guarantee.

use lottery_env::{LotteryContext, TokioContext};

/// Pluggable ordering strategy: `&[T] -> Vec<T>`.
///
/// Implementations must return a permutation of `input` and must not rely
/// on being called a particular number of times.
///
/// Any `Fn(&[T]) -> Vec<T>` closure is a strategy:
///
/// ```
/// use lottery_core::{Lottery, LotteryOptions};
///
/// let reverse = |input: &[u32]| input.iter().rev().copied().collect::<Vec<_>>();
/// let lottery = Lottery::new(vec![1, 2, 3], LotteryOptions::default().with_shuffle(reverse));
/// assert_eq!(lottery.draw(), vec![3, 2, 1]);
/// ```
pub trait Shuffle<T> {
    /// Returns a reordered copy of `input`.
    fn shuffle(&self, input: &[T]) -> Vec<T>;
}

impl<T, F> Shuffle<T> for F
where
    F: Fn(&[T]) -> Vec<T>,
{
    fn shuffle(&self, input: &[T]) -> Vec<T> {
        self(input)
    }
}

/// Fisher-Yates shuffle driven by a [`LotteryContext`].
///
/// Walks `current` from `n` down to `1`, picks `random` uniformly in
/// `[0, current)` and swaps the elements at `current - 1` and `random`.
/// Every one of the `n!` orderings is equally likely given a uniform
/// `random_index`, and the walk is linear in `n`.
///
/// See <https://en.wikipedia.org/wiki/Fisher%E2%80%93Yates_shuffle>.
#[derive(Debug, Clone)]
pub struct FisherYates<C = TokioContext> {
    ctx: C,
}

impl<C: LotteryContext> FisherYates<C> {
    /// Creates a shuffle that draws its randomness from `ctx`.
    pub fn new(ctx: C) -> Self {
        Self { ctx }
    }
}

impl Default for FisherYates<TokioContext> {
    fn default() -> Self {
        Self::new(TokioContext::new())
    }
}

impl<T: Clone, C: LotteryContext> Shuffle<T> for FisherYates<C> {
    fn shuffle(&self, input: &[T]) -> Vec<T> {
        let mut output = input.to_vec();
        let mut current = output.len();

        while current > 0 {
            let random = self.ctx.random_index(current);
            current -= 1;
            output.swap(current, random);
        }

        output
    }
}

/// Keeps the canonical order. Useful when the caller pre-shuffles entries
/// or wants first-come-first-served draws.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<T: Clone> Shuffle<T> for Identity {
    fn shuffle(&self, input: &[T]) -> Vec<T> {
        input.to_vec()
    }
}
