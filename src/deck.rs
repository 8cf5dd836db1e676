//! Shuffled traversal order over word ids.
//!
//! A [`Deck`] is a stack: the *last* element is the next one drawn. When a deck
//! runs out the session builds a new one, passing the id it drew last so the
//! new deck does not open with the same word.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::WordId;

/// Source of random orderings. Production code uses [`RandomShuffler`]; tests
/// plug in fixed orders.
pub trait Shuffler {
    /// A permutation of `0..len`.
    fn permutation(&mut self, len: usize) -> Vec<usize>;
}

/// [`Shuffler`] backed by any `rand` generator (uniform Fisher-Yates).
#[derive(Debug)]
pub struct RandomShuffler<R>(pub R);

impl RandomShuffler<rand::rngs::ThreadRng> {
    pub fn from_entropy() -> Self {
        RandomShuffler(rand::thread_rng())
    }
}

impl<R: Rng> Shuffler for RandomShuffler<R> {
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut self.0);
        order
    }
}

/// Reorders `items` by a permutation drawn from `shuffler`.
pub fn shuffle_in_place<T>(shuffler: &mut dyn Shuffler, items: &mut Vec<T>) {
    let order = shuffler.permutation(items.len());
    let mut slots: Vec<Option<T>> = items.drain(..).map(Some).collect();
    items.extend(order.into_iter().filter_map(|i| slots.get_mut(i).and_then(Option::take)));
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    ids: Vec<WordId>,
}

impl Deck {
    /// Builds a shuffled deck over `active_ids`.
    ///
    /// If the first id to be drawn equals `previous_last` and there are at least
    /// two ids, the top two are swapped.
    pub fn shuffled(
        previous_last: Option<WordId>,
        active_ids: &[WordId],
        shuffler: &mut dyn Shuffler,
    ) -> Self {
        let mut ids = active_ids.to_vec();
        shuffle_in_place(shuffler, &mut ids);

        let n = ids.len();
        if n >= 2 && previous_last.is_some() && ids.last().copied() == previous_last {
            ids.swap(n - 1, n - 2);
        }
        debug!("deck rebuilt with {n} ids");
        Self { ids }
    }

    /// Deck drawn in exactly the given order (first element drawn first).
    pub fn from_draw_order(order: &[WordId]) -> Self {
        Self {
            ids: order.iter().rev().copied().collect(),
        }
    }

    pub fn pop(&mut self) -> Option<WordId> {
        self.ids.pop()
    }

    /// Next id to be drawn, without drawing it.
    pub fn peek(&self) -> Option<WordId> {
        self.ids.last().copied()
    }

    /// Puts rejected candidates back at the bottom of the stack, keeping their
    /// relative order, so they are drawn after everything still in the deck.
    pub fn defer(&mut self, rejected: Vec<WordId>) {
        if rejected.is_empty() {
            return;
        }
        self.ids.splice(0..0, rejected);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Remaining ids in draw order.
    pub fn draw_order(&self) -> impl Iterator<Item = WordId> + '_ {
        self.ids.iter().rev().copied()
    }
}
