//! Small stream operators used by the enrichment and paging pipelines.
//!
//! `combine_latest` keeps the most recent value of each input and re-emits
//! whenever either side produces something new, once both sides have emitted
//! at least once. `distinct_until_changed` drops values equal to the previous
//! emission.

use futures::future;
use futures::stream::{self, Stream, StreamExt};

enum Slot<A, B> {
    Left(A),
    Right(B),
}

/// Merges two streams, emitting `combine(latest_left, latest_right)` on every
/// update of either input. Ends when both inputs have ended.
pub fn combine_latest<SA, SB, A, B, T, F>(
    left: SA,
    right: SB,
    mut combine: F,
) -> impl Stream<Item = T>
where
    SA: Stream<Item = A>,
    SB: Stream<Item = B>,
    F: FnMut(&A, &B) -> T,
{
    let mut latest_left: Option<A> = None;
    let mut latest_right: Option<B> = None;

    stream::select(left.map(Slot::Left), right.map(Slot::Right)).filter_map(move |slot| {
        match slot {
            Slot::Left(value) => latest_left = Some(value),
            Slot::Right(value) => latest_right = Some(value),
        }

        let combined = match (&latest_left, &latest_right) {
            (Some(a), Some(b)) => Some(combine(a, b)),
            _ => None,
        };
        future::ready(combined)
    })
}

/// Suppresses consecutive duplicates.
pub fn distinct_until_changed<S, T>(source: S) -> impl Stream<Item = T>
where
    S: Stream<Item = T>,
    T: PartialEq + Clone,
{
    let mut previous: Option<T> = None;

    source.filter_map(move |value| {
        let changed = previous.as_ref() != Some(&value);
        if changed {
            previous = Some(value.clone());
        }
        future::ready(changed.then_some(value))
    })
}
