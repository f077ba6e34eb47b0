use crate::{CombinedError, Loadable};
use futures_signals::map_ref;
use futures_signals::signal::Signal;

/// Follows two loadable signals and emits their [`Loadable::combine`]
/// whenever either one changes.
///
/// ```
/// use futures_signals::signal::Mutable;
/// use rxloadable::{combine_signals, Loadable};
///
/// let user: Mutable<Loadable<&str, String>> = Mutable::new(Loadable::Loaded("ada"));
/// let posts: Mutable<Loadable<u32, String>> = Mutable::new(Loadable::Loading);
/// let _page = combine_signals(user.signal_cloned(), posts.signal_cloned(), |user, posts| {
///     format!("{user}: {posts} posts")
/// });
/// ```
pub fn combine_signals<A, B, T1, T2, E, R, F>(
    first: A,
    second: B,
    mut transform: F,
) -> impl Signal<Item = Loadable<R, CombinedError<E>>>
where
    A: Signal<Item = Loadable<T1, E>>,
    B: Signal<Item = Loadable<T2, E>>,
    T1: Clone,
    T2: Clone,
    E: Clone,
    F: FnMut(T1, T2) -> R,
{
    map_ref! {
        let first = first,
        let second = second =>
        first.clone().combine(second.clone(), &mut transform)
    }
}
