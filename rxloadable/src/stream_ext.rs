use crate::{IntoLoadable, Loadable, LoadableKind};
use futures_core::stream::{Stream, TryStream};
use pin_project::pin_project;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

/// Operators for any stream, independent of what it carries.
///
/// Adapters that only make sense for streams of [`Loadable`] states live in
/// [`LoadableStreamExt`].
pub trait RxStreamExt: Stream {
    /// Passes items through up to and including the first one matching
    /// `test`, then ends.
    ///
    /// Following a store until its request settles:
    ///
    /// ```
    /// use rxloadable::{Loadable, LoadableError, LoadableStore, RxStreamExt};
    ///
    /// async fn settled(store: &LoadableStore<u32, LoadableError>) -> Vec<Loadable<u32, LoadableError>> {
    ///     use futures::StreamExt;
    ///
    ///     store
    ///         .to_stream()
    ///         .stop_if(|state| state.is_complete())
    ///         .collect()
    ///         .await
    /// }
    /// ```
    fn stop_if<F>(self, test: F) -> StopIf<Self, F>
    where
        F: FnMut(&Self::Item) -> bool,
        Self: Sized,
    {
        StopIf {
            stream: self,
            stopped: false,
            test,
        }
    }

    /// Emits `item` before anything from the underlying stream.
    fn start_with(self, item: Self::Item) -> StartWith<Self>
    where
        Self: Sized,
    {
        StartWith {
            stream: self,
            first: Some(item),
        }
    }

    /// Turns every item into a [`Loadable`], e.g. a stream of request
    /// `Result`s into a stream of loaded or failed states.
    fn loadable(self) -> IntoLoadables<Self>
    where
        Self::Item: IntoLoadable,
        Self: Sized,
    {
        IntoLoadables { stream: self }
    }
}
impl<T: ?Sized> RxStreamExt for T where T: Stream {}

/// Adapters for streams of [`Loadable`] states.
///
/// Each adapter applies the matching [`Loadable`] operation to every state the
/// stream produces.
pub trait LoadableStreamExt<T, E>: Stream<Item = Loadable<T, E>> {
    fn map_loaded<R, F>(self, transform: F) -> MapLoaded<Self, F>
    where
        F: FnMut(T) -> R,
        Self: Sized,
    {
        MapLoaded {
            stream: self,
            transform,
        }
    }

    /// Rebinds every loaded value to a new state, e.g. rejecting a loaded
    /// response that fails validation. Other states pass through.
    fn map_loadable<R, F>(self, transform: F) -> MapLoadable<Self, F>
    where
        F: FnMut(T) -> Loadable<R, E>,
        Self: Sized,
    {
        MapLoadable {
            stream: self,
            transform,
        }
    }

    /// Replaces every loaded value with `true`, keeping the other states.
    ///
    /// Unlike [`Loadable::to_bool`] this stays a stream of states, so a
    /// pending or failed request is still visible downstream.
    fn to_bool(self) -> MapLoaded<Self, fn(T) -> bool>
    where
        Self: Sized,
    {
        MapLoaded {
            stream: self,
            transform: loaded_flag::<T> as fn(T) -> bool,
        }
    }

    /// Starts a dependent stream for every loaded value, e.g. fetching an
    /// image once the request for its URL has loaded.
    ///
    /// Non-loaded states are forwarded as they are. A newer state from this
    /// stream drops whatever dependent stream is still running, so only the
    /// latest request is followed. The adapter ends once this stream has
    /// ended and the last dependent stream is exhausted.
    fn flat_map_loaded<R, U, F>(self, transform: F) -> FlatMapLoaded<Self, F, U>
    where
        F: FnMut(T) -> U,
        U: Stream<Item = Loadable<R, E>>,
        Self: Sized,
    {
        FlatMapLoaded {
            stream: self,
            transform,
            inner: None,
            outer_done: false,
        }
    }

    /// Yields only loaded values.
    fn loaded_values(self) -> LoadedValues<Self>
    where
        Self: Sized,
    {
        LoadedValues { stream: self }
    }

    fn unpack(
        self,
        when_inactive: Option<T>,
        when_loading: Option<T>,
        when_error: Option<T>,
    ) -> Unpack<Self, T>
    where
        T: Clone,
        Self: Sized,
    {
        Unpack {
            stream: self,
            when_inactive,
            when_loading,
            when_error,
        }
    }

    fn unpack_or(self, when_not_loaded: T) -> UnpackOr<Self, T>
    where
        T: Clone,
        Self: Sized,
    {
        UnpackOr {
            stream: self,
            when_not_loaded,
        }
    }

    /// Yields loaded values as `Ok` and a failure as `Err`, then ends.
    /// Inactive and loading states are skipped.
    fn unpacked(self) -> Unpacked<Self>
    where
        Self: Sized,
    {
        Unpacked {
            stream: self,
            done: false,
        }
    }

    /// Ends after the first loaded state, which is still yielded.
    fn take_until_loaded(self) -> StopIf<Self, fn(&Loadable<T, E>) -> bool>
    where
        Self: Sized,
    {
        StopIf {
            stream: self,
            stopped: false,
            test: Loadable::has_loaded,
        }
    }

    /// Ends after the first state whose kind is in `kinds`.
    fn take_until_kind(self, kinds: &[LoadableKind]) -> TakeUntilKind<Self>
    where
        Self: Sized,
    {
        TakeUntilKind {
            stream: self,
            kinds: kinds.to_vec(),
            stopped: false,
        }
    }
}
impl<S, T, E> LoadableStreamExt<T, E> for S where S: Stream<Item = Loadable<T, E>> {}

fn loaded_flag<T>(_: T) -> bool {
    true
}

/// Adapters for streams of loaded flags.
pub trait LoadableBoolStreamExt<E>: Stream<Item = Loadable<bool, E>> {
    /// Per-state [`Loadable::map_bool`].
    fn map_bool<R>(self, if_true: R, if_false: R) -> MapBool<Self, R>
    where
        R: Clone,
        Self: Sized,
    {
        MapBool {
            stream: self,
            if_true,
            if_false,
        }
    }
}

impl<S, E> LoadableBoolStreamExt<E> for S where S: Stream<Item = Loadable<bool, E>> {}

/// Adapters for fallible streams of [`Loadable`] states.
pub trait LoadableTryStreamExt<T, E>: TryStream<Ok = Loadable<T, E>, Error = E> {
    /// Turns a stream error into a final [`Loadable::Failed`] item and ends
    /// there, so consumers only ever see states.
    fn catch_failed(self) -> CatchFailed<Self>
    where
        Self: Sized,
    {
        CatchFailed {
            stream: self,
            done: false,
        }
    }
}

impl<S, T, E> LoadableTryStreamExt<T, E> for S where
    S: TryStream<Ok = Loadable<T, E>, Error = E>
{
}

/// Returned by [`RxStreamExt::stop_if`] and
/// [`LoadableStreamExt::take_until_loaded`]. The matching item is the last
/// one yielded.
#[pin_project]
#[derive(Debug)]
#[must_use = "Streams do nothing unless polled"]
pub struct StopIf<St, F> {
    #[pin]
    stream: St,
    stopped: bool,
    test: F,
}

impl<St, F> Stream for StopIf<St, F>
where
    St: Stream,
    F: FnMut(&St::Item) -> bool,
{
    type Item = St::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        if *this.stopped {
            return Poll::Ready(None);
        }
        let next = ready!(this.stream.poll_next(cx));
        *this.stopped = match &next {
            Some(item) => (this.test)(item),
            None => true,
        };
        Poll::Ready(next)
    }
}

#[pin_project]
#[must_use = "Streams do nothing unless polled"]
pub struct StartWith<St: Stream> {
    #[pin]
    stream: St,
    first: Option<St::Item>,
}

impl<St: Stream> Stream for StartWith<St> {
    type Item = St::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        if let Some(item) = this.first.take() {
            return Poll::Ready(Some(item));
        }
        this.stream.poll_next(cx)
    }
}

#[pin_project]
#[derive(Debug)]
#[must_use = "Streams do nothing unless polled"]
pub struct IntoLoadables<St> {
    #[pin]
    stream: St,
}

impl<St> Stream for IntoLoadables<St>
where
    St: Stream,
    St::Item: IntoLoadable,
{
    type Item = Loadable<<St::Item as IntoLoadable>::Value, <St::Item as IntoLoadable>::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project()
            .stream
            .poll_next(cx)
            .map(|item| item.map(IntoLoadable::into_loadable))
    }
}

#[pin_project]
#[must_use = "Streams do nothing unless polled"]
pub struct MapLoaded<St, F> {
    #[pin]
    stream: St,
    transform: F,
}

impl<St, F, T, E, R> Stream for MapLoaded<St, F>
where
    St: Stream<Item = Loadable<T, E>>,
    F: FnMut(T) -> R,
{
    type Item = Loadable<R, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        let transform = this.transform;
        this.stream
            .poll_next(cx)
            .map(|item| item.map(|state| state.map_loaded(&mut *transform)))
    }
}

#[pin_project]
#[must_use = "Streams do nothing unless polled"]
pub struct MapLoadable<St, F> {
    #[pin]
    stream: St,
    transform: F,
}

impl<St, F, T, E, R> Stream for MapLoadable<St, F>
where
    St: Stream<Item = Loadable<T, E>>,
    F: FnMut(T) -> Loadable<R, E>,
{
    type Item = Loadable<R, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        let transform = this.transform;
        this.stream
            .poll_next(cx)
            .map(|item| item.map(|state| state.flat_map_loaded(&mut *transform)))
    }
}

#[pin_project]
#[derive(Debug)]
#[must_use = "Streams do nothing unless polled"]
pub struct MapBool<St, R> {
    #[pin]
    stream: St,
    if_true: R,
    if_false: R,
}

impl<St, E, R> Stream for MapBool<St, R>
where
    St: Stream<Item = Loadable<bool, E>>,
    R: Clone,
{
    type Item = Loadable<R, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        let (if_true, if_false) = (this.if_true, this.if_false);
        this.stream
            .poll_next(cx)
            .map(|item| item.map(|state| state.map_bool(if_true.clone(), if_false.clone())))
    }
}

#[pin_project]
#[derive(Debug)]
#[must_use = "Streams do nothing unless polled"]
pub struct CatchFailed<St> {
    #[pin]
    stream: St,
    done: bool,
}

impl<St, T, E> Stream for CatchFailed<St>
where
    St: TryStream<Ok = Loadable<T, E>, Error = E>,
{
    type Item = Loadable<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        if *this.done {
            return Poll::Ready(None);
        }
        match ready!(this.stream.try_poll_next(cx)) {
            Some(Ok(state)) => Poll::Ready(Some(state)),
            Some(Err(error)) => {
                *this.done = true;
                Poll::Ready(Some(Loadable::Failed(error)))
            }
            None => {
                *this.done = true;
                Poll::Ready(None)
            }
        }
    }
}

#[pin_project]
#[must_use = "Streams do nothing unless polled"]
pub struct FlatMapLoaded<St, F, U> {
    #[pin]
    stream: St,
    transform: F,
    #[pin]
    inner: Option<U>,
    outer_done: bool,
}

impl<St, F, U, T, E, R> Stream for FlatMapLoaded<St, F, U>
where
    St: Stream<Item = Loadable<T, E>>,
    F: FnMut(T) -> U,
    U: Stream<Item = Loadable<R, E>>,
{
    type Item = Loadable<R, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            if !*this.outer_done {
                match this.stream.as_mut().poll_next(cx) {
                    Poll::Ready(Some(Loadable::Loaded(value))) => {
                        this.inner.set(Some((this.transform)(value)));
                        continue;
                    }
                    Poll::Ready(Some(Loadable::Inactive)) => {
                        this.inner.set(None);
                        return Poll::Ready(Some(Loadable::Inactive));
                    }
                    Poll::Ready(Some(Loadable::Loading)) => {
                        this.inner.set(None);
                        return Poll::Ready(Some(Loadable::Loading));
                    }
                    Poll::Ready(Some(Loadable::Failed(error))) => {
                        this.inner.set(None);
                        return Poll::Ready(Some(Loadable::Failed(error)));
                    }
                    Poll::Ready(None) => *this.outer_done = true,
                    Poll::Pending => {}
                }
            }

            let next = match this.inner.as_mut().as_pin_mut() {
                Some(inner) => inner.poll_next(cx),
                None if *this.outer_done => return Poll::Ready(None),
                None => return Poll::Pending,
            };

            return match next {
                Poll::Ready(Some(state)) => Poll::Ready(Some(state)),
                Poll::Ready(None) => {
                    this.inner.set(None);
                    if *this.outer_done {
                        Poll::Ready(None)
                    } else {
                        Poll::Pending
                    }
                }
                Poll::Pending => Poll::Pending,
            };
        }
    }
}

#[pin_project]
#[derive(Debug)]
#[must_use = "Streams do nothing unless polled"]
pub struct LoadedValues<St> {
    #[pin]
    stream: St,
}

impl<St, T, E> Stream for LoadedValues<St>
where
    St: Stream<Item = Loadable<T, E>>,
{
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut stream = self.project().stream;
        loop {
            match stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(Loadable::Loaded(value))) => return Poll::Ready(Some(value)),
                Poll::Ready(Some(_)) => continue,
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[pin_project]
#[derive(Debug)]
#[must_use = "Streams do nothing unless polled"]
pub struct Unpack<St, T> {
    #[pin]
    stream: St,
    when_inactive: Option<T>,
    when_loading: Option<T>,
    when_error: Option<T>,
}

impl<St, T, E> Stream for Unpack<St, T>
where
    St: Stream<Item = Loadable<T, E>>,
    T: Clone,
{
    type Item = Option<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        let (when_inactive, when_loading, when_error) =
            (this.when_inactive, this.when_loading, this.when_error);
        this.stream.poll_next(cx).map(|item| {
            item.map(|state| {
                state.unpack(
                    when_inactive.clone(),
                    when_loading.clone(),
                    when_error.clone(),
                )
            })
        })
    }
}

#[pin_project]
#[derive(Debug)]
#[must_use = "Streams do nothing unless polled"]
pub struct UnpackOr<St, T> {
    #[pin]
    stream: St,
    when_not_loaded: T,
}

impl<St, T, E> Stream for UnpackOr<St, T>
where
    St: Stream<Item = Loadable<T, E>>,
    T: Clone,
{
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        let when_not_loaded = this.when_not_loaded;
        this.stream
            .poll_next(cx)
            .map(|item| item.map(|state| state.unpack_or(when_not_loaded.clone())))
    }
}

#[pin_project]
#[derive(Debug)]
#[must_use = "Streams do nothing unless polled"]
pub struct Unpacked<St> {
    #[pin]
    stream: St,
    done: bool,
}

impl<St, T, E> Stream for Unpacked<St>
where
    St: Stream<Item = Loadable<T, E>>,
{
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        if *this.done {
            return Poll::Ready(None);
        }
        loop {
            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(Loadable::Loaded(value))) => return Poll::Ready(Some(Ok(value))),
                Poll::Ready(Some(Loadable::Failed(error))) => {
                    *this.done = true;
                    return Poll::Ready(Some(Err(error)));
                }
                Poll::Ready(Some(Loadable::Inactive | Loadable::Loading)) => continue,
                Poll::Ready(None) => {
                    *this.done = true;
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[pin_project]
#[derive(Debug)]
#[must_use = "Streams do nothing unless polled"]
pub struct TakeUntilKind<St> {
    #[pin]
    stream: St,
    kinds: Vec<LoadableKind>,
    stopped: bool,
}

impl<St, T, E> Stream for TakeUntilKind<St>
where
    St: Stream<Item = Loadable<T, E>>,
{
    type Item = Loadable<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        if *this.stopped {
            return Poll::Ready(None);
        }
        match this.stream.poll_next(cx) {
            Poll::Ready(Some(state)) => {
                if this.kinds.contains(&state.kind()) {
                    *this.stopped = true;
                }
                Poll::Ready(Some(state))
            }
            Poll::Ready(None) => {
                *this.stopped = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
