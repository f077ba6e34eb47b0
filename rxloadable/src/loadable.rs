/// The lifecycle of an asynchronously produced value.
///
/// A `Loadable` is never mutated in place. Every transition produces a new
/// value which the owner (a stream pipeline, a [`LoadableStore`](crate::LoadableStore),
/// a struct field) swaps in for the previous one.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Loadable<T, E> {
    /// No request has been started yet.
    Inactive,
    /// A request is in flight.
    Loading,
    /// The request produced a value.
    Loaded(T),
    /// The request failed.
    Failed(E),
}

/// The payload-free tag of a [`Loadable`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LoadableKind {
    Inactive,
    Loading,
    Loaded,
    Failed,
}

impl<T, E> Loadable<T, E> {
    pub fn is_inactive(&self) -> bool {
        matches!(self, Loadable::Inactive)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn has_loaded(&self) -> bool {
        matches!(self, Loadable::Loaded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Loadable::Failed(_))
    }

    /// True once the request has finished, successfully or not.
    pub fn is_complete(&self) -> bool {
        matches!(self, Loadable::Loaded(_) | Loadable::Failed(_))
    }

    pub fn kind(&self) -> LoadableKind {
        match self {
            Loadable::Inactive => LoadableKind::Inactive,
            Loadable::Loading => LoadableKind::Loading,
            Loadable::Loaded(_) => LoadableKind::Loaded,
            Loadable::Failed(_) => LoadableKind::Failed,
        }
    }

    pub fn loaded_value(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_loaded(self) -> Option<T> {
        match self {
            Loadable::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            Loadable::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn into_error(self) -> Option<E> {
        match self {
            Loadable::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Loadable<&T, &E> {
        match self {
            Loadable::Inactive => Loadable::Inactive,
            Loadable::Loading => Loadable::Loading,
            Loadable::Loaded(value) => Loadable::Loaded(value),
            Loadable::Failed(error) => Loadable::Failed(error),
        }
    }

    /// `Some(true)` when loaded, `Some(false)` when inactive or failed and
    /// `None` while loading, since the outcome is not yet known.
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Loadable::Inactive => Some(false),
            Loadable::Loading => None,
            Loadable::Loaded(_) => Some(true),
            Loadable::Failed(_) => Some(false),
        }
    }

    /// Like [`to_bool`](Self::to_bool) with caller-chosen answers for the
    /// states that have not loaded.
    pub fn to_bool_with(
        &self,
        when_inactive: Option<bool>,
        when_loading: Option<bool>,
        when_error: Option<bool>,
    ) -> Option<bool> {
        match self {
            Loadable::Inactive => when_inactive,
            Loadable::Loading => when_loading,
            Loadable::Loaded(_) => Some(true),
            Loadable::Failed(_) => when_error,
        }
    }

    /// Hands the whole state to `transform`.
    ///
    /// Use this when every variant needs to be inspected at once, for example
    /// to treat a particular loaded value as a failure or to project onto a
    /// different status type. For the common case of touching only the loaded
    /// value, use [`map_loaded`](Self::map_loaded).
    pub fn map<R, F>(self, transform: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        transform(self)
    }

    /// Transforms the loaded value. Every other state passes through.
    pub fn map_loaded<R, F>(self, transform: F) -> Loadable<R, E>
    where
        F: FnOnce(T) -> R,
    {
        match self {
            Loadable::Inactive => Loadable::Inactive,
            Loadable::Loading => Loadable::Loading,
            Loadable::Loaded(value) => Loadable::Loaded(transform(value)),
            Loadable::Failed(error) => Loadable::Failed(error),
        }
    }

    /// Transforms the loaded value with a fallible function. An `Err` from
    /// `transform` becomes `Failed`; an existing failure is left untouched.
    pub fn try_map_loaded<R, F>(self, transform: F) -> Loadable<R, E>
    where
        F: FnOnce(T) -> Result<R, E>,
    {
        match self {
            Loadable::Inactive => Loadable::Inactive,
            Loadable::Loading => Loadable::Loading,
            Loadable::Loaded(value) => match transform(value) {
                Ok(mapped) => Loadable::Loaded(mapped),
                Err(error) => Loadable::Failed(error),
            },
            Loadable::Failed(error) => Loadable::Failed(error),
        }
    }

    /// Transforms the loaded value; `None` from `transform` fails the state
    /// with `on_failure`.
    pub fn map_loaded_or_fail<R, F>(self, on_failure: E, transform: F) -> Loadable<R, E>
    where
        F: FnOnce(T) -> Option<R>,
    {
        self.try_map_loaded(|value| transform(value).ok_or(on_failure))
    }

    /// Transforms the loaded value; `None` from `transform` keeps the state
    /// loaded with `fallback` instead.
    pub fn map_loaded_or_fallback<R, F>(self, fallback: R, transform: F) -> Loadable<R, E>
    where
        F: FnOnce(T) -> Option<R>,
    {
        self.map_loaded(|value| transform(value).unwrap_or(fallback))
    }

    /// Transforms the loaded value; when `transform` gives `None`, `recover`
    /// gets a second try on the original value and decides between loaded
    /// and failed.
    pub fn map_loaded_or_recover<R, F, G>(self, recover: G, transform: F) -> Loadable<R, E>
    where
        F: FnOnce(&T) -> Option<R>,
        G: FnOnce(T) -> Result<R, E>,
    {
        self.try_map_loaded(|value| match transform(&value) {
            Some(mapped) => Ok(mapped),
            None => recover(value),
        })
    }

    /// Rewrites the error of a failed state.
    pub fn map_error<E2, F>(self, transform: F) -> Loadable<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Loadable::Inactive => Loadable::Inactive,
            Loadable::Loading => Loadable::Loading,
            Loadable::Loaded(value) => Loadable::Loaded(value),
            Loadable::Failed(error) => Loadable::Failed(transform(error)),
        }
    }

    /// Tries to turn a failure into a loaded value, e.g. from a local cache.
    /// When `transform` has nothing to offer the failure is kept as is.
    pub fn recover_error<F>(self, transform: F) -> Self
    where
        F: FnOnce(&E) -> Option<T>,
    {
        match self {
            Loadable::Failed(error) => match transform(&error) {
                Some(recovered) => Loadable::Loaded(recovered),
                None => Loadable::Failed(error),
            },
            other => other,
        }
    }

    /// Chains a dependent request: only a loaded value reaches `transform`,
    /// whose result becomes the new state.
    pub fn flat_map_loaded<R, F>(self, transform: F) -> Loadable<R, E>
    where
        F: FnOnce(T) -> Loadable<R, E>,
    {
        match self {
            Loadable::Inactive => Loadable::Inactive,
            Loadable::Loading => Loadable::Loading,
            Loadable::Loaded(value) => transform(value),
            Loadable::Failed(error) => Loadable::Failed(error),
        }
    }

    /// The loaded value, or the default given for whichever state this is.
    pub fn unpack(
        self,
        when_inactive: Option<T>,
        when_loading: Option<T>,
        when_error: Option<T>,
    ) -> Option<T> {
        match self {
            Loadable::Inactive => when_inactive,
            Loadable::Loading => when_loading,
            Loadable::Loaded(value) => Some(value),
            Loadable::Failed(_) => when_error,
        }
    }

    pub fn unpack_or(self, when_not_loaded: T) -> T {
        match self {
            Loadable::Loaded(value) => value,
            _ => when_not_loaded,
        }
    }
}

impl<T, E> Default for Loadable<T, E> {
    fn default() -> Self {
        Loadable::Inactive
    }
}

impl<E> Loadable<bool, E> {
    /// Picks `if_true` or `if_false` for a loaded flag.
    pub fn map_bool<R>(self, if_true: R, if_false: R) -> Loadable<R, E> {
        self.map_loaded(|flag| if flag { if_true } else { if_false })
    }
}

/// Failed states compare equal whatever their errors are; only the fact that
/// something went wrong is compared.
impl<T: PartialEq, E> PartialEq for Loadable<T, E> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Loadable::Inactive, Loadable::Inactive) => true,
            (Loadable::Loading, Loadable::Loading) => true,
            (Loadable::Loaded(lhs), Loadable::Loaded(rhs)) => lhs == rhs,
            (Loadable::Failed(_), Loadable::Failed(_)) => true,
            _ => false,
        }
    }
}

impl<T: Eq, E> Eq for Loadable<T, E> {}
