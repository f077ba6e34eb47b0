use crate::{Loadable, LoadableError};

/// Types that can present themselves as a [`Loadable`].
///
/// This is what stream adapters and [`LoadableStore::execute`](crate::LoadableStore::execute)
/// accept, so a request may hand back a plain `Result`, an `Option` or a
/// richer status type and still land in the same state machine.
pub trait IntoLoadable {
    type Value;
    type Error;

    fn into_loadable(self) -> Loadable<Self::Value, Self::Error>;
}

impl<T, E> IntoLoadable for Loadable<T, E> {
    type Value = T;
    type Error = E;

    fn into_loadable(self) -> Loadable<T, E> {
        self
    }
}

impl<T, E> IntoLoadable for Result<T, E> {
    type Value = T;
    type Error = E;

    fn into_loadable(self) -> Loadable<T, E> {
        match self {
            Ok(value) => Loadable::Loaded(value),
            Err(error) => Loadable::Failed(error),
        }
    }
}

impl<T> IntoLoadable for Option<T> {
    type Value = T;
    type Error = LoadableError;

    fn into_loadable(self) -> Loadable<T, LoadableError> {
        match self {
            Some(value) => Loadable::Loaded(value),
            None => Loadable::Failed(LoadableError::None),
        }
    }
}

impl<T, E> From<Result<T, E>> for Loadable<T, E> {
    fn from(value: Result<T, E>) -> Self {
        value.into_loadable()
    }
}

impl<T: Clone, E> From<&Loadable<T, E>> for Option<T> {
    fn from(value: &Loadable<T, E>) -> Self {
        value.loaded_value().cloned()
    }
}
