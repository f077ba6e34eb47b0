use crate::Loadable;
use thiserror::Error;

/// The error of a combined state.
///
/// A single failing operand is carried as `Single`. When several operands
/// failed at once every error is kept, in operand order.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum CombinedError<E> {
    #[error("{0}")]
    Single(E),

    #[error("both requests failed: {0}; {1}")]
    Both(E, E),

    #[error("{} requests failed", .0.len())]
    Many(Vec<E>),
}

impl<E> CombinedError<E> {
    fn from_errors(mut errors: Vec<E>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop().map(CombinedError::Single),
            2 => {
                let second = errors.pop()?;
                let first = errors.pop()?;
                Some(CombinedError::Both(first, second))
            }
            _ => Some(CombinedError::Many(errors)),
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self, CombinedError::Single(_))
    }

    pub fn count(&self) -> usize {
        match self {
            CombinedError::Single(_) => 1,
            CombinedError::Both(..) => 2,
            CombinedError::Many(errors) => errors.len(),
        }
    }

    pub fn errors(&self) -> Vec<&E> {
        match self {
            CombinedError::Single(error) => vec![error],
            CombinedError::Both(first, second) => vec![first, second],
            CombinedError::Many(errors) => errors.iter().collect(),
        }
    }

    pub fn into_errors(self) -> Vec<E> {
        match self {
            CombinedError::Single(error) => vec![error],
            CombinedError::Both(first, second) => vec![first, second],
            CombinedError::Many(errors) => errors,
        }
    }
}

impl<T1, E> Loadable<T1, E> {
    /// Joins two independently loading values.
    ///
    /// A failure on either side fails the pair, and when both failed both
    /// errors are kept. Otherwise an inactive side makes the pair inactive and
    /// a loading side makes it loading. Only two loaded values reach
    /// `transform`.
    pub fn combine<T2, R, F>(
        self,
        other: Loadable<T2, E>,
        transform: F,
    ) -> Loadable<R, CombinedError<E>>
    where
        F: FnOnce(T1, T2) -> R,
    {
        match (self, other) {
            (Loadable::Failed(first), Loadable::Failed(second)) => {
                Loadable::Failed(CombinedError::Both(first, second))
            }
            (Loadable::Failed(error), _) | (_, Loadable::Failed(error)) => {
                Loadable::Failed(CombinedError::Single(error))
            }
            (Loadable::Inactive, _) | (_, Loadable::Inactive) => Loadable::Inactive,
            (Loadable::Loading, _) | (_, Loadable::Loading) => Loadable::Loading,
            (Loadable::Loaded(first), Loadable::Loaded(second)) => {
                Loadable::Loaded(transform(first, second))
            }
        }
    }
}

/// Free-function form of [`Loadable::combine`].
pub fn combine<T1, T2, E, R, F>(
    first: Loadable<T1, E>,
    second: Loadable<T2, E>,
    transform: F,
) -> Loadable<R, CombinedError<E>>
where
    F: FnOnce(T1, T2) -> R,
{
    first.combine(second, transform)
}

/// Joins three values with the same precedence as [`combine`]: failures
/// first (all of them collected), then inactive, then loading.
pub fn combine3<T1, T2, T3, E, R, F>(
    first: Loadable<T1, E>,
    second: Loadable<T2, E>,
    third: Loadable<T3, E>,
    transform: F,
) -> Loadable<R, CombinedError<E>>
where
    F: FnOnce(T1, T2, T3) -> R,
{
    match (first, second, third) {
        (Loadable::Loaded(a), Loadable::Loaded(b), Loadable::Loaded(c)) => {
            Loadable::Loaded(transform(a, b, c))
        }
        (first, second, third) => {
            let mut pending = Pending::new();
            pending.note(first);
            pending.note(second);
            pending.note(third);
            pending.resolve().unwrap_or(Loadable::Loading)
        }
    }
}

/// Joins any number of values of one type into a loaded `Vec`, in input
/// order. Errors are collected rather than folded, so none is lost. An empty
/// input is loaded with an empty `Vec`.
pub fn combine_all<T, E, I>(states: I) -> Loadable<Vec<T>, CombinedError<E>>
where
    I: IntoIterator<Item = Loadable<T, E>>,
{
    let mut pending = Pending::new();
    let mut values = Vec::new();
    for state in states {
        match state {
            Loadable::Loaded(value) => values.push(value),
            other => pending.note(other),
        }
    }
    pending.resolve().unwrap_or(Loadable::Loaded(values))
}

/// What the non-loaded operands of a combination contributed.
struct Pending<E> {
    inactive: bool,
    loading: bool,
    errors: Vec<E>,
}

impl<E> Pending<E> {
    fn new() -> Self {
        Pending {
            inactive: false,
            loading: false,
            errors: Vec::new(),
        }
    }

    fn note<T>(&mut self, state: Loadable<T, E>) {
        match state {
            Loadable::Inactive => self.inactive = true,
            Loadable::Loading => self.loading = true,
            Loadable::Loaded(_) => {}
            Loadable::Failed(error) => self.errors.push(error),
        }
    }

    /// `None` when every operand had loaded.
    fn resolve<R>(self) -> Option<Loadable<R, CombinedError<E>>> {
        if let Some(error) = CombinedError::from_errors(self.errors) {
            Some(Loadable::Failed(error))
        } else if self.inactive {
            Some(Loadable::Inactive)
        } else if self.loading {
            Some(Loadable::Loading)
        } else {
            None
        }
    }
}
