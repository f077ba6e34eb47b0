use crate::{IntoLoadable, Loadable, LoadableError};

/// Coarse request status: whether something is still pending, went through,
/// or went wrong. Inactive and loading both count as in progress and the
/// error itself is dropped.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Status {
    InProgress,
    Success,
    Error,
}

impl Status {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Status::InProgress)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error)
    }
}

/// Types that can be reduced to a [`Status`].
pub trait ToStatus {
    fn status(&self) -> Status;
}

impl ToStatus for Status {
    fn status(&self) -> Status {
        *self
    }
}

impl<T, E> ToStatus for Loadable<T, E> {
    fn status(&self) -> Status {
        match self {
            Loadable::Inactive | Loadable::Loading => Status::InProgress,
            Loadable::Loaded(_) => Status::Success,
            Loadable::Failed(_) => Status::Error,
        }
    }
}

/// A request status that also remembers what was requested.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RequestStatus<Req, Resp, E> {
    Unknown,
    InProgress(Req),
    Success(Resp),
    Error(E),
}

impl<Req, Resp, E> RequestStatus<Req, Resp, E> {
    pub fn loaded(&self) -> Option<&Resp> {
        match self {
            RequestStatus::Success(response) => Some(response),
            _ => None,
        }
    }

    pub fn request(&self) -> Option<&Req> {
        match self {
            RequestStatus::InProgress(request) => Some(request),
            _ => None,
        }
    }
}

impl<Req, Resp, E> ToStatus for RequestStatus<Req, Resp, E> {
    fn status(&self) -> Status {
        match self {
            RequestStatus::Unknown | RequestStatus::InProgress(_) => Status::InProgress,
            RequestStatus::Success(_) => Status::Success,
            RequestStatus::Error(_) => Status::Error,
        }
    }
}

/// An unknown status cannot be told apart from a lost request, so it
/// converts to a failure carrying [`LoadableError::Unknown`].
impl<Req, Resp, E> IntoLoadable for RequestStatus<Req, Resp, E>
where
    E: From<LoadableError>,
{
    type Value = Resp;
    type Error = E;

    fn into_loadable(self) -> Loadable<Resp, E> {
        match self {
            RequestStatus::Unknown => Loadable::Failed(E::from(LoadableError::Unknown)),
            RequestStatus::InProgress(_) => Loadable::Loading,
            RequestStatus::Success(response) => Loadable::Loaded(response),
            RequestStatus::Error(error) => Loadable::Failed(error),
        }
    }
}
