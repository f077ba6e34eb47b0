use crate::{Loadable, LoadableError};
use thiserror::Error;

mod loadable_test;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TestError {
    #[error("network: {0}")]
    Network(String),
    #[error(transparent)]
    Loadable(#[from] LoadableError),
}

pub type TestLoadable<T> = Loadable<T, TestError>;

pub fn network(message: &str) -> TestError {
    TestError::Network(message.to_string())
}

/// One of each variant, for checks that must hold on every state.
pub fn all_states() -> Vec<TestLoadable<i32>> {
    vec![
        Loadable::Inactive,
        Loadable::Loading,
        Loadable::Loaded(7),
        Loadable::Failed(network("down")),
    ]
}
