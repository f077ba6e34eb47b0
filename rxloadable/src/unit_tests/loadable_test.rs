use super::{all_states, network, TestError, TestLoadable};
use crate::{Loadable, LoadableKind};

#[test]
fn test_inactive() {
    let inactive: TestLoadable<i32> = Loadable::Inactive;
    assert!(inactive.is_inactive());
    assert!(!inactive.is_loading());
    assert!(!inactive.has_loaded());
    assert!(!inactive.is_failed());
    assert!(!inactive.is_complete());
    assert_eq!(inactive.kind(), LoadableKind::Inactive);
    assert_eq!(inactive.loaded_value(), None);
    assert!(inactive.error().is_none());
}

#[test]
fn test_loading() {
    let loading: TestLoadable<i32> = Loadable::Loading;
    assert!(loading.is_loading());
    assert!(!loading.has_loaded());
    assert!(!loading.is_complete());
    assert_eq!(loading.kind(), LoadableKind::Loading);
    assert_eq!(loading.into_loaded(), None);
}

#[test]
fn test_loaded() {
    let loaded: TestLoadable<i32> = Loadable::Loaded(8);
    assert!(loaded.has_loaded());
    assert!(loaded.is_complete());
    assert_eq!(loaded.kind(), LoadableKind::Loaded);
    assert_eq!(loaded.loaded_value(), Some(&8));
    assert_eq!(loaded.into_loaded(), Some(8));
}

#[test]
fn test_failed() {
    let failed: TestLoadable<i32> = Loadable::Failed(network("timeout"));
    assert!(failed.is_failed());
    assert!(failed.is_complete());
    assert!(!failed.has_loaded());
    assert_eq!(failed.kind(), LoadableKind::Failed);
    assert_eq!(failed.loaded_value(), None);
    assert_eq!(failed.error(), Some(&network("timeout")));
    assert_eq!(failed.into_error(), Some(network("timeout")));
}

#[test]
fn test_equality_ignores_error_payload() {
    let first: TestLoadable<i32> = Loadable::Failed(network("a"));
    let second: TestLoadable<i32> = Loadable::Failed(network("b"));
    assert_eq!(first, second);

    assert_ne!(TestLoadable::Loaded(1), TestLoadable::Loaded(2));
    assert_eq!(TestLoadable::Loaded(1), TestLoadable::Loaded(1));
    assert_ne!(TestLoadable::<i32>::Inactive, TestLoadable::Loading);
    assert_ne!(TestLoadable::<i32>::Loading, first);
}

#[test]
fn test_to_bool() {
    assert_eq!(TestLoadable::<i32>::Inactive.to_bool(), Some(false));
    assert_eq!(TestLoadable::<i32>::Loading.to_bool(), None);
    assert_eq!(TestLoadable::Loaded(0).to_bool(), Some(true));
    assert_eq!(TestLoadable::<i32>::Failed(network("x")).to_bool(), Some(false));
}

#[test]
fn test_to_bool_with_overrides() {
    let overrides = |state: &TestLoadable<i32>| state.to_bool_with(None, Some(true), None);
    assert_eq!(overrides(&Loadable::Inactive), None);
    assert_eq!(overrides(&Loadable::Loading), Some(true));
    assert_eq!(overrides(&Loadable::Loaded(3)), Some(true));
    assert_eq!(overrides(&Loadable::Failed(network("x"))), None);
}

#[test]
fn test_map_sees_whole_state() {
    // A loaded empty list is treated as a failure.
    let reject_empty = |state: TestLoadable<Vec<i32>>| match state {
        Loadable::Loaded(items) if items.is_empty() => Loadable::Failed(network("empty")),
        other => other,
    };
    assert!(Loadable::Loaded(vec![]).map(reject_empty).is_failed());
    assert_eq!(
        Loadable::Loaded(vec![1]).map(reject_empty),
        Loadable::Loaded(vec![1])
    );
    assert_eq!(TestLoadable::<i32>::Loading.map(|state| state.kind()), LoadableKind::Loading);
}

#[test]
fn test_map_loaded_identity_law() {
    for state in all_states() {
        assert_eq!(state.clone().map_loaded(|value| value), state);
    }
}

#[test]
fn test_map_loaded_composition_law() {
    let f = |value: i32| value + 1;
    let g = |value: i32| value.to_string();
    for state in all_states() {
        let stepwise = state.clone().map_loaded(f).map_loaded(g);
        let composed = state.clone().map_loaded(|value| g(f(value)));
        assert_eq!(stepwise, composed);
        assert_eq!(stepwise.kind(), state.kind());
    }
}

#[test]
fn test_map_loaded_passes_other_states_through() {
    assert_eq!(TestLoadable::<i32>::Inactive.map_loaded(|v| v * 2), Loadable::Inactive);
    assert_eq!(TestLoadable::<i32>::Loading.map_loaded(|v| v * 2), Loadable::Loading);

    let failed = TestLoadable::<i32>::Failed(network("kept")).map_loaded(|v| v * 2);
    assert_eq!(failed.error(), Some(&network("kept")));

    assert_eq!(TestLoadable::Loaded(21).map_loaded(|v| v * 2), Loadable::Loaded(42));
}

#[test]
fn test_try_map_loaded() {
    let parse = |text: &str| -> Result<i32, TestError> { text.parse().map_err(|_| network("parse")) };

    assert_eq!(TestLoadable::Loaded("12").try_map_loaded(parse), Loadable::Loaded(12));

    let failed = TestLoadable::Loaded("twelve").try_map_loaded(parse);
    assert_eq!(failed.error(), Some(&network("parse")));

    // An existing failure is not re-derived from the transform.
    let existing = TestLoadable::<&str>::Failed(network("earlier")).try_map_loaded(parse);
    assert_eq!(existing.error(), Some(&network("earlier")));

    assert_eq!(TestLoadable::<&str>::Loading.try_map_loaded(parse), Loadable::Loading);
}

#[test]
fn test_map_loaded_or_fail() {
    let first = |items: Vec<i32>| items.first().copied();

    assert_eq!(
        TestLoadable::Loaded(vec![4, 5]).map_loaded_or_fail(network("empty"), first),
        Loadable::Loaded(4)
    );

    let failed = TestLoadable::Loaded(vec![]).map_loaded_or_fail(network("empty"), first);
    assert_eq!(failed.error(), Some(&network("empty")));

    let existing = TestLoadable::<Vec<i32>>::Failed(network("earlier"))
        .map_loaded_or_fail(network("empty"), first);
    assert_eq!(existing.error(), Some(&network("earlier")));
}

#[test]
fn test_map_loaded_or_fallback() {
    let first = |items: Vec<i32>| items.first().copied();

    assert_eq!(
        TestLoadable::Loaded(vec![4, 5]).map_loaded_or_fallback(0, first),
        Loadable::Loaded(4)
    );
    assert_eq!(
        TestLoadable::Loaded(vec![]).map_loaded_or_fallback(0, first),
        Loadable::Loaded(0)
    );
    assert_eq!(
        TestLoadable::<Vec<i32>>::Inactive.map_loaded_or_fallback(0, first),
        Loadable::Inactive
    );
}

#[test]
fn test_map_loaded_or_recover() {
    let first = |items: &Vec<i32>| items.first().copied();
    let from_len = |items: Vec<i32>| -> Result<i32, TestError> {
        if items.len() > 10 {
            Err(network("too long"))
        } else {
            Ok(-(items.len() as i32))
        }
    };

    assert_eq!(
        TestLoadable::Loaded(vec![9]).map_loaded_or_recover(from_len, first),
        Loadable::Loaded(9)
    );
    assert_eq!(
        TestLoadable::Loaded(vec![]).map_loaded_or_recover(from_len, first),
        Loadable::Loaded(0)
    );

    let mut recover_called = false;
    let state = TestLoadable::<Vec<i32>>::Loading.map_loaded_or_recover(
        |items| {
            recover_called = true;
            from_len(items)
        },
        first,
    );
    assert_eq!(state, Loadable::Loading);
    assert!(!recover_called);
}

#[test]
fn test_map_loaded_or_recover_failure() {
    let never = |_: &Vec<i32>| None::<i32>;
    let failed = TestLoadable::Loaded(vec![1, 2])
        .map_loaded_or_recover(|_| Err(network("unrecoverable")), never);
    assert_eq!(failed.error(), Some(&network("unrecoverable")));
}

#[test]
fn test_map_error() {
    let failed = TestLoadable::<i32>::Failed(network("raw")).map_error(|error| error.to_string());
    assert_eq!(failed.error(), Some(&"network: raw".to_string()));

    let loaded = TestLoadable::Loaded(1).map_error(|error| error.to_string());
    assert_eq!(loaded, Loadable::Loaded(1));
    assert_eq!(TestLoadable::<i32>::Loading.map_error(|_| ()), Loadable::Loading);
}

#[test]
fn test_recover_error() {
    let cached = |_: &TestError| Some(99);
    let no_cache = |_: &TestError| None;

    let recovered = TestLoadable::<i32>::Failed(network("offline")).recover_error(cached);
    assert_eq!(recovered, Loadable::Loaded(99));

    let kept = TestLoadable::<i32>::Failed(network("offline")).recover_error(no_cache);
    assert_eq!(kept.error(), Some(&network("offline")));

    assert_eq!(TestLoadable::Loaded(1).recover_error(cached), Loadable::Loaded(1));
    assert_eq!(TestLoadable::<i32>::Inactive.recover_error(cached), Loadable::Inactive);
}

#[test]
fn test_flat_map_loaded() {
    let fetch_profile = |id: i32| -> TestLoadable<String> {
        if id > 0 {
            Loadable::Loaded(format!("user-{id}"))
        } else {
            Loadable::Failed(network("no such user"))
        }
    };

    assert_eq!(
        TestLoadable::Loaded(3).flat_map_loaded(fetch_profile),
        Loadable::Loaded("user-3".to_string())
    );
    assert!(TestLoadable::Loaded(0).flat_map_loaded(fetch_profile).is_failed());
    assert_eq!(
        TestLoadable::Loaded(3).flat_map_loaded(|_| TestLoadable::<String>::Loading),
        Loadable::Loading
    );
    assert_eq!(TestLoadable::<i32>::Inactive.flat_map_loaded(fetch_profile), Loadable::Inactive);
    assert_eq!(TestLoadable::<i32>::Loading.flat_map_loaded(fetch_profile), Loadable::Loading);

    let failed = TestLoadable::<i32>::Failed(network("first")).flat_map_loaded(fetch_profile);
    assert_eq!(failed.error(), Some(&network("first")));
}

#[test]
fn test_unpack() {
    assert_eq!(TestLoadable::Loaded(5).unpack(Some(1), Some(2), Some(3)), Some(5));
    assert_eq!(TestLoadable::<i32>::Inactive.unpack(Some(1), Some(2), Some(3)), Some(1));
    assert_eq!(TestLoadable::<i32>::Loading.unpack(Some(1), Some(2), Some(3)), Some(2));
    assert_eq!(
        TestLoadable::<i32>::Failed(network("x")).unpack(Some(1), Some(2), Some(3)),
        Some(3)
    );
    assert_eq!(TestLoadable::<i32>::Loading.unpack(None, None, None), None);
}

#[test]
fn test_unpack_or() {
    for state in all_states() {
        let expected = if state.has_loaded() { 7 } else { -1 };
        assert_eq!(state.unpack_or(-1), expected);
    }
}

#[test]
fn test_map_bool() {
    assert_eq!(TestLoadable::Loaded(true).map_bool("on", "off"), Loadable::Loaded("on"));
    assert_eq!(TestLoadable::Loaded(false).map_bool("on", "off"), Loadable::Loaded("off"));
    assert_eq!(TestLoadable::<bool>::Loading.map_bool("on", "off"), Loadable::Loading);
}

#[test]
fn test_complex_state_transitions() {
    #[derive(Clone, Debug, PartialEq)]
    struct User {
        id: i32,
        name: String,
    }

    let mut state = TestLoadable::<User>::default();
    assert!(state.is_inactive());

    state = Loadable::Loading;
    assert_eq!(state.to_bool(), None);

    state = Loadable::Loaded(User {
        id: 1,
        name: "John".to_string(),
    });
    let name = state.clone().map_loaded(|user| user.name);
    assert_eq!(name, Loadable::Loaded("John".to_string()));

    state = Loadable::Failed(network("update failed"));
    let recovered = state.recover_error(|_| {
        Some(User {
            id: 1,
            name: "cached".to_string(),
        })
    });
    assert_eq!(recovered.loaded_value().map(|user| user.id), Some(1));
}
