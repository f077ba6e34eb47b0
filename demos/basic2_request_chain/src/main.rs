use crate::tracing_setup::tracing_init;
use futures::{stream, StreamExt};
use futures_signals::signal::SignalExt;
use rxloadable::{
    combine_signals, Loadable, LoadableError, LoadableStore, LoadableStreamExt, RxStreamExt,
};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

mod tracing_setup;

#[derive(Debug, Clone)]
struct Profile {
    name: String,
    team_id: u32,
}

#[derive(Debug, Clone)]
struct Team {
    title: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_init();

    info!("==========================================");
    warn!("example: profile request chained into a team request");
    let mut teams = Box::pin(
        load_profile("ada")
            .flat_map_loaded(|profile: Profile| {
                debug!("Worker thread | profile loaded: {:?}", profile);
                load_team(profile.team_id)
            })
            .map_loaded(|team| team.title),
    );
    while let Some(state) = teams.next().await {
        info!("  Main thread | team: {:?}", state);
    }

    info!("==========================================");
    warn!("example: a failed profile never requests the team");
    let states: Vec<_> = load_profile("")
        .flat_map_loaded(|profile: Profile| load_team(profile.team_id))
        .collect()
        .await;
    info!("  Main thread | states: {:?}", states);

    info!("==========================================");
    warn!("example: unpacked values end at the first failure");
    let unpacked: Vec<_> = stream::iter(vec!["ada", "grace", "", "linus"])
        .then(|name| async move { fetch_profile(name.to_string()).await })
        .loadable()
        .unpacked()
        .collect()
        .await;
    info!("  Main thread | unpacked: {:?}", unpacked);

    info!("==========================================");
    warn!("example: two stores combined into one signal");
    let profile_store = LoadableStore::<Profile, LoadableError>::inactive();
    let team_store = LoadableStore::<Team, LoadableError>::inactive();

    let page = combine_signals(
        profile_store.to_signal(),
        team_store.to_signal(),
        |profile, team| format!("{} works on {}", profile.name, team.title),
    );

    profile_store.execute(fetch_profile("ada".to_string()))?;
    team_store.execute(fetch_team(7))?;

    page.stop_if(|state| state.is_complete())
        .for_each(|state| async move {
            info!("  Main thread | page: {:?}", state);
        })
        .await;

    info!("  Main thread | Finish");
    Ok(())
}

fn load_profile(name: &str) -> impl futures::Stream<Item = Loadable<Profile, LoadableError>> {
    stream::once(fetch_profile(name.to_string()))
        .loadable()
        .start_with(Loadable::Loading)
}

fn load_team(team_id: u32) -> impl futures::Stream<Item = Loadable<Team, LoadableError>> {
    stream::once(fetch_team(team_id))
        .loadable()
        .start_with(Loadable::Loading)
}

async fn fetch_profile(name: String) -> Result<Profile, LoadableError> {
    sleep(Duration::from_millis(100)).await;
    if name.is_empty() {
        return Err(LoadableError::error("profile name is empty"));
    }
    Ok(Profile {
        team_id: name.len() as u32,
        name,
    })
}

async fn fetch_team(team_id: u32) -> Result<Team, LoadableError> {
    sleep(Duration::from_millis(100)).await;
    Ok(Team {
        title: format!("team #{team_id}"),
    })
}
