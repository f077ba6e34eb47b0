use rxloadable::LoadableError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Loadable(#[from] LoadableError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: u32,
    pub avatar_url: String,
}

pub async fn fetch_user(id: u32) -> Result<User, ApiError> {
    tokio::time::sleep(Duration::from_millis(5)).await;
    if id == 0 {
        return Err(ApiError::NotFound(format!("user {id}")));
    }
    Ok(User {
        id,
        avatar_url: format!("https://img.example/{id}.png"),
    })
}

pub async fn fetch_avatar(url: String) -> Result<Vec<u8>, ApiError> {
    tokio::time::sleep(Duration::from_millis(5)).await;
    Ok(url.into_bytes())
}
