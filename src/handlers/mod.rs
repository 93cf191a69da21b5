use axum::response::{IntoResponse, Response};

pub mod auth;
pub mod posts;

/// What a handler did, when it did not fail.
///
/// `Recovered` marks a request that needed no work because the state it asked
/// for already held; the response has been decided all the same.
#[derive(Debug)]
pub enum Outcome {
    Success(Response),
    Recovered(Response),
}

impl Outcome {
    pub fn success(resp: impl IntoResponse) -> Self {
        Outcome::Success(resp.into_response())
    }

    pub fn recovered(resp: impl IntoResponse) -> Self {
        Outcome::Recovered(resp.into_response())
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Outcome::Success(resp) | Outcome::Recovered(resp) => resp,
        }
    }
}
