use serde::Serialize;
use utoipa::ToSchema;

/// List response: `{ "results": [...] }`
#[derive(Debug, Serialize, ToSchema)]
pub struct ResultsResponse<T> {
    pub results: Vec<T>,
}

impl<T> ResultsResponse<T> {
    pub fn new<I, U>(items: I) -> Self
    where
        I: IntoIterator<Item = U>,
        T: From<U>,
    {
        Self {
            results: items.into_iter().map(T::from).collect(),
        }
    }
}

/// Single read response: `{ "result": ... }`
#[derive(Debug, Serialize, ToSchema)]
pub struct ResultResponse<T> {
    pub result: T,
}

impl<T> ResultResponse<T> {
    pub fn new(result: impl Into<T>) -> Self {
        Self {
            result: result.into(),
        }
    }
}
