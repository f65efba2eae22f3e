use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct NetworkOutput {
    pub network: String,
    pub rpc_url: String,
}

// The handler function for the GET /network endpoint.
pub async fn get_network_handler(State(state): State<AppState>) -> impl IntoResponse {
    let ctx = state.wallet.as_ref();
    Json(NetworkOutput {
        network: ctx.current_network().to_string(),
        rpc_url: ctx.rpc_url(),
    })
}
