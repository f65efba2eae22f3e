use crate::wallet::WalletError;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use solana_sdk::native_token::lamports_to_sol;
use tracing::error;

#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    pub commitment: Option<String>,
}

// Defines the structure for the JSON output returned by our API.
#[derive(Debug, Serialize)]
pub struct BalanceOutput {
    pub address: String,
    pub network: String,
    pub lamports: u64,
    pub sol: f64,
}

// The handler function for the GET /balance/{address} endpoint.
pub async fn get_balance_handler(
    Path(address): Path<String>,
    Query(query): Query<BalanceQuery>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let ctx = state.wallet.as_ref();
    let pubkey = match crate::wallet::validate::validate_address(&address) {
        Ok(pubkey) => pubkey,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };
    let commitment = match crate::wallet::validate::parse_commitment(query.commitment.as_deref()) {
        Ok(commitment) => commitment,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let client = ctx.rpc_client();
    match client.get_balance_with_commitment(&pubkey, commitment).await {
        Ok(balance) => {
            let output = BalanceOutput {
                address: pubkey.to_string(),
                network: ctx.current_network().to_string(),
                lamports: balance.value,
                sol: lamports_to_sol(balance.value),
            };
            (StatusCode::OK, Json(output)).into_response()
        }
        Err(e) => {
            error!("Failed to get balance for {}: {:?}", pubkey, e);
            let err = WalletError::from(e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch balance: {}", err),
            )
                .into_response()
        }
    }
}
