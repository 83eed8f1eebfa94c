use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};

use crate::errors::WalletError;
use crate::models::ids::parse_wallet_id;
use crate::models::{CreateWalletRequest, SearchWalletsQuery, WalletView};
use crate::AppState;

pub const MESSAGE_HEADER: &str = "message";
pub const LIST_OF_WALLETS_HEADER_MSG: &str = "The list of wallets has been successfully retrieved.";
pub const EMPTY_LIST_OF_WALLETS_HEADER_MSG: &str = "There are no available wallets to view.";

type ApiError = (StatusCode, Json<serde_json::Value>);
type WalletListResponse = ([(&'static str, &'static str); 1], Json<Vec<WalletView>>);

/// Text of the `message` header for a listing of `views`.
pub fn list_message(views: &[WalletView]) -> &'static str {
    if views.is_empty() {
        EMPTY_LIST_OF_WALLETS_HEADER_MSG
    } else {
        LIST_OF_WALLETS_HEADER_MSG
    }
}

fn with_list_message(views: Vec<WalletView>) -> WalletListResponse {
    ([(MESSAGE_HEADER, list_message(&views))], Json(views))
}

fn read_body(
    payload: Result<Json<CreateWalletRequest>, JsonRejection>,
) -> Result<CreateWalletRequest, WalletError> {
    payload
        .map(|Json(request)| request)
        .map_err(|rejection| WalletError::BadRequest(rejection.body_text()))
}

/// Create a wallet. Validation runs before the service is touched.
pub async fn create_wallet(
    State(state): State<AppState>,
    payload: Result<Json<CreateWalletRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<WalletView>), ApiError> {
    let request = read_body(payload)?;
    let new_wallet = request.validate().map_err(WalletError::from)?;

    let wallet = state.wallet_service.create_wallet(new_wallet).await?;
    let view = state.wallet_mapper.to_view(&wallet);

    tracing::info!("Created wallet {} ({})", view.id, view.name);
    Ok((StatusCode::CREATED, Json(view)))
}

/// List all wallets in service order.
pub async fn list_wallets(
    State(state): State<AppState>,
) -> Result<WalletListResponse, ApiError> {
    let wallets = state.wallet_service.get_wallets().await?;
    let views = state.wallet_mapper.to_views(&wallets);

    tracing::debug!("Listing {} wallets", views.len());
    Ok(with_list_message(views))
}

/// Get wallet details
pub async fn get_wallet(
    Path(wallet_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<WalletView>, ApiError> {
    let id = parse_wallet_id(&wallet_id).map_err(WalletError::BadRequest)?;
    let wallet = state.wallet_service.find_by_id(id).await?;
    Ok(Json(state.wallet_mapper.to_view(&wallet)))
}

/// Rename a wallet. Same name rules as creation.
pub async fn update_wallet(
    Path(wallet_id): Path<String>,
    State(state): State<AppState>,
    payload: Result<Json<CreateWalletRequest>, JsonRejection>,
) -> Result<Json<WalletView>, ApiError> {
    let id = parse_wallet_id(&wallet_id).map_err(WalletError::BadRequest)?;
    let request = read_body(payload)?;
    let new_wallet = request.validate().map_err(WalletError::from)?;

    let wallet = state.wallet_service.update_wallet(id, new_wallet).await?;
    Ok(Json(state.wallet_mapper.to_view(&wallet)))
}

pub async fn delete_wallet(
    Path(wallet_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let id = parse_wallet_id(&wallet_id).map_err(WalletError::BadRequest)?;
    state.wallet_service.delete_wallet(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Find wallets whose name contains `?name=` (case-insensitive).
pub async fn search_wallets(
    State(state): State<AppState>,
    query: Result<Query<SearchWalletsQuery>, QueryRejection>,
) -> Result<WalletListResponse, ApiError> {
    let Query(query) = query.map_err(|rejection| WalletError::BadRequest(rejection.body_text()))?;
    let fragment = query.name.trim();
    if fragment.is_empty() {
        return Err(WalletError::BadRequest("Search name must not be blank".to_string()).into());
    }

    let wallets = state.wallet_service.find_by_name(fragment).await?;
    Ok(with_list_message(state.wallet_mapper.to_views(&wallets)))
}
