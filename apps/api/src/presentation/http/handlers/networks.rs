use crate::{
    domain::network::registry::NetworkDescriptor,
    presentation::http::state::AppState,
};
use axum::{Json, extract::State};

pub async fn list_networks(State(state): State<AppState>) -> Json<Vec<NetworkDescriptor>> {
    Json(state.networks.descriptors())
}
