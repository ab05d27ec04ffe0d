use axum::Json;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Extension, State};
use axum::response::Response;
use companyrating_core::MutationAccess;
use tracing::{debug, info};

use crate::dto::{RatingsVisibilityPayload, VisibilityMessage};
use crate::error::ApiResult;
use crate::state::AppState;
use crate::visibility::RatingsVisibility;

/// GET /api/ratings-visibility - Current dashboard visibility flag.
pub async fn get_visibility_handler(
    State(state): State<AppState>,
) -> Json<RatingsVisibilityPayload> {
    Json(RatingsVisibilityPayload {
        value: state.visibility.current(),
    })
}

/// PUT /api/ratings-visibility - Set the flag and notify every connected client.
pub async fn set_visibility_handler(
    State(state): State<AppState>,
    Extension(access): Extension<MutationAccess>,
    Json(payload): Json<RatingsVisibilityPayload>,
) -> ApiResult<Json<RatingsVisibilityPayload>> {
    access.require()?;

    state.visibility.set(payload.value);
    info!(value = payload.value, "ratings visibility changed");

    Ok(Json(payload))
}

/// GET /ws - Relay of visibility updates between dashboard clients.
pub async fn visibility_socket_handler(
    State(state): State<AppState>,
    upgrade: WebSocketUpgrade,
) -> Response {
    upgrade.on_upgrade(move |socket| relay(socket, state.visibility))
}

async fn relay(mut socket: WebSocket, visibility: RatingsVisibility) {
    let mut updates = visibility.subscribe();

    let initial = *updates.borrow_and_update();
    if send(&mut socket, initial).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    match VisibilityMessage::parse(text.as_str()) {
                        Some(message) => visibility.set(message.value()),
                        None => debug!("ignoring malformed visibility message"),
                    }
                }
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let value = *updates.borrow_and_update();
                if send(&mut socket, value).await.is_err() {
                    break;
                }
            }
        }
    }
}

async fn send(socket: &mut WebSocket, value: bool) -> Result<(), axum::Error> {
    let text = serde_json::to_string(&VisibilityMessage::ShowRatingsUpdate { value })
        .unwrap_or_default();
    socket.send(Message::Text(text.into())).await
}
