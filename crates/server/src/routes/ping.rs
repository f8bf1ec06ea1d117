use axum::{routing::get, Json, Router};
use shared::api::{payloads::Message, Object};

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(Object::Ping.path(), get(ping))
}

async fn ping() -> Json<Message> {
    Json(Message::new("pong"))
}
