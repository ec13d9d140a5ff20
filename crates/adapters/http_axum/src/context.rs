//! Request context: who is acting and from where.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::request::Parts;

use airserv_app::services::activity_service::Actor;

/// Header carrying the identity resolved by the authentication layer.
pub const ACTOR_HEADER: &str = "x-actor-id";

/// The [`Actor`] behind the current request.
///
/// The identity comes from [`ACTOR_HEADER`]. The origin is the first
/// `x-forwarded-for` hop, then `x-real-ip`, then the peer address when the
/// server was started with connect info.
#[derive(Debug, Clone, Default)]
pub struct RequestActor(pub Actor);

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

fn forwarded_origin(headers: &HeaderMap) -> Option<String> {
    header(headers, "x-forwarded-for")
        .and_then(|list| {
            list.split(',')
                .map(str::trim)
                .find(|hop| !hop.is_empty())
                .map(ToString::to_string)
        })
        .or_else(|| header(headers, "x-real-ip"))
}

impl<St> FromRequestParts<St> for RequestActor
where
    St: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
        let id = header(&parts.headers, ACTOR_HEADER);
        let origin = forwarded_origin(&parts.headers).or_else(|| {
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        });
        Ok(Self(Actor { id, origin }))
    }
}
