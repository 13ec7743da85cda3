//! Request extractors.
//!
//! Authentication happens upstream. The proxy in front of this service
//! forwards the verified identity as `x-user-id` and `x-user-role`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use stillpoint_core::actor::{Actor, Role};
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the caller's role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy)]
pub struct CurrentActor(pub Actor);

impl<S: Send + Sync> FromRequestParts<S> for CurrentActor {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header(parts, USER_ID_HEADER)?
            .parse::<Uuid>()
            .map_err(|_| ApiError::Unauthenticated(format!("{USER_ID_HEADER} is not a UUID")))?;
        let role = header(parts, USER_ROLE_HEADER)?
            .parse::<Role>()
            .map_err(|_| ApiError::Unauthenticated(format!("{USER_ROLE_HEADER} is not a role")))?;

        Ok(Self(Actor::new(user_id, role)))
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, ApiError> {
    parts
        .headers
        .get(name)
        .ok_or_else(|| ApiError::Unauthenticated(format!("missing {name} header")))?
        .to_str()
        .map_err(|_| ApiError::Unauthenticated(format!("{name} is not valid text")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<CurrentActor, ApiError> {
        let (mut parts, ()) = request.into_parts();
        CurrentActor::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extracts_actor_from_headers() {
        let user_id = Uuid::new_v4();
        let request = Request::builder()
            .header(USER_ID_HEADER, user_id.to_string())
            .header(USER_ROLE_HEADER, "content_reviewer")
            .body(())
            .unwrap();

        let CurrentActor(actor) = extract(request).await.unwrap();

        assert_eq!(actor, Actor::new(user_id, Role::ContentReviewer));
    }

    #[tokio::test]
    async fn test_missing_role_is_unauthenticated() {
        let request = Request::builder()
            .header(USER_ID_HEADER, Uuid::new_v4().to_string())
            .body(())
            .unwrap();

        let result = extract(request).await;

        assert!(matches!(result, Err(ApiError::Unauthenticated(_))));
    }

    #[tokio::test]
    async fn test_unknown_role_is_unauthenticated() {
        let request = Request::builder()
            .header(USER_ID_HEADER, Uuid::new_v4().to_string())
            .header(USER_ROLE_HEADER, "superuser")
            .body(())
            .unwrap();

        let result = extract(request).await;

        assert!(matches!(result, Err(ApiError::Unauthenticated(_))));
    }
}
