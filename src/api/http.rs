//! reqwest-backed implementation of the gateway contract

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::entities::{AvatarUpdate, ErrorBody, NewCard, ProfileUpdate, RawCard, RawUser};
use super::{Bundle, Gateway, GatewayError, GatewayResult};
use crate::config::Config;
use crate::state::data::CardId;

/// Talks JSON to the board API rooted at `base_url`
pub struct HttpGateway {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpGateway {
    /// Build a gateway from the loaded configuration
    pub fn new(config: &Config) -> GatewayResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        self.client
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, &self.token)
    }

    /// Send and decode a JSON answer, turning non-2xx into `Status`
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> GatewayResult<T> {
        let response = check_status(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Map a non-success response to `GatewayError::Status`, keeping the server message
async fn check_status(response: Response) -> GatewayResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());

    Err(GatewayError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn fetch_bundle(&self) -> GatewayResult<Bundle> {
        let (cards, user) = tokio::try_join!(
            self.send_json::<Vec<RawCard>>(self.request(Method::GET, "/cards")),
            self.send_json::<RawUser>(self.request(Method::GET, "/users/me")),
        )?;

        Ok(Bundle { cards, user })
    }

    async fn update_profile(&self, name: &str, about: &str) -> GatewayResult<RawUser> {
        let request = self
            .request(Method::PATCH, "/users/me")
            .json(&ProfileUpdate { name, about });
        self.send_json(request).await
    }

    async fn update_avatar(&self, avatar: &str) -> GatewayResult<RawUser> {
        let request = self
            .request(Method::PATCH, "/users/me/avatar")
            .json(&AvatarUpdate { avatar });
        self.send_json(request).await
    }

    async fn create_card(&self, name: &str, link: &str) -> GatewayResult<RawCard> {
        let request = self
            .request(Method::POST, "/cards")
            .json(&NewCard { name, link });
        self.send_json(request).await
    }

    async fn delete_card(&self, id: &CardId) -> GatewayResult<()> {
        let request = self.request(Method::DELETE, &format!("/cards/{}", id));
        check_status(request.send().await?).await?;
        Ok(())
    }

    async fn set_like(&self, id: &CardId, liked: bool) -> GatewayResult<RawCard> {
        let method = if liked { Method::PUT } else { Method::DELETE };
        let request = self.request(method, &format!("/cards/{}/likes", id));
        self.send_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base: &str) -> Config {
        Config {
            api_base_url: base.to_string(),
            token: "secret".to_string(),
            request_timeout_secs: Some(5),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let gateway = HttpGateway::new(&config("https://board.example/v1/")).unwrap();
        assert_eq!(gateway.base_url, "https://board.example/v1");
    }

    #[test]
    fn test_requests_carry_token_and_full_url() {
        let gateway = HttpGateway::new(&config("https://board.example/v1")).unwrap();

        let request = gateway
            .request(Method::PUT, "/cards/c1/likes")
            .build()
            .unwrap();

        assert_eq!(request.method(), Method::PUT);
        assert_eq!(request.url().as_str(), "https://board.example/v1/cards/c1/likes");
        assert_eq!(
            request.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
            "secret"
        );
    }

    #[tokio::test]
    async fn test_unusable_base_url_is_a_transport_error() {
        // Fails while building the request, before any connection is attempted
        let gateway = HttpGateway::new(&config("http://[::1")).unwrap();

        let err = gateway.fetch_bundle().await.unwrap_err();

        assert!(matches!(err, GatewayError::Transport(_)));
    }
}
