use oauth2::{
    basic::BasicClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RedirectUrl,
    Scope, TokenResponse, TokenUrl,
};
use oauth2::{AsyncHttpClient, EndpointNotSet, EndpointSet, HttpClientError, HttpResponse};
use serde::Deserialize;
use std::future::Future;
use std::pin::Pin;

use crate::auth::AuthConfig;
use crate::error::AppError;

/// Bridge between reqwest 0.13 and oauth2's AsyncHttpClient trait; the
/// integration bundled with oauth2 5.0 targets reqwest 0.12.
#[derive(Clone)]
struct BridgedHttpClient(reqwest::Client);

impl<'c> AsyncHttpClient<'c> for BridgedHttpClient {
    type Error = HttpClientError<reqwest::Error>;
    type Future =
        Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + Send + Sync + 'c>>;

    fn call(&'c self, request: oauth2::HttpRequest) -> Self::Future {
        Box::pin(async move {
            let method = request.method().clone();
            let url = request.uri().to_string();

            let mut req_builder = self.0.request(method, &url);
            for (name, value) in request.headers().iter() {
                req_builder = req_builder.header(name, value);
            }
            req_builder = req_builder.body(request.into_body());

            let response = req_builder.send().await.map_err(Box::new)?;

            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await.map_err(Box::new)?.to_vec();

            let mut builder = axum::http::Response::builder().status(status);
            for (name, value) in headers.iter() {
                builder = builder.header(name, value);
            }

            builder.body(body).map_err(HttpClientError::Http)
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub enum OAuthProvider {
    Google,
    Kakao,
}

impl OAuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::Kakao => "kakao",
        }
    }

    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "google" => Ok(OAuthProvider::Google),
            "kakao" => Ok(OAuthProvider::Kakao),
            _ => Err(AppError::Validation(format!(
                "unknown OAuth provider: {}",
                s
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    id: String,
    email: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct KakaoProfile {
    nickname: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KakaoAccount {
    email: Option<String>,
    profile: Option<KakaoProfile>,
}

#[derive(Debug, Deserialize)]
struct KakaoUserInfo {
    id: i64,
    kakao_account: Option<KakaoAccount>,
}

/// Identity resolved from a provider, enough to find or create a member.
#[derive(Debug, Clone)]
pub struct OAuthUserInfo {
    pub provider_id: String,
    pub email: String,
    pub name: String,
}

#[derive(Clone)]
pub struct OAuthService {
    config: AuthConfig,
    http_client: reqwest::Client,
    oauth2_client: BridgedHttpClient,
}

impl OAuthService {
    pub fn new(config: AuthConfig) -> Self {
        let http_client = reqwest::Client::new();
        Self {
            config,
            oauth2_client: BridgedHttpClient(http_client.clone()),
            http_client,
        }
    }

    fn client(
        &self,
        provider: OAuthProvider,
    ) -> Result<
        BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>,
        AppError,
    > {
        let redirect_url = format!(
            "{}/auth/{}/callback",
            self.config.redirect_base_url,
            provider.as_str()
        );

        let (client_id, client_secret, auth_uri, token_uri) = match provider {
            OAuthProvider::Google => (
                self.config.google_client_id.clone(),
                self.config.google_client_secret.clone(),
                "https://accounts.google.com/o/oauth2/v2/auth",
                "https://www.googleapis.com/oauth2/v4/token",
            ),
            OAuthProvider::Kakao => (
                self.config.kakao_client_id.clone(),
                self.config.kakao_client_secret.clone(),
                "https://kauth.kakao.com/oauth/authorize",
                "https://kauth.kakao.com/oauth/token",
            ),
        };

        Ok(BasicClient::new(ClientId::new(client_id))
            .set_client_secret(ClientSecret::new(client_secret))
            .set_auth_uri(
                AuthUrl::new(auth_uri.to_string())
                    .map_err(|e| AppError::Internal(format!("invalid auth URL: {}", e)))?,
            )
            .set_token_uri(
                TokenUrl::new(token_uri.to_string())
                    .map_err(|e| AppError::Internal(format!("invalid token URL: {}", e)))?,
            )
            .set_redirect_uri(
                RedirectUrl::new(redirect_url)
                    .map_err(|e| AppError::Internal(format!("invalid redirect URL: {}", e)))?,
            ))
    }

    pub fn get_authorize_url(&self, provider: OAuthProvider) -> Result<(String, String), AppError> {
        let client = self.client(provider)?;

        let scope = match provider {
            OAuthProvider::Google => Scope::new("openid email profile".to_string()),
            OAuthProvider::Kakao => Scope::new("account_email profile_nickname".to_string()),
        };

        let (auth_url, csrf_token) = client
            .authorize_url(CsrfToken::new_random)
            .add_scope(scope)
            .url();

        Ok((auth_url.to_string(), csrf_token.secret().clone()))
    }

    pub async fn exchange_code_for_user_info(
        &self,
        provider: OAuthProvider,
        code: String,
    ) -> Result<OAuthUserInfo, AppError> {
        let client = self.client(provider)?;

        let token = client
            .exchange_code(AuthorizationCode::new(code))
            .request_async(&self.oauth2_client)
            .await
            .map_err(|e| AppError::Upstream(format!("token exchange failed: {}", e)))?;

        let access_token = token.access_token().secret();
        match provider {
            OAuthProvider::Google => self.get_google_user_info(access_token).await,
            OAuthProvider::Kakao => self.get_kakao_user_info(access_token).await,
        }
    }

    async fn get_google_user_info(&self, access_token: &str) -> Result<OAuthUserInfo, AppError> {
        let info: GoogleUserInfo = self
            .fetch_user_info("https://www.googleapis.com/oauth2/v2/userinfo", access_token)
            .await?;

        Ok(OAuthUserInfo {
            provider_id: info.id,
            email: info.email,
            name: info.name,
        })
    }

    async fn get_kakao_user_info(&self, access_token: &str) -> Result<OAuthUserInfo, AppError> {
        let info: KakaoUserInfo = self
            .fetch_user_info("https://kapi.kakao.com/v2/user/me", access_token)
            .await?;

        let account = info.kakao_account.unwrap_or(KakaoAccount {
            email: None,
            profile: None,
        });
        let email = account.email.ok_or_else(|| {
            AppError::Upstream("Kakao account did not share an email address".to_string())
        })?;
        let name = account
            .profile
            .and_then(|p| p.nickname)
            .unwrap_or_else(|| email.clone());

        Ok(OAuthUserInfo {
            provider_id: info.id.to_string(),
            email,
            name,
        })
    }

    async fn fetch_user_info<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        access_token: &str,
    ) -> Result<T, AppError> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("failed to fetch user info: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "failed to fetch user info: {}",
                response.status()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Upstream(format!("failed to parse user info: {}", e)))
    }
}
