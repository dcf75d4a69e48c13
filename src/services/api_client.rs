// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP
// ============================================================================

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use crate::config::CONFIG;
use crate::models::{
    AddFavoriteRequest, CompanyQuery, CompanyRecord, FavoriteCheckResponse, FavoriteEntry,
    FavoritesResponse, FilterOptions, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse, SessionTokenRequest, ValidateResponse,
};
use crate::services::api_error::{error_message_from_body, ApiError};
use crate::services::traits::{AuthApi, CompaniesApi, FavoritesApi};

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: CONFIG.backend_url().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_bearer(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("Authorization", &format!("Bearer {}", token))
    }

    async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
        builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    async fn send_request(request: Request) -> Result<Response, ApiError> {
        request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    /// Error HTTP con el mensaje del backend si viene en el cuerpo
    async fn http_error(response: Response) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = error_message_from_body(&body).unwrap_or_else(|| response.status_text());
        ApiError::Http { status, message }
    }

    /// Decodificar cuerpo JSON exigiendo 2xx
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if !response.ok() {
            return Err(Self::http_error(response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Decodificar cuerpo JSON aunque el status no sea 2xx.
    /// Los endpoints de auth responden 401/400 con `{success:false, message}`.
    async fn decode_lenient<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let status_text = response.status_text();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        match serde_json::from_str::<T>(&body) {
            Ok(value) => Ok(value),
            Err(_) if !(200..300).contains(&status) => Err(ApiError::Http {
                status,
                message: error_message_from_body(&body).unwrap_or(status_text),
            }),
            Err(e) => Err(ApiError::Parse(e.to_string())),
        }
    }

    /// Comprobar 2xx descartando el cuerpo
    async fn expect_ok(response: Response) -> Result<(), ApiError> {
        if response.ok() {
            Ok(())
        } else {
            Err(Self::http_error(response).await)
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Validar que el payload de /api/companies sea un array de registros
pub fn parse_companies_payload(body: &str) -> Result<Vec<CompanyRecord>, ApiError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))?;
    if !value.is_array() {
        return Err(ApiError::Parse("expected an array of companies".to_string()));
    }
    serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))
}

impl CompaniesApi for ApiClient {
    /// Listar empresas con filtros + estrategia de volumen (un único GET)
    async fn fetch_companies(&self, query: &CompanyQuery) -> Result<Vec<CompanyRecord>, ApiError> {
        let pairs = query.query_pairs();
        log::info!("🌐 [API] GET /api/companies {:?}", pairs);

        let builder = Request::get(&self.url("/api/companies"))
            .query(pairs.iter().map(|(key, value)| (*key, value.as_str())));
        let response = Self::send(builder).await?;
        if !response.ok() {
            return Err(Self::http_error(response).await);
        }
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        parse_companies_payload(&body)
    }

    async fn fetch_filter_options(&self) -> Result<FilterOptions, ApiError> {
        let response = Self::send(Request::get(&self.url("/api/filters/options"))).await?;
        Self::decode::<FilterOptions>(response).await
    }
}

impl FavoritesApi for ApiClient {
    async fn check_favorite(&self, token: &str, company_id: i64) -> Result<bool, ApiError> {
        let url = self.url(&format!("/api/favorites/check/{}", company_id));
        let response = Self::send(Self::with_bearer(Request::get(&url), token)).await?;
        let check = Self::decode::<FavoriteCheckResponse>(response).await?;
        Ok(check.is_favorite)
    }

    async fn add_favorite(&self, token: &str, company_id: i64) -> Result<(), ApiError> {
        log::info!("⭐ [API] Añadiendo empresa {} a favoritos", company_id);
        let request = Self::with_bearer(Request::post(&self.url("/api/favorites")), token)
            .json(&AddFavoriteRequest { company_id })
            .map_err(|e| ApiError::Parse(format!("Serialization error: {}", e)))?;
        let response = Self::send_request(request).await?;
        Self::expect_ok(response).await
    }

    async fn remove_favorite(&self, token: &str, company_id: i64) -> Result<(), ApiError> {
        log::info!("🗑️ [API] Quitando empresa {} de favoritos", company_id);
        let url = self.url(&format!("/api/favorites/{}", company_id));
        let response = Self::send(Self::with_bearer(Request::delete(&url), token)).await?;
        Self::expect_ok(response).await
    }

    async fn list_favorites(&self, token: &str) -> Result<Vec<FavoriteEntry>, ApiError> {
        let builder = Self::with_bearer(Request::get(&self.url("/api/favorites")), token);
        let response = Self::send(builder).await?;
        let list = Self::decode::<FavoritesResponse>(response).await?;
        Ok(list.favorites)
    }
}

impl AuthApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        log::info!("🔐 [API] Login para {}", email);
        let request = Request::post(&self.url("/api/auth/login"))
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .map_err(|e| ApiError::Parse(format!("Serialization error: {}", e)))?;
        let response = Self::send_request(request).await?;
        Self::decode_lenient::<LoginResponse>(response).await
    }

    async fn register(&self, form: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        log::info!("📝 [API] Registro para {}", form.email);
        let request = Request::post(&self.url("/api/auth/register"))
            .json(form)
            .map_err(|e| ApiError::Parse(format!("Serialization error: {}", e)))?;
        let response = Self::send_request(request).await?;
        Self::decode_lenient::<RegisterResponse>(response).await
    }

    async fn validate(&self, token: &str) -> Result<ValidateResponse, ApiError> {
        let request = Request::post(&self.url("/api/auth/validate"))
            .json(&SessionTokenRequest {
                session_token: token.to_string(),
            })
            .map_err(|e| ApiError::Parse(format!("Serialization error: {}", e)))?;
        let response = Self::send_request(request).await?;
        Self::decode_lenient::<ValidateResponse>(response).await
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        let request = Request::post(&self.url("/api/auth/logout"))
            .json(&SessionTokenRequest {
                session_token: token.to_string(),
            })
            .map_err(|e| ApiError::Parse(format!("Serialization error: {}", e)))?;
        let response = Self::send_request(request).await?;
        Self::expect_ok(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_array_payload_is_rejected() {
        let err = parse_companies_payload(r#"{"error": "DB connection failed"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn test_array_payload_parses_records() {
        let body = r#"[
            {"id": 1, "object_name": "Аптека", "latitude": 55.75, "longitude": 37.62, "license_status_color": "active"},
            {"id": 2, "latitude": null, "longitude": null}
        ]"#;
        let records = parse_companies_payload(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].coordinates(), None);
    }
}
