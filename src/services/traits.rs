// ============================================================================
// TRAITS DE SERVICIOS - Costuras entre viewmodels y backend
// ============================================================================
// La app usa ApiClient; los tests usan implementaciones en memoria.
// ============================================================================

#![allow(async_fn_in_trait)]

use crate::models::{
    CompanyQuery, CompanyRecord, FavoriteEntry, FilterOptions, LoginResponse, RegisterRequest,
    RegisterResponse, ValidateResponse,
};
use crate::services::api_error::ApiError;

pub trait CompaniesApi {
    async fn fetch_companies(&self, query: &CompanyQuery) -> Result<Vec<CompanyRecord>, ApiError>;
    async fn fetch_filter_options(&self) -> Result<FilterOptions, ApiError>;
}

pub trait FavoritesApi {
    async fn check_favorite(&self, token: &str, company_id: i64) -> Result<bool, ApiError>;
    async fn add_favorite(&self, token: &str, company_id: i64) -> Result<(), ApiError>;
    async fn remove_favorite(&self, token: &str, company_id: i64) -> Result<(), ApiError>;
    async fn list_favorites(&self, token: &str) -> Result<Vec<FavoriteEntry>, ApiError>;
}

pub trait AuthApi {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;
    async fn register(&self, form: &RegisterRequest) -> Result<RegisterResponse, ApiError>;
    async fn validate(&self, token: &str) -> Result<ValidateResponse, ApiError>;
    async fn logout(&self, token: &str) -> Result<(), ApiError>;
}
