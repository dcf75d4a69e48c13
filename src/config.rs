use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    pub default_language: String,
    pub map_config: MapConfig,
    pub ui_config: UIConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: "http://127.0.0.1:5000".to_string(),
            backend_url_production: "http://127.0.0.1:5000".to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            default_language: "RU".to_string(),
            map_config: MapConfig::default(),
            ui_config: UIConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub default_center_lat: f64,
    pub default_center_lng: f64,
    pub default_zoom: f64,
    pub max_zoom: f64,
    pub tile_url: String,
    pub attribution: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center_lat: 55.75,
            default_center_lng: 37.62,
            default_zoom: 10.0,
            max_zoom: 18.0,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UIConfig {
    /// Ventana de silencio de los debounces (búsqueda y movimiento del mapa)
    pub debounce_ms: u32,
    pub similarity_radius_meters: f64,
    pub notification_ms: u32,
    pub popup_max_width: u32,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            similarity_radius_meters: 1000.0,
            notification_ms: 5000,
            popup_max_width: 420,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url_development: option_env!("BACKEND_URL_DEVELOPMENT")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url_development),
            backend_url_production: option_env!("BACKEND_URL_PRODUCTION")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url_production),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            default_language: option_env!("DEFAULT_LANGUAGE")
                .unwrap_or("RU").to_uppercase(),
            map_config: MapConfig {
                default_center_lat: option_env!("DEFAULT_MAP_CENTER_LAT")
                    .unwrap_or("55.75").parse().unwrap_or(55.75),
                default_center_lng: option_env!("DEFAULT_MAP_CENTER_LNG")
                    .unwrap_or("37.62").parse().unwrap_or(37.62),
                default_zoom: option_env!("DEFAULT_MAP_ZOOM")
                    .unwrap_or("10").parse().unwrap_or(10.0),
                max_zoom: defaults.map_config.max_zoom,
                tile_url: option_env!("TILE_URL")
                    .map(str::to_string)
                    .unwrap_or(defaults.map_config.tile_url),
                attribution: defaults.map_config.attribution,
            },
            ui_config: UIConfig {
                debounce_ms: option_env!("DEBOUNCE_MS")
                    .unwrap_or("500").parse().unwrap_or(500),
                similarity_radius_meters: option_env!("SIMILARITY_RADIUS_METERS")
                    .unwrap_or("1000").parse().unwrap_or(1000.0),
                notification_ms: option_env!("NOTIFICATION_MS")
                    .unwrap_or("5000").parse().unwrap_or(5000),
                popup_max_width: defaults.ui_config.popup_max_width,
            },
        }
    }

    /// Obtiene la URL del backend según el entorno actual
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        }
    }

    /// Verifica si el modo de logging está habilitado
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_url_by_environment() {
        let mut config = AppConfig::default();
        config.backend_url_production = "https://licenses.example.ru".to_string();
        assert_eq!(config.backend_url(), "http://127.0.0.1:5000");

        config.environment = "production".to_string();
        assert_eq!(config.backend_url(), "https://licenses.example.ru");
    }

    #[test]
    fn test_defaults_match_ui_contract() {
        let config = AppConfig::default();
        assert_eq!(config.ui_config.debounce_ms, 500);
        assert_eq!(config.ui_config.similarity_radius_meters, 1000.0);
        assert_eq!(config.map_config.default_zoom, 10.0);
    }
}
