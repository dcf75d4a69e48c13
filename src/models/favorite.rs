use serde::{Deserialize, Serialize};
use crate::models::company::StatusColor;

/// Días restantes por debajo de los cuales una licencia "vence pronto"
pub const EXPIRING_SOON_DAYS: i64 = 30;

/// Entrada de favoritos (espejo de lo que guarda el backend)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    #[serde(default)]
    pub favorite_id: Option<i64>,
    pub company_id: i64,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_address: Option<String>,
    #[serde(default)]
    pub added_at: Option<String>,
    #[serde(default)]
    pub object_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub license_expire: Option<String>,
    #[serde(default)]
    pub license_type_code: Option<String>,
    #[serde(default)]
    pub license_type_name: Option<String>,
    #[serde(default)]
    pub license_status: Option<String>,
    #[serde(default)]
    pub adm_area: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    /// Negativo = vencida
    #[serde(default)]
    pub days_until_expire: Option<i64>,
    #[serde(default)]
    pub license_status_color: Option<StatusColor>,
}

/// Badge de vencimiento que se muestra en el panel de favoritos
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpiryBadge {
    Overdue(i64),
    ExpiringSoon(i64),
    Valid(i64),
    Unknown,
}

impl FavoriteEntry {
    /// Nombre actual de la empresa o el guardado al añadirla
    pub fn display_name(&self) -> Option<&str> {
        self.object_name
            .as_deref()
            .or(self.company_name.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    pub fn display_address(&self) -> Option<&str> {
        self.address
            .as_deref()
            .or(self.company_address.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }

    pub fn expiry_badge(&self) -> ExpiryBadge {
        match self.days_until_expire {
            None => ExpiryBadge::Unknown,
            Some(days) if days < 0 => ExpiryBadge::Overdue(-days),
            Some(days) if days <= EXPIRING_SOON_DAYS => ExpiryBadge::ExpiringSoon(days),
            Some(days) => ExpiryBadge::Valid(days),
        }
    }
}

/// GET /api/favorites
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FavoritesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub favorites: Vec<FavoriteEntry>,
}

/// GET /api/favorites/check/{id}
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FavoriteCheckResponse {
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// POST /api/favorites
#[derive(Clone, Debug, Serialize)]
pub struct AddFavoriteRequest {
    pub company_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_badge_thresholds() {
        let mut fav = FavoriteEntry { company_id: 1, ..Default::default() };
        assert_eq!(fav.expiry_badge(), ExpiryBadge::Unknown);

        fav.days_until_expire = Some(-3);
        assert_eq!(fav.expiry_badge(), ExpiryBadge::Overdue(3));

        fav.days_until_expire = Some(30);
        assert_eq!(fav.expiry_badge(), ExpiryBadge::ExpiringSoon(30));

        fav.days_until_expire = Some(31);
        assert_eq!(fav.expiry_badge(), ExpiryBadge::Valid(31));
    }

    #[test]
    fn test_display_name_falls_back_to_saved_name() {
        let json = r#"{"company_id": 5, "company_name": "ООО Ромашка", "object_name": null, "days_until_expire": 12}"#;
        let fav: FavoriteEntry = serde_json::from_str(json).unwrap();
        assert_eq!(fav.display_name(), Some("ООО Ромашка"));
        assert_eq!(fav.display_address(), None);
    }
}
