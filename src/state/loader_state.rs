// ============================================================================
// LOADER STATE - Dataset en memoria + modo de visualización
// ============================================================================
// El loader es el único dueño del dataset. El modo "similares" guarda el
// conjunto de marcadores previo para poder restaurarlo tal cual.
// ============================================================================

use crate::models::{CompanyRecord, StrategyKind};

/// Etiqueta del contador de puntos
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointsTag {
    Strategy(StrategyKind),
    Similar,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointsLabel {
    pub count: usize,
    pub tag: PointsTag,
}

/// Qué está mostrando la capa de marcadores
#[derive(Clone, Debug, PartialEq)]
pub enum DisplayMode {
    /// Recargas reactivas activas (filtros, búsqueda, movimiento del mapa)
    Viewport,
    /// Solo coincidencias de similitud; recargas reactivas suspendidas
    Similar {
        saved_records: Vec<CompanyRecord>,
        saved_label: Option<PointsLabel>,
    },
}

#[derive(Clone, Debug)]
pub struct LoaderState {
    /// Último resultado completo de /api/companies (incluye registros sin coordenadas)
    pub dataset: Vec<CompanyRecord>,
    /// Registros actualmente dibujados en la capa
    pub rendered: Vec<CompanyRecord>,
    pub mode: DisplayMode,
    pub label: Option<PointsLabel>,
}

impl LoaderState {
    pub fn new() -> Self {
        Self {
            dataset: Vec::new(),
            rendered: Vec::new(),
            mode: DisplayMode::Viewport,
            label: None,
        }
    }

    pub fn is_similar_mode(&self) -> bool {
        matches!(self.mode, DisplayMode::Similar { .. })
    }

    /// Pasar a modo similares guardando lo que hay dibujado.
    /// Si ya estamos en modo similares se conserva la instantánea original.
    pub fn enter_similar_mode(&mut self) {
        if self.is_similar_mode() {
            return;
        }
        self.mode = DisplayMode::Similar {
            saved_records: self.rendered.clone(),
            saved_label: self.label,
        };
    }

    /// Salir del modo similares devolviendo la instantánea guardada
    pub fn take_saved(&mut self) -> Option<(Vec<CompanyRecord>, Option<PointsLabel>)> {
        match std::mem::replace(&mut self.mode, DisplayMode::Viewport) {
            DisplayMode::Similar { saved_records, saved_label } => Some((saved_records, saved_label)),
            DisplayMode::Viewport => None,
        }
    }
}

impl Default for LoaderState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64) -> CompanyRecord {
        CompanyRecord {
            id,
            latitude: Some(55.0),
            longitude: Some(37.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_enter_similar_keeps_first_snapshot() {
        let mut state = LoaderState::new();
        state.rendered = vec![record(1), record(2)];
        state.label = Some(PointsLabel { count: 2, tag: PointsTag::Strategy(StrategyKind::Top(500)) });

        state.enter_similar_mode();
        state.rendered = vec![record(2)];
        state.enter_similar_mode();

        let (saved, label) = state.take_saved().unwrap();
        assert_eq!(saved.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(label.unwrap().count, 2);
        assert!(!state.is_similar_mode());
        assert!(state.take_saved().is_none());
    }
}
