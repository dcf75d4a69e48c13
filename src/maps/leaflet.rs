// ============================================================================
// LEAFLET - Bindings wasm-bindgen + implementación web de MarkerLayer
// ============================================================================
// Solo wrappers del API global `L` de Leaflet - la lógica vive en viewmodels
// ============================================================================

use std::rc::Rc;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use web_sys::Element;
use crate::config::MapConfig;
use crate::models::{CompanyRecord, MapBounds, Viewport};
use super::traits::{MapError, MarkerLayer, MarkerSpec};

#[wasm_bindgen]
extern "C" {
    pub type LeafletMap;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    fn new_map(container_id: &str) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &JsValue, zoom: f64) -> LeafletMap;

    #[wasm_bindgen(method, js_name = getZoom)]
    fn get_zoom(this: &LeafletMap) -> f64;

    #[wasm_bindgen(method, js_name = getBounds)]
    fn get_bounds(this: &LeafletMap) -> LatLngBounds;

    #[wasm_bindgen(method)]
    fn on(this: &LeafletMap, event: &str, handler: &js_sys::Function);

    pub type LatLngBounds;

    #[wasm_bindgen(method, js_name = getSouth)]
    fn get_south(this: &LatLngBounds) -> f64;

    #[wasm_bindgen(method, js_name = getWest)]
    fn get_west(this: &LatLngBounds) -> f64;

    #[wasm_bindgen(method, js_name = getNorth)]
    fn get_north(this: &LatLngBounds) -> f64;

    #[wasm_bindgen(method, js_name = getEast)]
    fn get_east(this: &LatLngBounds) -> f64;

    pub type TileLayer;

    #[wasm_bindgen(catch, js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url: &str, options: &JsValue) -> Result<TileLayer, JsValue>;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &TileLayer, map: &LeafletMap) -> TileLayer;

    pub type LayerGroup;

    #[wasm_bindgen(catch, js_namespace = L, js_name = layerGroup)]
    fn layer_group() -> Result<LayerGroup, JsValue>;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &LayerGroup, map: &LeafletMap) -> LayerGroup;

    #[wasm_bindgen(method, js_name = clearLayers)]
    fn clear_layers(this: &LayerGroup);

    #[derive(Clone)]
    pub type CircleMarker;

    #[wasm_bindgen(catch, js_namespace = L, js_name = circleMarker)]
    fn circle_marker(latlng: &JsValue, options: &JsValue) -> Result<CircleMarker, JsValue>;

    #[wasm_bindgen(method, js_name = setRadius)]
    fn set_radius(this: &CircleMarker, radius: f64);

    #[wasm_bindgen(method, js_name = setStyle)]
    fn set_style(this: &CircleMarker, style: &JsValue);

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &CircleMarker, content: &js_sys::Function, options: &JsValue);

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &CircleMarker, group: &LayerGroup) -> CircleMarker;

    #[wasm_bindgen(method)]
    fn on(this: &CircleMarker, event: &str, handler: &js_sys::Function);
}

/// Serializar a objeto JS vía JSON (opciones de Leaflet)
fn to_js_object<T: Serialize>(value: &T) -> Result<JsValue, MapError> {
    let json = serde_json::to_string(value).map_err(|e| MapError::Js(e.to_string()))?;
    js_sys::JSON::parse(&json).map_err(|e| MapError::Js(format!("{:?}", e)))
}

fn lat_lng(latitude: f64, longitude: f64) -> JsValue {
    js_sys::Array::of2(&JsValue::from_f64(latitude), &JsValue::from_f64(longitude)).into()
}

/// Constructor del contenido del popup a partir del registro
pub type PopupFactory = Rc<dyn Fn(&CompanyRecord) -> Result<Element, JsValue>>;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileOptions<'a> {
    attribution: &'a str,
    max_zoom: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PopupOptions {
    class_name: &'static str,
    max_width: u32,
}

/// Mapa Leaflet montado en un contenedor del DOM
pub struct MapView {
    map: LeafletMap,
    move_handler: Option<Closure<dyn FnMut(JsValue)>>,
}

impl MapView {
    /// Crear mapa + capa de teselas en `container_id` (el contenedor ya debe estar en el DOM)
    pub fn mount(container_id: &str, config: &MapConfig) -> Result<Self, MapError> {
        log::info!("🗺️ [MAP] Inicializando Leaflet en #{}", container_id);

        let map = new_map(container_id).map_err(|e| MapError::Js(format!("{:?}", e)))?;
        map.set_view(
            &lat_lng(config.default_center_lat, config.default_center_lng),
            config.default_zoom,
        );

        let options = to_js_object(&TileOptions {
            attribution: &config.attribution,
            max_zoom: config.max_zoom,
        })?;
        let tiles = tile_layer(&config.tile_url, &options).map_err(|e| MapError::Js(format!("{:?}", e)))?;
        tiles.add_to(&map);

        Ok(Self {
            map,
            move_handler: None,
        })
    }

    /// Zoom y límites actuales
    pub fn viewport(&self) -> Viewport {
        let bounds = self.map.get_bounds();
        Viewport {
            zoom: self.map.get_zoom(),
            bounds: MapBounds {
                south: bounds.get_south(),
                west: bounds.get_west(),
                north: bounds.get_north(),
                east: bounds.get_east(),
            },
        }
    }

    /// Registrar el handler de fin de movimiento (pan o zoom). Solo uno a la vez.
    pub fn on_move_end<F>(&mut self, mut handler: F)
    where
        F: FnMut() + 'static,
    {
        let closure = Closure::wrap(Box::new(move |_e: JsValue| {
            handler();
        }) as Box<dyn FnMut(JsValue)>);
        self.map.on("moveend", closure.as_ref().unchecked_ref());
        self.move_handler = Some(closure);
    }

    pub fn center_on(&self, latitude: f64, longitude: f64, zoom: f64) {
        self.map.set_view(&lat_lng(latitude, longitude), zoom);
    }

    /// Crear la capa de marcadores asociada a este mapa
    pub fn create_marker_layer(&self, popup_factory: PopupFactory, popup_max_width: u32) -> Result<LeafletMarkerLayer, MapError> {
        let group = layer_group().map_err(|e| MapError::Js(format!("{:?}", e)))?;
        group.add_to(&self.map);
        let popup_options = to_js_object(&PopupOptions {
            class_name: "custom-popup",
            max_width: popup_max_width,
        })?;
        Ok(LeafletMarkerLayer {
            group,
            popup_factory,
            popup_options,
            handlers: Vec::new(),
            popup_builders: Vec::new(),
        })
    }
}

/// Implementación de MarkerLayer sobre un L.layerGroup
pub struct LeafletMarkerLayer {
    group: LayerGroup,
    popup_factory: PopupFactory,
    popup_options: JsValue,
    // Los closures viven mientras sus marcadores estén en la capa
    handlers: Vec<Closure<dyn FnMut(JsValue)>>,
    popup_builders: Vec<Closure<dyn FnMut(JsValue) -> JsValue>>,
}

impl MarkerLayer for LeafletMarkerLayer {
    fn clear_markers(&mut self) {
        self.group.clear_layers();
        self.handlers.clear();
        self.popup_builders.clear();
    }

    fn add_marker(&mut self, spec: MarkerSpec) -> Result<(), MapError> {
        if !spec.latitude.is_finite() || !spec.longitude.is_finite() {
            return Err(MapError::InvalidCoordinates);
        }

        let base_style = to_js_object(&spec.style)?;
        let hover_style = to_js_object(&spec.hover_style)?;
        let marker = circle_marker(&lat_lng(spec.latitude, spec.longitude), &base_style)
            .map_err(|e| MapError::Js(format!("{:?}", e)))?;

        // Hover: agrandar y aclarar, revertir al salir
        {
            let m = marker.clone();
            let radius = spec.hover_style.radius;
            let style = hover_style.clone();
            let over = Closure::wrap(Box::new(move |_e: JsValue| {
                m.set_radius(radius);
                m.set_style(&style);
            }) as Box<dyn FnMut(JsValue)>);
            marker.on("mouseover", over.as_ref().unchecked_ref());
            self.handlers.push(over);
        }
        {
            let m = marker.clone();
            let radius = spec.style.radius;
            let style = base_style.clone();
            let out = Closure::wrap(Box::new(move |_e: JsValue| {
                m.set_radius(radius);
                m.set_style(&style);
            }) as Box<dyn FnMut(JsValue)>);
            marker.on("mouseout", out.as_ref().unchecked_ref());
            self.handlers.push(out);
        }

        // Popup construido al abrirse (los handlers del popup ven el estado actual)
        {
            let factory = self.popup_factory.clone();
            let record = spec.record;
            let builder = Closure::wrap(Box::new(move |_layer: JsValue| -> JsValue {
                match factory(&record) {
                    Ok(element) => element.into(),
                    Err(e) => {
                        log::error!("❌ [MAP] Error construyendo popup: {:?}", e);
                        JsValue::from_str("")
                    }
                }
            }) as Box<dyn FnMut(JsValue) -> JsValue>);
            marker.bind_popup(builder.as_ref().unchecked_ref(), &self.popup_options);
            self.popup_builders.push(builder);
        }

        marker.add_to(&self.group);
        Ok(())
    }
}
