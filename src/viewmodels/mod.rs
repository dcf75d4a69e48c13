pub mod loader_viewmodel;
pub mod similarity_viewmodel;
pub mod favorites_viewmodel;
pub mod session_viewmodel;
pub mod popup_viewmodel;

pub use loader_viewmodel::{LoadTrigger, LoaderViewModel};
pub use similarity_viewmodel::SimilarityQuery;
pub use favorites_viewmodel::{FavoritesViewModel, ToggleOutcome};
pub use session_viewmodel::SessionViewModel;
pub use popup_viewmodel::PopupContent;
