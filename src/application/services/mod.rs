mod backend_selector;
mod default_image;

pub use backend_selector::BackendSelector;
pub use default_image::DefaultImageCache;
