mod assets;
mod content;

pub use assets::{asset_file_name, ImageStore};
pub use content::ContentStore;
