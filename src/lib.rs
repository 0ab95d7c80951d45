pub mod archive;
pub mod config;
pub mod error;
pub mod path;
pub mod resource;
pub mod store;

pub use resource::ResourceManager;
