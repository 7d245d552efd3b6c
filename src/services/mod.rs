pub mod providers;
pub mod recommendations;
pub mod registry;

pub use recommendations::Recommender;
pub use registry::ProviderRegistry;
