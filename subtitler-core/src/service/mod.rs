pub mod providers_manager;

pub use providers_manager::{ProviderHandler, ProviderStatus, ProvidersManager};
