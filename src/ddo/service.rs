//! Well-known service type tags published in agent identity documents.

/// Invokable-operation service.
pub const SERVICE_TYPE_INVOKE: &str = "Tethys.Invoke.v1";

/// Metadata and asset listing service.
pub const SERVICE_TYPE_META: &str = "Tethys.Meta.v1";

/// Token-based authentication service.
pub const SERVICE_TYPE_AUTH: &str = "Tethys.Auth.v1";

/// Asset payload storage service.
pub const SERVICE_TYPE_STORAGE: &str = "Tethys.Storage.v1";

/// Marketplace listing service.
pub const SERVICE_TYPE_MARKET: &str = "Tethys.Market.v1";
