// Adapters layer: concrete fetch strategies behind the `FetchStrategy` port.

pub mod browser;
pub mod http;
