pub mod api_client;

pub use api_client::{not_found_as_none, ApiClient, ApiError, RouteApi};
