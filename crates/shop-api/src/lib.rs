mod auth;
mod cart;
mod error;
mod http;
mod products;
mod types;
mod voice;

pub use auth::AuthApi;
pub use cart::{CartApi, CartSync};
pub use error::Error;
pub use http::ReqwestClient;
pub use products::ProductsApi;
pub use types::*;
pub use voice::VoiceApi;
