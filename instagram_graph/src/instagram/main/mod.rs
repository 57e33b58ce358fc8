mod client;
mod service;
mod utils;


pub use client::{GraphApi, InstagramGraphClient};
pub use service::InstagramService;
