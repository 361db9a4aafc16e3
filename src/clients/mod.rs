pub mod image_client;
pub mod llm_client;

pub use image_client::ImageClient;
pub use llm_client::LlmClient;
