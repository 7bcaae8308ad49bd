mod file_store_client;
mod generation_client;

pub use file_store_client::GeminiFileStoreClient;
pub use generation_client::GeminiGenerationClient;
