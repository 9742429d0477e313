// HTTP server modules
pub mod handlers;
pub mod models;
pub mod routes;
pub mod stream;

// Session state
pub mod store;

// Conversation assembly and intent routing
pub mod intent;
pub mod prompt;

// Completion endpoint client
pub mod llm;
