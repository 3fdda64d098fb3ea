//! Infrastructure layer - Embedders, semantic index backends and services

pub mod embedding;
pub mod http_client;
pub mod logging;
pub mod semantic_index;
pub mod services;
