pub mod ingest_service;
pub mod normalizer;
pub mod notifier;
