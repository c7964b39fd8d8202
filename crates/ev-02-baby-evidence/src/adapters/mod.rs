//! # Adapters Module

pub mod trusted_headers;

pub use trusted_headers::HistoryTrustedHeaders;
