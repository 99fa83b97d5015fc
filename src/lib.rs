//! Desktop client for brain MRI and chest X-ray classification.
//!
//! Uploads one image per zone to an inference server, normalizes whatever
//! JSON shape comes back into `{label, confidence}`, and shows the result
//! with short educational text.

pub mod analysis;
pub mod app;
pub mod boot;
pub mod client;
pub mod config;
pub mod dropzone;
pub mod error;
pub mod format;
pub mod inference;
pub mod state;
pub mod ui;
pub mod view;
