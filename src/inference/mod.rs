//! Inference layer: zone model, label resolution, and response normalization.
//!
//! Architecture:
//! ```text
//!  server JSON (any of several shapes)
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ normalize  │  ordered extractors → raw label + confidence
//!   └───────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  labels   │  `class_<i>` → human label via LabelRegistry
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ canonical  │  free-form label → education key
//!   └───────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ education  │  static what / why / next text
//!   └───────────┘
//! ```

pub mod canonical;
pub mod education;
pub mod labels;
pub mod model;
pub mod normalize;
