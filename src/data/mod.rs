//! Data layer: reading Cary Eclipse exports and the views derived from them.
//!
//! Architecture:
//! ```text
//!   export .csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  table    │  numeric grid, log boundary
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐      ┌────────────────┐
//!   │ assembler  │ ───▶ │ collection_log  │  raw text after the boundary
//!   └───────────┘      └────────────────┘
//!        │                     │
//!        ▼                     ▼
//!   ┌─────────────────────────────┐
//!   │ CaryDataset (model)          │  traces, flags, collection times
//!   └─────────────────────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  views    │  collapsed table, excitation-emission matrices
//!   └──────────┘
//! ```

pub mod assembler;
pub mod collection_log;
pub mod loader;
pub mod model;
pub mod names;
pub mod table;
pub mod views;
