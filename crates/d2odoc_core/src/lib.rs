//! Public library API for decoding D2O game data containers.

/// Header detection, index and class tables, and schema-driven object decoding.
pub mod d2o;
