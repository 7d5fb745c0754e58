/// Class schema listing command.
pub mod classes;
/// Header and table statistics command.
pub mod info;
/// Full-scan decode command.
pub mod objects;
/// Bounded text rendering of decoded values.
pub mod print;
/// Single object decode command.
pub mod show;
/// Shared argument and JSON helpers.
pub mod util;
