//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - world: позиционирование в мире (WorldPosition)
//! - actor: роли акторов (PursuitTarget — цель паука)

pub mod actor;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use world::*;
