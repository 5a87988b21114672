//! Database repository layer.
//!
//! Repositories handle database operations for persisted domain entities. They use SeaORM
//! entity models internally and convert to domain models at the boundary. The counting
//! state itself is never stored; it is recovered from channel history.

pub mod bot_admin;

#[cfg(test)]
mod test;
