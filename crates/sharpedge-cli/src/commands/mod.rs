//! Command implementations.

pub mod adjust;
pub mod check_config;
pub mod evaluate;

pub use self::adjust::execute_adjust;
pub use self::check_config::execute_check_config;
pub use self::evaluate::execute_evaluate;
