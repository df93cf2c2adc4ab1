//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Contains use case implementations.

pub mod config;
pub mod queries;
pub mod request_withdrawal;
pub mod set_user_balance;

pub use config::LedgerConfig;
pub use queries::{ListUsersUseCase, ListWithdrawalsUseCase};
pub use request_withdrawal::{RequestWithdrawalInput, RequestWithdrawalUseCase};
pub use set_user_balance::SetUserBalanceUseCase;
