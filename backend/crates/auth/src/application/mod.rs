//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod delete_user;
pub mod session_provider;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod token;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use delete_user::DeleteUserUseCase;
pub use session_provider::{AuthSessionProvider, LocalSessionProvider, SessionProvider};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
