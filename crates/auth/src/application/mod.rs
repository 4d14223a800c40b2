pub mod check_token;
pub mod config;
pub mod sign_in;

pub use check_token::CheckTokenUseCase;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
