pub mod lifecycle;
pub mod register_user;

pub use lifecycle::LifecycleUseCase;
pub use register_user::{RegisterUserInput, RegisterUserUseCase};
