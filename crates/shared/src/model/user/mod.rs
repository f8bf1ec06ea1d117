mod user;
pub use user::*;

mod new;
pub use new::*;

mod gender;
pub use gender::*;
