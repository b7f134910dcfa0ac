mod error;
mod home;
mod login;
mod plan;
mod signup;

pub use error::ErrorPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use plan::PlanPage;
pub use signup::SignupPage;
