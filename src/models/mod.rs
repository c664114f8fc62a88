pub mod forms;
pub mod response;
pub mod token;
pub mod user;

pub use forms::{LoginForm, LoginRequest, ProfileImage, RegisterRequest, SignUpForm};
pub use response::{AuthResponse, ImageUploadResponse, SubmissionResult};
pub use token::SessionToken;
pub use user::UserProfile;
