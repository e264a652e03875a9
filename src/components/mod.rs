//! UI Components
//!
//! Each page encapsulates its own state, event handling, and rendering
//! logic; pages communicate through Actions and the stage anchor registry
//! rather than direct state mutation.

pub mod details;
pub mod home;
pub mod layout;
pub mod toast;

pub use details::DetailsPage;
pub use home::HomePage;
pub use toast::Toaster;
