pub mod selector;
pub mod session;

pub use session::WebDriverSession;
