pub mod config;
pub mod convert;
pub mod error;
pub mod key;
pub mod keyboard;
pub mod keycodes;
pub mod layouts;
pub mod modifiers;
pub mod platform;
pub mod reference;
pub mod store;

pub use error::{KbdError, KbdResult};
pub use key::{Key, KeyType};
pub use keyboard::Keyboard;
