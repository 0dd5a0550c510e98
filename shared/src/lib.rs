//! # Shared Display Helpers
//!
//! Presentation utilities shared by rendering collaborators of the wallet
//! adapter. The adapter core never formats anything for display.
//!
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Format wallet addresses for display
//!   - **[`utils::display_address`]**: The short form used next to "Account:"

pub mod utils;

pub use utils::{display_address, format_address};
