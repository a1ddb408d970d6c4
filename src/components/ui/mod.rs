pub mod alert;
pub mod button;
pub mod card;
pub mod input;

// Re-export component symbols so callers can `use crate::components::ui::Button` etc.
pub use alert::*;
pub use button::*;
pub use card::*;
pub use input::*;
