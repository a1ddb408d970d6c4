pub mod block_menu;
pub mod ui;

pub use block_menu::BlockMenu;
