pub mod keyboard;
pub mod keymap;
pub mod pointer;
