pub mod editor;
pub mod form;
pub mod gesture;
pub mod grid;
pub mod history;
pub mod selection;
pub mod zoom;
