//! State management module
//!
//! This module handles all board state, including:
//! - Entities and their normalization from wire records (data.rs, normalize.rs)
//! - The store and its initial load (store.rs)
//! - One coordinator per remote mutation (coordinator.rs)
//! - Which dialog is open (dialog.rs) and the dialog forms (form.rs)
//! - The intents the view raises (board.rs)

pub mod board;
pub mod coordinator;
pub mod data;
pub mod dialog;
pub mod form;
pub mod normalize;
pub mod store;

#[cfg(test)]
pub mod testing;
