//! View helpers
//!
//! - Profile header and card grid (cards.rs)
//! - Modal dialogs (popup.rs)
//! - Session image cache (images.rs)

pub mod cards;
pub mod images;
pub mod popup;
