//! The cart slice: items, state, actions and reducers.
//!
//! Control flow is `action creator -> Action -> reduce -> new AppState`. All
//! of it is pure; the store crate owns the current state and runs side
//! effects (persistence, UI refresh) after each transition.

pub mod actions;
pub mod item;
pub mod reducer;
pub mod state;
pub mod summary;

pub use actions::Action;
pub use item::{CartItem, Product};
pub use reducer::{reduce, reduce_cart, reduce_search};
pub use state::{AppState, CartState, calculate_total};
pub use summary::{CartSummary, TAX_RATE};
