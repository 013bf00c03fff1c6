// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod action;
pub mod error;
pub mod filter;
pub mod grid;
pub mod input;
pub mod layout;
pub mod navigation;
pub mod query;
pub mod search;
pub mod state;

pub use action::*;
pub use error::*;
pub use filter::*;
pub use grid::*;
pub use input::*;
pub use layout::*;
pub use navigation::*;
pub use search::*;
pub use state::*;
