//! TUI module for the interactive screen flow.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (App, Screen, Action, Intent, Transition)
//! - `update`: Pure input handling plus the intent controller
//! - `view`: Pure rendering
//! - `theme`: Style constants
//! - `run`: Effects (terminal, event loop)
//! - `script`: Headless replay of action sequences

pub mod run;
pub mod script;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
