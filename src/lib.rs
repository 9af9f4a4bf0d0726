pub mod core;
pub mod xtb;

pub use crate::core::{
    config::{ClientMode, XtbConfig},
    errors::XtbError,
    types::*,
};
pub use xtb::streaming::StreamConnection;
pub use xtb::XtbClient;
