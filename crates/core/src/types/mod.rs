//! Core domain types.

mod dni;
mod email;
mod id;
mod money;

pub use dni::{Dni, DniError, DNI_CHECK_LETTERS};
pub use email::{Email, EmailError};
pub use id::ProductId;
pub use money::Money;
