//! Employee declarations: input records, roster loading, and boundary
//! validation

mod data;
mod loader;
mod validate;

pub use data::{
    parse_birth_date, Declaration, DependentDeclaration, InsurancePremiums, SpouseDeclaration,
};
pub use loader::{load_roster, load_roster_from_reader, RosterError};
pub use validate::{validate_declaration, ValidationReport};
