// Entity Models
//
// A settlement has a stable identity (its name) and a growing set of postal
// codes. The catalog enforces name uniqueness on insert.

pub mod settlement;

pub use settlement::{
    is_capital_name, is_valid_postal_code, Settlement, SettlementCatalog, CAPITAL_PREFIX,
    POSTAL_CODE_LEN,
};
