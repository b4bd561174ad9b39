pub mod invariants;
pub mod protected_tags;
pub mod validation;

pub use protected_tags::enforce_protected_tags;
pub use validation::require_id;
