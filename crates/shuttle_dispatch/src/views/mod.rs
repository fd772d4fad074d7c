pub mod detailed_visits;
pub mod legacy_response;
pub mod summary;
pub mod visit_kind;
