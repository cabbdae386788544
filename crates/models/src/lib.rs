pub mod enrollment_status;
pub mod semester;
pub mod ssn;
pub mod template_id;
