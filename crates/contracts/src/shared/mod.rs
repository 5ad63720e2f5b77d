pub mod errors;
pub mod work_queue;
