mod reader;

pub use reader::{read_sla, read_sla_from_str};
