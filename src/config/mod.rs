/// Pipeline settings and their JSON representation.
pub mod settings;
