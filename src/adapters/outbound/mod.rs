/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod assembler;
pub mod console;
pub mod filesystem;
pub mod network;
