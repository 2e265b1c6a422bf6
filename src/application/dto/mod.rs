/// Data Transfer Objects for application layer
///
/// The use case takes the validated `DtAssembleParams` as its request and
/// answers with an `AssembleResponse`.
mod assemble_response;

pub use assemble_response::AssembleResponse;
