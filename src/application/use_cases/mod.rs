/// Use cases module containing application business logic orchestration
mod dt_assemble;

pub use dt_assemble::DtAssembleUseCase;
