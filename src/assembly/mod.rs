/// Assembly domain - parameter model, validation and translation.
///
/// Pure logic only: nothing in here touches the network, the file
/// system or the process environment.
pub mod domain;
pub mod services;
