// Interface adapters: wire protocol decoding, the input boundary and default
// collaborator sinks.

pub mod input;
pub mod protocol;
pub mod sinks;
