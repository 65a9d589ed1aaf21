// Application layer: workflows composed from the engine and the adapters.

pub mod batch;
