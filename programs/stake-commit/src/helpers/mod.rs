pub mod attestation;
pub mod commitment;
pub mod cpi;
pub mod window;
