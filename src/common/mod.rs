// Constants shared across the client and the CLI

pub mod constants;
