mod execution;
mod utils;
