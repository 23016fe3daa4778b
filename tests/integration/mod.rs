mod builder;
mod race_flow;
mod recovery;
mod timeouts;
mod training;
