//! Integration tests: the full refresh cycle over an in-memory source.

mod mock_source;
mod pipeline;
