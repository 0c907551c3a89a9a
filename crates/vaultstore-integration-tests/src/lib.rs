//! Scenario and concurrency tests for the vault store live under `tests/`.
